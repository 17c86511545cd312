use language_core::{LanguageAnalyzer, Occurrence};
use language_php::PhpAnalyzer;
use testing_utils::{assert_no_references, assert_references};

fn find(code: &str, offset: u32) -> Vec<Occurrence> {
    let document = PhpAnalyzer.parse(code, "text.html.php").unwrap();
    PhpAnalyzer.find_references(&document, offset)
}

#[test]
fn closures_share_captured_variables() {
    assert_references(
        "
        <?php
        «decl:$tot§al» = 0;
        $add = function ($x) use (&«ref:$total») {
            «mut:$tot§al» += $x;
        };
        echo «ref:$total»;
        ",
        find,
    );
}

#[test]
fn closures_without_use_are_isolated() {
    assert_references(
        "
        <?php
        $count = 1;
        $f = function () {
            return «ref:$co§unt»;
        };
        ",
        find,
    );
}

#[test]
fn arrow_functions_see_enclosing_scope() {
    assert_references(
        "
        <?php
        «decl:$fac§tor» = 2;
        $double = fn($x) => $x * «ref:$fa§ctor»;
        ",
        find,
    );
    assert_references(
        "
        <?php
        $x = 2;
        $double = fn(«decl:$§x») => «ref:$x» * 2;
        ",
        find,
    );
}

#[test]
fn global_variables() {
    assert_references(
        "
        <?php
        «decl:$con§fig» = [];
        function load() {
            global «ref:$config»;
            return «ref:$conf§ig»['debug'];
        }
        ",
        find,
    );
}

#[test]
fn variable_calls_are_variable_references() {
    assert_references(
        "
        <?php
        «decl:$callb§ack» = 'strtoupper';
        echo «ref:$callback»('x');
        ",
        find,
    );
}

#[test]
fn foreach_and_list_targets() {
    assert_references(
        "
        <?php
        foreach ($items as $key => «decl:$va§lue») {
            echo «ref:$value»;
        }
        ",
        find,
    );
    assert_references(
        "
        <?php
        [«decl:$fir§st», $second] = explode(',', $csv);
        echo «ref:$first»;
        ",
        find,
    );
}

#[test]
fn functions_are_case_insensitive() {
    assert_references(
        "
        <?php
        function «decl:hel§per»() {}
        «ref:helper»();
        «ref:HELPER»();
        class Foo {
            function run() { return «ref:Help§er»(); }
        }
        ",
        find,
    );
}

#[test]
fn classes_and_use_imports() {
    assert_references(
        "
        <?php
        use App\\Models\\«decl:Us§er»;
        function make(«ref:User» $u): «ref:User» {
            return new «ref:Us§er»();
        }
        class Admin extends «ref:User» {}
        echo «ref:User»::class;
        ",
        find,
    );
}

#[test]
fn constants_are_case_sensitive() {
    assert_references(
        "
        <?php
        const «decl:LIM§IT» = 10;
        const limit = 1;
        echo «ref:LIMIT» + limit;
        ",
        find,
    );
}

#[test]
fn properties() {
    assert_references(
        "
        <?php
        class Counter {
            private $«decl:cou§nt» = 0;
            public function increment() {
                $this->«mut:count»++;
                $this->«mut:count» = $this->«ref:co§unt» + 1;
                return $this->count();
            }
        }
        ",
        find,
    );
}

#[test]
fn static_members() {
    assert_references(
        "
        <?php
        class Registry {
            private static $«decl:ite§ms» = [];
            const «decl:MA§X» = 5;
            public static function «decl:ad§d»($item) {
                self::$«mut:items»[] = $item;
                return count(static::$«ref:items») < self::«ref:MAX»;
            }
            public function other() {
                static::«ref:add»(1);
            }
        }
        ",
        find,
    );
}

#[test]
fn members_do_not_cross_classes() {
    assert_references(
        "
        <?php
        class A {
            public function «decl:ru§n»() {}
            public function go() { $this->«ref:run»(); }
        }
        class B {
            public function run() {}
            public function go() { $this->run(); }
        }
        ",
        find,
    );
}

#[test]
fn namespaces_separate_functions() {
    assert_references(
        "
        <?php
        namespace First {
            function «decl:bo§ot»() {}
            «ref:boot»();
        }
        namespace Second {
            function boot() {}
            boot();
        }
        ",
        find,
    );
}

#[test]
fn inline_html() {
    assert_references(
        "
        <?php «decl:$tit§le» = 'Home'; ?>
        <h1><?php echo «ref:$title»; ?></h1>
        <p><?php echo «ref:$ti§tle»; ?></p>
        ",
        find,
    );
    assert_no_references("<p>$ti§tle</p>\n<?php $title = 1;\n", find);
}
