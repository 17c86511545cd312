use language_core::{LanguageAnalyzer, Occurrence};
use language_svelte::SvelteAnalyzer;
use testing_utils::{assert_no_references, assert_references};

fn find(code: &str, offset: u32) -> Vec<Occurrence> {
    let analyzer = SvelteAnalyzer::new();
    let document = analyzer.parse(code, "source.svelte").unwrap();
    analyzer.find_references(&document, offset)
}

#[test]
fn script_bindings_in_markup() {
    assert_references(
        r#"
        <script>
          let «decl:na§me» = 'world'
        </script>
        <h1>Hello {«ref:n§ame»}!</h1>
        <input value={«ref:name»}>
        "#,
        find,
    );
}

#[test]
fn module_and_instance_scripts_share_scope() {
    assert_references(
        r#"
        <script context="module">
          export function reset() { «mut:cou§nt» = 0 }
        </script>
        <script>
          let «decl:co§unt» = 0
        </script>
        <button>{«ref:count»}</button>
        "#,
        find,
    );
}

#[test]
fn mutation_in_markup() {
    assert_references(
        r#"
        <script>
          let «decl:§foo» = 1
        </script>
        <button on:click={() => «mut:foo» = 0}>{«mut:f§oo» = 0}</button>
        "#,
        find,
    );
}

#[test]
fn debug_tag() {
    assert_references(
        r#"
        <script>
          let «decl:foo» = 1
        </script>
        {@debug «ref:f§oo»}
        "#,
        find,
    );
}

#[test]
fn component_tags() {
    assert_references(
        r#"
        <script>
          import «defimp:Fo§o» from './Foo.svelte'
        </script>
        <«ref:F§oo» />
        <«ref:Foo»>text</«ref:F§oo»   >
        <svelte:component this={«ref:Foo»} />
        "#,
        find,
    );
}

#[test]
fn directives() {
    assert_references(
        r#"
        <script>
          import { «namimp:fa§de» } from 'svelte/transition'
          import { fly } from 'svelte/transition'
        </script>
        <div transition:«ref:f§ade»|local={{ delay: 100 }} in:fly />
        <div out:«ref:fade» in:«ref:fade»={{ duration: 50 }} />
        "#,
        find,
    );
    assert_references(
        r#"
        <script>
          function «decl:toolt§ip»(node) {}
        </script>
        <span use:«ref:to§oltip»={'hi'}>?</span>
        "#,
        find,
    );
}

#[test]
fn slot_props() {
    assert_references(
        r#"
        <script>
          let item = 'outer'
        </script>
        <List let:«decl:it§em»>
          <p>{«ref:it§em»}</p>
        </List>
        <p>{item}</p>
        "#,
        find,
    );
}

#[test]
fn each_block_context() {
    assert_references(
        r#"
        <script>
          let «decl:ite§ms» = []
        </script>
        {#each «ref:items» as { name, id }, i (id)}
          <p>{name}</p>
        {/each}
        "#,
        find,
    );
    assert_references(
        r#"
        {#each items as { «decl:na§me», id }, i (id)}
          <p>{«ref:n§ame»}</p>
        {/each}
        <p>{name}</p>
        "#,
        find,
    );
    assert_references(
        r#"
        {#each list as item, «decl:§i»}
          {«ref:i»}
        {/each}
        {i}
        "#,
        find,
    );
}

#[test]
fn await_and_const() {
    assert_references(
        r#"
        {#await promise then «decl:val§ue»}
          {@const doubled = «ref:value» * 2}
          {doubled}
        {/await}
        "#,
        find,
    );
    assert_references(
        r#"
        {#await promise then value}
          {@const «decl:dou§bled» = value * 2}
          {«ref:doubled»}
        {/await}
        "#,
        find,
    );
}

#[test]
fn store_subscriptions() {
    assert_references(
        r#"
        <script>
          import { writable } from 'svelte/store'
          const «decl:cou§nt» = writable(0)
          $«ref:cou§nt»
        </script>
        <p>{$«ref:count»}</p>
        <button on:click={() => $«mut:count» = 42}>+</button>
        "#,
        find,
    );
}

#[test]
fn globals_in_markup() {
    assert_references(
        r#"
        <p>{«ref:con§sole»}</p>
        <p>{«ref:console».log('x')}</p>
        "#,
        find,
    );
}

#[test]
fn styles_and_comments_are_not_analyzed() {
    assert_no_references(
        r#"
        <!-- {fo§o} -->
        <style>p { col§or: red }</style>
        "#,
        find,
    );
}
