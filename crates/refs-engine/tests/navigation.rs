use language_core::filesystem::memory_fs;
use language_core::Position;
use refs_engine::{Destination, NavigationConfig, Navigator, RecordingWorkspace};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vfs::VfsPath;

fn tree(files: &[(&str, &str)]) -> VfsPath {
    let root = memory_fs();
    for (path, content) in files {
        let file = root.join(path.trim_start_matches('/')).unwrap();
        file.parent().create_dir_all().unwrap();
        file.create_file()
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }
    root
}

fn navigator(
    files: &[(&str, &str)],
    config: NavigationConfig,
) -> (Navigator, Arc<RecordingWorkspace>) {
    let workspace = Arc::new(RecordingWorkspace::new());
    let navigator = Navigator::on_vfs(config, tree(files), workspace.clone());
    (navigator, workspace)
}

fn definition(navigator: &Navigator, path: &str, source: &str, point: Position) -> Option<Destination> {
    navigator
        .definition(Path::new(path), source, point)
        .unwrap()
}

const MAIN_JS: &str = "import { x } from './index'\nconsole.log(x)";

#[test]
fn test_follows_reexport_chain() {
    let (navigator, workspace) = navigator(
        &[
            ("/index.js", "export { x } from './impl'\n"),
            ("/impl.js", "export const x = 1\n"),
        ],
        NavigationConfig::default(),
    );
    let destination = definition(&navigator, "/main.js", MAIN_JS, Position::new(1, 12));
    assert_eq!(
        destination,
        Some(Destination::at("/impl.js", Position::new(0, 13)))
    );
    assert!(workspace.warnings().is_empty());
    assert_eq!(navigator.cache().len(), 3);
}

#[test]
fn test_stops_at_reexport_without_skip_intermediate() {
    let config = NavigationConfig {
        skip_intermediate: false,
        ..NavigationConfig::default()
    };
    let (navigator, _) = navigator(
        &[
            ("/index.js", "export { x } from './impl'\n"),
            ("/impl.js", "export const x = 1\n"),
        ],
        config,
    );
    let destination = definition(&navigator, "/main.js", MAIN_JS, Position::new(1, 12));
    assert_eq!(
        destination,
        Some(Destination::at("/index.js", Position::new(0, 9)))
    );
}

#[test]
fn test_reexport_cycle_gives_up() {
    let (navigator, workspace) = navigator(
        &[
            ("/index.js", "export { x } from './other'\n"),
            ("/other.js", "export { x } from './index'\n"),
        ],
        NavigationConfig::default(),
    );
    let destination = definition(&navigator, "/main.js", MAIN_JS, Position::new(1, 12));
    assert_eq!(destination, None);
    let warnings = workspace.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("too many jumps"));

    // The budget belongs to one click, not to the navigator.
    let (navigator, workspace) = navigator_with_chain();
    for _ in 0..3 {
        let destination = definition(&navigator, "/main.js", MAIN_JS, Position::new(1, 12));
        assert!(destination.is_some());
    }
    assert!(workspace.warnings().is_empty());
}

fn navigator_with_chain() -> (Navigator, Arc<RecordingWorkspace>) {
    navigator(
        &[
            ("/index.js", "export { x } from './a'\n"),
            ("/a.js", "export { x } from './b'\n"),
            ("/b.js", "export { x } from './c'\n"),
            ("/c.js", "export { x } from './d'\n"),
            ("/d.js", "export const x = 1\n"),
        ],
        NavigationConfig::default(),
    )
}

#[test]
fn test_default_export_lands_on_declaration() {
    let (navigator, _) = navigator(
        &[("/foo.js", "const foo = () => 1\nexport default foo\n")],
        NavigationConfig::default(),
    );
    let source = "import foo from './foo'\nfoo()";
    let destination = definition(&navigator, "/main.js", source, Position::new(1, 1));
    assert_eq!(
        destination,
        Some(Destination::at("/foo.js", Position::new(0, 6)))
    );
}

#[test]
fn test_jump_to_import() {
    let config = NavigationConfig {
        jump_to_import: true,
        ..NavigationConfig::default()
    };
    let (navigator, _) = navigator(
        &[
            ("/index.js", "export { x } from './impl'\n"),
            ("/impl.js", "export const x = 1\n"),
        ],
        config,
    );

    // A use of the binding stops at the import statement.
    let destination = definition(&navigator, "/main.js", MAIN_JS, Position::new(1, 12));
    assert_eq!(
        destination,
        Some(Destination::at("/main.js", Position::new(0, 9)))
    );

    // The import itself crosses over, one module at a time.
    let destination = definition(&navigator, "/main.js", MAIN_JS, Position::new(0, 9));
    assert_eq!(
        destination,
        Some(Destination::at("/index.js", Position::new(0, 9)))
    );
}

#[test]
fn test_module_path_opens_file() {
    let (navigator, _) = navigator(
        &[("/lib/index.js", "export const a = 1\n")],
        NavigationConfig::default(),
    );
    let source = "import { a } from './lib'\n";
    let destination = definition(&navigator, "/main.js", source, Position::new(0, 20));
    assert_eq!(destination, Some(Destination::file("/lib/index.js")));
}

#[test]
fn test_missing_path_offers_creation() {
    let source = "import './setup'\n";
    let (navigator, workspace) = navigator(&[], NavigationConfig::default());
    let destination = definition(&navigator, "/src/main.js", source, Position::new(0, 9));
    assert_eq!(destination, None);
    assert_eq!(workspace.create_offers(), vec![PathBuf::from("/src/setup")]);
    assert!(workspace.warnings().is_empty());

    let config = NavigationConfig {
        create_not_found: false,
        ..NavigationConfig::default()
    };
    let (navigator, workspace) = self::navigator(&[], config);
    let destination = definition(&navigator, "/src/main.js", source, Position::new(0, 9));
    assert_eq!(destination, None);
    assert!(workspace.create_offers().is_empty());
    assert_eq!(workspace.warnings(), vec!["module ./setup was not found"]);
}

#[test]
fn test_url_opens_externally() {
    let (navigator, workspace) = navigator(&[], NavigationConfig::default());
    let source = "import confetti from 'https://cdn.example.com/confetti.js'\nconfetti()";
    let destination = definition(&navigator, "/main.js", source, Position::new(1, 3));
    assert_eq!(destination, None);
    assert_eq!(
        workspace.opened(),
        vec!["https://cdn.example.com/confetti.js"]
    );
}

#[test]
fn test_svelte_component_import() {
    let (navigator, _) = navigator(
        &[("/lib/format.js", "export function format(value) {\n  return value\n}\n")],
        NavigationConfig::default(),
    );
    let source = "<script>\n  import { format } from './lib/format'\n</script>\n\n<p>{format(1)}</p>\n";
    let destination = definition(&navigator, "/App.svelte", source, Position::new(4, 5));
    assert_eq!(
        destination,
        Some(Destination::at("/lib/format.js", Position::new(0, 16)))
    );
}

#[test]
fn test_python_from_import() {
    let (navigator, _) = navigator(
        &[
            ("/pkg/__init__.py", ""),
            ("/pkg/models.py", "class User:\n    pass\n"),
        ],
        NavigationConfig::default(),
    );
    let source = "from pkg.models import User\n\nUser()\n";
    let destination = definition(&navigator, "/main.py", source, Position::new(2, 0));
    assert_eq!(
        destination,
        Some(Destination::at("/pkg/models.py", Position::new(0, 6)))
    );
}

#[test]
fn test_php_use_clause() {
    let (navigator, _) = navigator(
        &[(
            "/src/Models/User.php",
            "<?php\nnamespace App\\Models;\n\nclass User {}\n",
        )],
        NavigationConfig::default(),
    );
    let source = "<?php\nuse App\\Models\\User;\n\n$user = new User();\n";
    let destination = definition(&navigator, "/src/main.php", source, Position::new(3, 13));
    assert_eq!(
        destination,
        Some(Destination::at("/src/Models/User.php", Position::new(3, 6)))
    );
}

#[test]
fn test_on_disk_with_packages() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let package = root.join("node_modules").join("greet");
    std::fs::create_dir_all(package.join("src")).unwrap();
    std::fs::write(package.join("package.json"), r#"{"main": "src/index.js"}"#).unwrap();
    std::fs::write(package.join("src/index.js"), "export { greet } from './greet'\n").unwrap();
    std::fs::write(package.join("src/greet.js"), "export function greet() {}\n").unwrap();

    let main = root.join("main.js");
    let source = "import { greet } from 'greet'\ngreet()\n";
    std::fs::write(&main, source).unwrap();

    let workspace = Arc::new(RecordingWorkspace::new());
    let navigator = Navigator::on_disk(NavigationConfig::default(), workspace.clone());
    let destination = navigator
        .definition(&main, source, Position::new(1, 0))
        .unwrap();
    assert_eq!(
        destination,
        Some(Destination::at(package.join("src/greet.js"), Position::new(0, 16)))
    );
    assert!(workspace.warnings().is_empty());
}
