use anyhow::{Context, Result};
use clap::Args;
use refs_engine::{Destination, NavigationConfig, Navigator, RecordingWorkspace};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{print_json, Target};
use crate::utils::ancestor_search::find_in_ancestors;

/// Settings file looked up next to the analyzed file and in its ancestors.
pub const CONFIG_FILE_NAME: &str = "refs.config.json";

#[derive(Args, Debug)]
pub struct Command {
    #[command(flatten)]
    target: Target,

    /// Navigation settings (JSON); `refs.config.json` is searched upwards
    /// from the file when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Stop at the import statement instead of following it
    #[arg(long)]
    jump_to_import: bool,

    /// Stop at the first module reached, even when it only re-exports
    #[arg(long)]
    no_skip_intermediate: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DefinitionOutput {
    destination: Option<Destination>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    opened: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    create_offers: Vec<PathBuf>,
}

pub fn handler(args: &Command) -> Result<()> {
    let target = args.target.load()?;
    let config = load_config(args.config.as_deref(), &target.file)?;
    let config = NavigationConfig {
        jump_to_import: config.jump_to_import || args.jump_to_import,
        skip_intermediate: config.skip_intermediate && !args.no_skip_intermediate,
        ..config
    };
    log::debug!("navigation config: {config:?}");

    let point = target.locator.point_of(target.offset)?;
    let workspace = Arc::new(RecordingWorkspace::new());
    let navigator = Navigator::on_disk(config, workspace.clone());
    let destination = navigator
        .definition_in_scope(&target.file, &target.source, &target.scope, point)
        .with_context(|| format!("Failed to find the definition in {}", target.file.display()))?;

    for warning in workspace.warnings() {
        eprintln!("warning: {warning}");
    }
    print_json(&DefinitionOutput {
        destination,
        warnings: workspace.warnings(),
        opened: workspace.opened(),
        create_offers: workspace.create_offers(),
    })
}

/// The explicit config file, or the nearest `refs.config.json`, or the
/// defaults.
fn load_config(explicit: Option<&Path>, file: &Path) -> Result<NavigationConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let start = file
                .canonicalize()
                .ok()
                .and_then(|file| file.parent().map(Path::to_path_buf));
            match start.and_then(|dir| find_in_ancestors(dir, CONFIG_FILE_NAME)) {
                Some(path) => path,
                None => return Ok(NavigationConfig::default()),
            }
        }
    };
    log::debug!("loading config from {}", path.display());
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    NavigationConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("lib");
        std::fs::create_dir_all(&nested).unwrap();
        let file = nested.join("main.js");
        std::fs::write(&file, "").unwrap();

        assert_eq!(load_config(None, &file).unwrap(), NavigationConfig::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"jumpToImport": true}"#,
        )
        .unwrap();
        let config = load_config(None, &file).unwrap();
        assert!(config.jump_to_import);
        assert!(config.skip_intermediate);
    }

    #[test]
    fn test_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navigation.json");
        std::fs::write(&path, r#"{"skipIntermediate": false}"#).unwrap();
        let config = load_config(Some(&path), Path::new("main.js")).unwrap();
        assert!(!config.skip_intermediate);

        std::fs::write(&path, "{").unwrap();
        assert!(load_config(Some(&path), Path::new("main.js")).is_err());
        assert!(load_config(Some(&dir.path().join("missing.json")), Path::new("main.js")).is_err());
    }
}
