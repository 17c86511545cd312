pub mod definition;
pub mod references;
pub mod scopes;

use anyhow::{bail, Context, Result};
use clap::Args;
use language_core::{Locator, Position};
use refs_engine::scope_for_path;
use serde::Serialize;
use std::path::PathBuf;

/// A file and a cursor in it.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// File to analyze
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cursor as a byte offset
    #[arg(long, conflicts_with = "position")]
    pub offset: Option<u32>,

    /// Cursor as ROW:COLUMN, both 0-indexed
    #[arg(long, value_parser = parse_position)]
    pub position: Option<Position>,

    /// Editor scope, derived from the file extension when omitted
    #[arg(long)]
    pub scope: Option<String>,
}

/// A target with its file loaded.
pub struct LoadedTarget {
    pub file: PathBuf,
    pub source: String,
    pub scope: String,
    pub locator: Locator,
    pub offset: u32,
}

impl Target {
    pub fn load(&self) -> Result<LoadedTarget> {
        let source = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;
        let locator = Locator::new(&source);
        let offset = match (self.offset, self.position) {
            (Some(offset), _) => {
                if offset > locator.len() {
                    bail!("Offset {offset} is past the end of {}", self.file.display());
                }
                offset
            }
            (None, Some(position)) => locator
                .offset_of(position)
                .with_context(|| format!("Invalid position {position}"))?,
            (None, None) => bail!("Either --offset or --position is required"),
        };
        let scope = self
            .scope
            .clone()
            .unwrap_or_else(|| scope_for_path(&self.file).to_string());
        Ok(LoadedTarget {
            file: self.file.clone(),
            source,
            scope,
            locator,
            offset,
        })
    }
}

pub fn parse_position(value: &str) -> Result<Position, String> {
    let (row, column) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COLUMN, got '{value}'"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row '{row}'"))?;
    let column = column
        .trim()
        .parse()
        .map_err(|_| format!("invalid column '{column}'"))?;
    Ok(Position::new(row, column))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3:14"), Ok(Position::new(3, 14)));
        assert_eq!(parse_position(" 0 : 0 "), Ok(Position::new(0, 0)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a:1").is_err());
        assert!(parse_position("1:-1").is_err());
    }

    fn target_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_position() {
        let file = target_file("a = 1\nprint(a)\n", ".py");
        let target = Target {
            file: file.path().to_path_buf(),
            offset: None,
            position: Some(Position::new(1, 6)),
            scope: None,
        };
        let loaded = target.load().unwrap();
        assert_eq!(loaded.offset, 12);
        assert_eq!(loaded.scope, "source.python");
    }

    #[test]
    fn test_load_rejects_bad_cursor() {
        let file = target_file("const a = 1\n", ".js");
        let mut target = Target {
            file: file.path().to_path_buf(),
            offset: Some(100),
            position: None,
            scope: Some("source.js".into()),
        };
        assert!(target.load().is_err());

        target.offset = None;
        assert!(target.load().is_err());

        target.position = Some(Position::new(7, 0));
        assert!(target.load().is_err());
    }
}
