use anyhow::{Context, Result};
use clap::Args;
use language_core::{Occurrence, PointRange};
use serde::Serialize;

use super::{print_json, Target};

#[derive(Args, Debug)]
pub struct Command {
    #[command(flatten)]
    target: Target,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceOutput {
    #[serde(flatten)]
    occurrence: Occurrence,
    points: PointRange,
    text: String,
}

pub fn handler(args: &Command) -> Result<()> {
    let target = args.target.load()?;
    let occurrences = refs_engine::find_references(&target.source, &target.scope, target.offset)
        .with_context(|| format!("Failed to find references in {}", target.file.display()))?;
    log::debug!(
        "{} occurrences at offset {} of {}",
        occurrences.len(),
        target.offset,
        target.file.display()
    );

    let output = occurrences
        .into_iter()
        .map(|occurrence| {
            Ok(ReferenceOutput {
                points: target.locator.points(occurrence.range)?,
                text: occurrence
                    .range
                    .slice(&target.source)
                    .unwrap_or_default()
                    .to_string(),
                occurrence,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    print_json(&output)
}
