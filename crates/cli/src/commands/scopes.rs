use anyhow::Result;
use clap::Args;
use refs_engine::Language;
use serde::Serialize;

use super::print_json;

#[derive(Args, Debug)]
pub struct Command {}

#[derive(Serialize)]
struct ScopeOutput {
    scope: &'static str,
    language: &'static str,
}

pub fn handler(_args: &Command) -> Result<()> {
    let output: Vec<ScopeOutput> = Language::ALL
        .into_iter()
        .flat_map(|language| {
            language.scopes().iter().map(move |&scope| ScopeOutput {
                scope,
                language: language.name(),
            })
        })
        .collect();
    print_json(&output)
}
