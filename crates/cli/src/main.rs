use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "refs")]
#[command(
    about = "Find references and definitions in JavaScript, Svelte, Python and PHP files",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every occurrence of the binding under the cursor
    References(commands::references::Command),

    /// Print where the name under the cursor is defined
    Definition(commands::definition::Command),

    /// List the supported editor scopes
    Scopes(commands::scopes::Command),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "error" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

    match &cli.command {
        Commands::References(args) => commands::references::handler(args)?,
        Commands::Definition(args) => commands::definition::handler(args)?,
        Commands::Scopes(args) => commands::scopes::handler(args)?,
    }

    Ok(())
}
