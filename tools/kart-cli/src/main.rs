//! Kart CLI - drive the cart store from the command line.
//!
//! Commands:
//! - `kart add <id>` - Add one unit of a product
//! - `kart set <id> <amount>` - Change the amount of a product in the cart
//! - `kart remove <id>` - Remove a product from the cart
//! - `kart show` - Print the cart

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, RemoveArgs, Reported, SetArgs};

/// Kart CLI - Manage the persisted shopping cart
#[derive(Parser)]
#[command(name = "kart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of a product
    Add(AddArgs),

    /// Set the amount of a product in the cart
    Set(SetArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Show the cart
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init(&ctx.config.log, cli.verbose) {
        ctx.output.warn(&format!("{:#}", e));
    }

    let result = match cli.command {
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Set(args) => commands::set::run(args, &ctx).await,
        Commands::Remove(args) => commands::remove::run(args, &ctx).await,
        Commands::Show => commands::show::run(&ctx).await,
    };

    if let Err(e) = result {
        // Cart failures were already shown through the notifier.
        if e.downcast_ref::<Reported>().is_none() {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}
