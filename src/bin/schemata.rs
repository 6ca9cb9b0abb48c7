use clap::{Parser, Subcommand};
use schemata::lens::utils::OutputFormat;
use schemata::SchemataConfig;
use tracing::Level;

mod commands;

use commands::config::ConfigArgs;
use commands::database::DatabaseArgs;
use commands::table::TableArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.schemata/schemata.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Directory holding the database files (overrides the configuration file)
    #[clap(long, global = true)]
    data_dir: Option<String>,

    /// Print debug information
    #[clap(long, global = true)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, create, and describe databases
    #[clap(name = "db", alias = "database")]
    Database(DatabaseArgs),

    /// List, create, describe, and read tables
    Table(TableArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

fn main() {
    // .env values feed the SCHEMATA_* environment overrides
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            // filter spans/events with level DEBUG or higher.
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match SchemataConfig::new(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    let config = match &cli.data_dir {
        Some(dir) => match config.with_data_dir(dir) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        },
        None => config,
    };

    let code = match cli.command {
        Commands::Database(args) => commands::database::run(&config, args, cli.format),
        Commands::Table(args) => commands::table::run(&config, args, cli.format),
        Commands::Config(args) => commands::config::run(&config, args, cli.format),
    };
    std::process::exit(code);
}
