use clap::{Args, Subcommand};
use schemata::lens::database::{DatabaseCreateArgs, DatabaseLens, DatabaseRefArgs};
use schemata::lens::utils::OutputFormat;
use schemata::{format_size, SchemataConfig};

use super::{print_json, print_json_lines, print_rows, report_error};

/// Arguments for the Database command
#[derive(Args)]
pub struct DatabaseArgs {
    #[clap(subcommand)]
    pub command: Option<DatabaseCommands>,
}

/// Database subcommands
#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// List databases in the data directory (default when no subcommand)
    List,

    /// Create a new, empty database
    Create(DatabaseCreateArgs),

    /// Show file size and table count of a database
    Info(DatabaseRefArgs),
}

pub fn run(config: &SchemataConfig, args: DatabaseArgs, output_format: OutputFormat) -> i32 {
    let registry = config.registry();
    let lens = DatabaseLens::new(&registry);

    match args.command {
        None | Some(DatabaseCommands::List) => run_list(&lens, output_format),
        Some(DatabaseCommands::Create(args)) => run_create(&lens, &args, output_format),
        Some(DatabaseCommands::Info(args)) => run_info(&lens, &args, output_format),
    }
}

fn run_list(lens: &DatabaseLens, output_format: OutputFormat) -> i32 {
    let list = match lens.list_databases() {
        Ok(list) => list,
        Err(e) => return report_error(&e),
    };

    match output_format {
        OutputFormat::JsonLine => print_json_lines(&list.databases),
        f if f.is_json() => print_json(&list, f),
        f => {
            let rows: Vec<Vec<String>> = list.databases.iter().map(|d| vec![d.clone()]).collect();
            print_rows(&["database"], &rows, f);
        }
    }
    0
}

fn run_create(lens: &DatabaseLens, args: &DatabaseCreateArgs, output_format: OutputFormat) -> i32 {
    let created = match lens.create_database(args) {
        Ok(created) => created,
        Err(e) => return report_error(&e),
    };

    if output_format.is_json() {
        print_json(&created, output_format);
    } else {
        println!("{}: {}", created.message, created.name);
    }
    0
}

fn run_info(lens: &DatabaseLens, args: &DatabaseRefArgs, output_format: OutputFormat) -> i32 {
    let info = match lens.database_info(args) {
        Ok(info) => info,
        Err(e) => return report_error(&e),
    };

    if output_format.is_json() {
        print_json(&info, output_format);
    } else {
        let rows = vec![
            vec!["name".to_string(), info.name.clone()],
            vec!["path".to_string(), info.path.clone()],
            vec!["size".to_string(), format_size(info.size_bytes)],
            vec!["tables".to_string(), info.table_count.to_string()],
        ];
        print_rows(&["field", "value"], &rows, output_format);
    }
    0
}
