use clap::{Args, Subcommand};
use schemata::database::ColumnSpec;
use schemata::lens::database::{DatabaseLens, DatabaseRefArgs, TableCreateArgs, TableRefArgs};
use schemata::lens::utils::{cell_text, truncate_cell, OutputFormat, DEFAULT_CELL_MAX_LEN};
use schemata::SchemataConfig;

use super::{print_json, print_json_lines, print_rows, report_error};

/// Arguments for the Table command
#[derive(Args)]
pub struct TableArgs {
    #[clap(subcommand)]
    pub command: TableCommands,
}

/// Table subcommands
#[derive(Subcommand)]
pub enum TableCommands {
    /// List user tables in a database
    List(DatabaseRefArgs),

    /// Create a table from column definitions
    Create {
        #[clap(flatten)]
        args: TableCreateArgs,

        /// Columns as a JSON array: [{"name":"id","type":"INTEGER","primaryKey":true}, ...]
        #[clap(long, value_name = "JSON", conflicts_with = "columns")]
        columns_json: Option<String>,

        /// Print the CREATE TABLE statement instead of executing it
        #[clap(long)]
        dry_run: bool,
    },

    /// Show column metadata of a table
    Describe(TableRefArgs),

    /// Print every row of a table
    Data {
        #[clap(flatten)]
        args: TableRefArgs,

        /// Do not truncate long values in table output
        #[clap(long)]
        full: bool,
    },
}

pub fn run(config: &SchemataConfig, args: TableArgs, output_format: OutputFormat) -> i32 {
    let registry = config.registry();
    let lens = DatabaseLens::new(&registry);

    match args.command {
        TableCommands::List(args) => run_list(&lens, &args, output_format),
        TableCommands::Create {
            args,
            columns_json,
            dry_run,
        } => run_create(&lens, args, columns_json, dry_run, output_format),
        TableCommands::Describe(args) => run_describe(&lens, &args, output_format),
        TableCommands::Data { args, full } => run_data(&lens, &args, full, output_format),
    }
}

fn run_list(lens: &DatabaseLens, args: &DatabaseRefArgs, output_format: OutputFormat) -> i32 {
    let list = match lens.list_tables(args) {
        Ok(list) => list,
        Err(e) => return report_error(&e),
    };

    match output_format {
        OutputFormat::JsonLine => print_json_lines(&list.tables),
        f if f.is_json() => print_json(&list, f),
        f => {
            let rows: Vec<Vec<String>> = list.tables.iter().map(|t| vec![t.clone()]).collect();
            print_rows(&["table"], &rows, f);
        }
    }
    0
}

fn run_create(
    lens: &DatabaseLens,
    mut args: TableCreateArgs,
    columns_json: Option<String>,
    dry_run: bool,
    output_format: OutputFormat,
) -> i32 {
    if let Some(json) = columns_json {
        match serde_json::from_str::<Vec<ColumnSpec>>(&json) {
            Ok(columns) => args.columns = columns,
            Err(e) => {
                eprintln!("ERROR: invalid --columns-json: {}", e);
                return 2;
            }
        }
    }

    if dry_run {
        return match lens.render_create_table(&args) {
            Ok(sql) => {
                println!("{}", sql);
                0
            }
            Err(e) => report_error(&e),
        };
    }

    let created = match lens.create_table(&args) {
        Ok(created) => created,
        Err(e) => return report_error(&e),
    };

    if output_format.is_json() {
        print_json(&created, output_format);
    } else {
        println!("{}: {}", created.message, created.table_name);
    }
    0
}

fn run_describe(lens: &DatabaseLens, args: &TableRefArgs, output_format: OutputFormat) -> i32 {
    let metadata = match lens.table_metadata(args) {
        Ok(metadata) => metadata,
        Err(e) => return report_error(&e),
    };

    match output_format {
        OutputFormat::JsonLine => print_json_lines(&metadata.columns),
        f if f.is_json() => print_json(&metadata, f),
        f => {
            let rows: Vec<Vec<String>> = metadata
                .columns
                .iter()
                .map(|c| {
                    vec![
                        c.ordinal.to_string(),
                        c.name.clone(),
                        c.type_name.clone(),
                        c.not_null.to_string(),
                        c.default_value.clone().unwrap_or_default(),
                        c.is_primary_key.to_string(),
                    ]
                })
                .collect();
            print_rows(
                &["ordinal", "name", "type", "not_null", "default", "primary_key"],
                &rows,
                f,
            );
        }
    }
    0
}

fn run_data(lens: &DatabaseLens, args: &TableRefArgs, full: bool, output_format: OutputFormat) -> i32 {
    let table = match lens.table_data(args) {
        Ok(table) => table,
        Err(e) => return report_error(&e),
    };

    match output_format {
        OutputFormat::JsonLine => print_json_lines(&table.data),
        f if f.is_json() => print_json(&table, f),
        f => {
            if table.data.is_empty() {
                println!("(no rows)");
                return 0;
            }
            let headers = table.column_names();
            let rows: Vec<Vec<String>> = table
                .data
                .iter()
                .map(|record| {
                    record
                        .values()
                        .map(|v| {
                            let text = cell_text(v);
                            if full || f == OutputFormat::Psv {
                                text
                            } else {
                                truncate_cell(&text, DEFAULT_CELL_MAX_LEN)
                            }
                        })
                        .collect()
                })
                .collect();
            let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
            print_rows(&header_refs, &rows, f);
        }
    }
    0
}
