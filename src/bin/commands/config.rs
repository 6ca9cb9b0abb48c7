use clap::Args;
use schemata::lens::utils::OutputFormat;
use schemata::SchemataConfig;
use serde::Serialize;

use super::print_json;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Also list the database files found in the data directory
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    data_dir_exists: bool,
    busy_timeout_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    databases: Option<Vec<String>>,
}

pub fn run(config: &SchemataConfig, args: ConfigArgs, output_format: OutputFormat) -> i32 {
    let ConfigArgs { verbose } = args;

    let databases = if verbose {
        match config.registry().list_databases() {
            Ok(handles) => Some(handles.iter().map(|h| h.file_name()).collect()),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                None
            }
        }
    } else {
        None
    };

    let info = ConfigInfo {
        config_file: SchemataConfig::config_file_path(),
        data_dir: config.data_dir.clone(),
        data_dir_exists: std::path::Path::new(&config.data_dir).exists(),
        busy_timeout_ms: config.busy_timeout_ms,
        databases,
    };

    if output_format.is_json() {
        print_json(&info, output_format);
    } else {
        println!("{}", config.summary());
        if let Some(dbs) = &info.databases {
            println!("Databases:          {}", dbs.len());
            for db in dbs {
                println!("  - {}", db);
            }
        }
    }
    0
}
