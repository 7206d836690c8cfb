mod cli;
mod logging;

use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use dotenv::dotenv;
use tracing::{error, info};

use cli::{Cli, Commands};
use file_ident::progress::IndicatifReporter;
use file_ident::{AppConfig, FsWorkbench, IdentifyEngine};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match file_ident::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Identify) => {
            if let Err(err) = run_identify(&config) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::TagMime) => {
            if let Err(err) = run_tag_mime(&config) {
                error!("Error: {}", err);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_identify(config: &AppConfig) -> anyhow::Result<()> {
    let workbench = FsWorkbench::new(&config.selection_root, &config.report_dir);
    let engine = IdentifyEngine::new(&config.classifier);
    let reporter = IndicatifReporter::new();

    let result = engine.run(&workbench, &reporter)?;

    println!();
    info!(
        "Agent: {} {}",
        result.agent_version.cyan(),
        format!("({:.2}s)", result.walk_duration.as_secs_f64()).green(),
    );
    info!(
        "{} files visited, {} classified, {} skipped",
        format!("{}", result.files_visited).cyan(),
        format!("{}", result.classified).green(),
        format!("{}", result.skipped).red(),
    );
    if result.report_written {
        info!(
            "Report written to {}/{}",
            config.report_dir,
            result.report_file_name.green()
        );
    } else {
        error!("Report {} was not written", result.report_file_name);
    }

    Ok(())
}

fn run_tag_mime(config: &AppConfig) -> anyhow::Result<()> {
    let workbench = FsWorkbench::new(&config.selection_root, &config.report_dir);
    let engine = IdentifyEngine::new(&config.classifier);
    let reporter = IndicatifReporter::new();

    let result = engine.tag_mime(&workbench, &reporter)?;

    println!();
    info!(
        "{} files visited, {} tagged, {} skipped in {}",
        format!("{}", result.files_visited).cyan(),
        format!("{}", result.tagged).green(),
        format!("{}", result.skipped).red(),
        format!("{:.2}s", result.walk_duration.as_secs_f64()).green(),
    );

    Ok(())
}
