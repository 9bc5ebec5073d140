use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use route_tree::routing::{plan, MountedRoute, SkippedModule};
use route_tree::{DirectoryRouter, RouterConfig, StandardLoader};

#[derive(Parser)]
#[command(name = "route-tree-cli")]
#[command(about = "Inspect the routes a directory would mount", long_about = None)]
struct Cli {
    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive prefixes for every candidate without loading modules
    Plan {
        dir: PathBuf,
        /// Visit entries in name order
        #[arg(long)]
        sorted: bool,
    },
    /// Load every module and report what mounts where
    Check {
        dir: PathBuf,
        /// Visit entries in name order
        #[arg(long)]
        sorted: bool,
        /// Log every mount and skip
        #[arg(long)]
        debug: bool,
    },
}

#[derive(Serialize)]
struct Report {
    routes: Vec<MountedRoute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<SkippedModule>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan { dir, sorted } => {
            plan(&RouterConfig::new(dir).with_sorted_entries(sorted))
                .map(|routes| Report {
                    routes,
                    skipped: Vec::new(),
                })
                .map_err(|e| e.to_string())
        }
        Commands::Check { dir, sorted, debug } => {
            if debug {
                tracing_subscriber::fmt().init();
            }
            let config = RouterConfig::new(dir)
                .with_sorted_entries(sorted)
                .with_debug(debug);
            DirectoryRouter::new(config, &StandardLoader::declarative_only())
                .map(|router| Report {
                    routes: router.routes().to_vec(),
                    skipped: router.skipped().to_vec(),
                })
                .map_err(|e| e.to_string())
        }
    };

    match result {
        Ok(report) => match print_report(&report, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &Report, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let width = report.routes.iter().map(|r| r.prefix.len()).max().unwrap_or(0);
    for route in &report.routes {
        println!("{:<width$}  {}", route.prefix, route.source.display(), width = width);
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped:");
        for module in &report.skipped {
            println!("  {}  ({})", module.source.display(), module.reason);
        }
    }
    Ok(())
}
