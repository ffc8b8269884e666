//! CLI entry point for the account policy exercise suite.

use std::path::{Path, PathBuf};

use clap::{Arg, Command};
use colored::Colorize;

use authz_exercises::{HarnessConfig, Runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn,authz_exercises=info")
        .with_target(false)
        .init();

    let matches = Command::new("authz-exercises")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Exercises a role/amount-based account policy over HTTP")
        .arg(
            Arg::new("target")
                .short('t')
                .long("target")
                .value_name("URL")
                .help("Base URL of the service under test"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("report")
                .short('o')
                .long("report")
                .value_name("FILE")
                .help("Write a JSON run report to this path"),
        )
        .subcommand(Command::new("list").about("List scenario names and descriptions"))
        .subcommand(
            Command::new("test")
                .about("Run the first scenario whose name contains the query")
                .arg(Arg::new("query").value_name("SUBSTRING").required(true)),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => HarnessConfig::load(Path::new(path))?,
        None => HarnessConfig::default(),
    };
    if let Some(target) = matches.get_one::<String>("target") {
        config.base_url = target.clone();
    }
    if let Some(report) = matches.get_one::<String>("report") {
        config.report_file = Some(PathBuf::from(report));
    }

    println!("{}", "🏦 ACCOUNT POLICY EXERCISES".blue().bold());

    let runner = Runner::new(config).await?;

    match matches.subcommand() {
        Some(("list", _)) => runner.list(),
        Some(("test", sub)) => {
            let query = sub.get_one::<String>("query").expect("query is required");
            let _ = runner.run_one(query).await?;
        }
        _ => {
            let summary = runner.run_all().await?;
            if summary.all_passed() {
                println!("{}", "🎉 All scenarios passed.".green().bold());
            } else {
                println!(
                    "{}",
                    format!("⚠️  {} scenario(s) failed; see the run log.", summary.failed)
                        .yellow()
                        .bold()
                );
            }
        }
    }

    Ok(())
}
