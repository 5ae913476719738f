use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use common::config::Settings;
use report::models::Category;
use std::process;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let mut serve = Command::new("serve")
        .about("Serve the channel summary report over HTTP")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file"),
        )
        .arg(
            Arg::new("channel_type")
                .long("channel-type")
                .value_name("TYPE")
                .help("Channel type to process (hero|kol|seller|all)"),
        );

    for category in Category::ALL {
        serve = serve.arg(
            Arg::new(category.as_str())
                .long(category.as_str())
                .value_name("PATH")
                .help(format!("File path for {} channels", category)),
        );
    }

    Command::new("Channel Report Server")
        .version("1.0")
        .about("Aggregates per-channel engagement metrics into a summary report")
        .subcommand(serve)
}

fn load_settings(matches: &ArgMatches) -> Result<Settings> {
    let config_path = matches
        .get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or("config/report.toml");

    let mut settings = Settings::new(config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    if let Some(channel_type) = matches.get_one::<String>("channel_type") {
        settings = settings.with_channel_type(channel_type);
    }
    for category in Category::ALL {
        if let Some(path) = matches.get_one::<String>(category.as_str()) {
            settings = settings.with_source(category.as_str(), path);
        }
    }

    Ok(settings)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("APP_LOG_FORMAT").is_ok_and(|format| format == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("serve", serve_matches)) => {
            let settings = match load_settings(serve_matches) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::error!("{:#}", e);
                    process::exit(1);
                }
            };

            if let Err(e) = report::run_report_server(settings).await {
                tracing::error!("Report server error: {}", e);
                process::exit(1);
            }
        }
        _ => {
            eprintln!("No subcommand specified. Use --help for usage information.");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_flags_override_file() {
        let matches = cli().get_matches_from([
            "report-cli",
            "serve",
            "--config",
            "does/not/exist",
            "--channel-type",
            "kol",
            "--kol",
            "/tmp/kol.txt",
        ]);
        let (_, serve) = matches.subcommand().unwrap();

        let settings = load_settings(serve).unwrap();

        assert_eq!(settings.report.channel_type, "kol");
        assert_eq!(
            settings.report.sources.get("kol").map(String::as_str),
            Some("/tmp/kol.txt")
        );
        assert_eq!(settings.report.sources.get("hero").map(String::as_str), Some("hero"));
    }
}
