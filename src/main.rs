use clap::Parser;
use scorecard::error::ScorecardError;
use scorecard::{cli, config, dataset, server};
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const CONFIG_FAILURE: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scorecard={default_level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<i32, ScorecardError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Serve(cmd) => {
            let mut app_config = config::load(cmd.config.as_deref())?;
            if let Some(port) = cmd.port {
                app_config.port = port;
            }
            config::validate(&app_config)?;
            let state = server::AppState::new(app_config)?;
            server::serve(state).await?;
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Check(cmd) => {
            let app_config = config::load(cmd.config.as_deref())?;
            config::validate(&app_config)?;
            let dataset = dataset::Dataset::built_in()?;
            dataset.validate()?;
            println!(
                "check: configuration and dataset OK ({} companies, {} categories)",
                dataset.companies.len(),
                dataset.categories.len()
            );
            Ok(exit_code::SUCCESS)
        }
    }
}

fn failure_code(err: &ScorecardError) -> i32 {
    match err {
        ScorecardError::MisconfiguredSecret(_)
        | ScorecardError::ConfigParse(_)
        | ScorecardError::InvalidDataset(_)
        | ScorecardError::Toml(_) => exit_code::CONFIG_FAILURE,
        _ => exit_code::RUNTIME_FAILURE,
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(failure_code(&e));
        }
    }
}
