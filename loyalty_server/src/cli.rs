use std::{env, env::VarError};

use clap::Parser;

/// Command-line overrides for the server configuration.
///
/// Environment variables take precedence: a flag only fills in a value that the environment left unset.
#[derive(Debug, Clone, Default, Parser)]
#[command(version, about = "Loyalty points backend", long_about = None)]
pub struct CliArgs {
    /// Address to listen on, e.g. 127.0.0.1:8080 [env: RUN_ADDRESS]
    #[arg(short = 'a', long = "address")]
    pub run_address: Option<String>,
    /// Database connection URI, e.g. sqlite://data/loyalty.db [env: DATABASE_URI]
    #[arg(short = 'd', long = "database")]
    pub database_uri: Option<String>,
    /// Base address of the accrual service [env: ACCRUAL_SYSTEM_ADDRESS]
    #[arg(short = 'r', long = "accrual")]
    pub accrual_address: Option<String>,
    /// Pause between order polling cycles, in milliseconds [env: LPG_POLL_INTERVAL_MS]
    #[arg(short = 'i', long = "poll-interval")]
    pub poll_interval_ms: Option<u64>,
    /// Number of concurrent accrual requests [env: LPG_POLL_WORKERS]
    #[arg(short = 'w', long = "workers")]
    pub poll_workers: Option<usize>,
    /// Print the current (non-secret) configuration environment and exit
    #[arg(long)]
    pub show_env: bool,
}

/// Parses the command line. Returns `None` if the process should exit straight away.
pub fn handle_command_line_args() -> Option<CliArgs> {
    let args = CliArgs::parse();
    if args.show_env {
        display_envs();
        return None;
    }
    Some(args)
}

fn display_envs() {
    // Be explicit about which envars to print, so as to avoid accidentally exposing secrets
    const DISPLAY_ENVS: [&str; 9] = [
        "RUST_LOG",
        "RUN_ADDRESS",
        "DATABASE_URI",
        "ACCRUAL_SYSTEM_ADDRESS",
        "LPG_POLL_INTERVAL_MS",
        "LPG_POLL_WORKERS",
        "LPG_ACCRUAL_TIMEOUT_SECS",
        "LPG_TOKEN_LIFETIME_HOURS",
        "LPG_AUTO_MIGRATE",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
