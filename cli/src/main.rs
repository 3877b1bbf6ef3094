use clap::{Parser, Subcommand};
use chrono::DateTime;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use std::path::PathBuf;

use keepnet_config::{RewardsConfig, TOKEN_UNIT};

/// Keepnet Rewards CLI
#[derive(Parser)]
#[command(name = "keepnet", version, about = "Keepnet rewards command-line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new Ed25519 operator keypair
    Keygen {
        /// Output file for the secret key
        #[arg(short, long, default_value = "operator.key")]
        output: PathBuf,
    },

    /// Rewards configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Release schedule inspection
    Schedule {
        #[command(subcommand)]
        command: ScheduleCommands,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the reference mainnet rewards configuration
    Init {
        /// Deployment identifier to record in the file
        #[arg(long, default_value = "keepnet-mainnet")]
        network: String,

        /// Output path for the config JSON file
        #[arg(long, default_value = "rewards.json")]
        output: PathBuf,
    },

    /// Validate an existing rewards configuration file
    Validate {
        /// Path to the config file
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Subcommand)]
enum ScheduleCommands {
    /// Project per-interval releases for a fully subscribed schedule
    Show {
        /// Path to the config file
        #[arg(long)]
        config: PathBuf,
    },

    /// Resolve a timestamp to its interval and boundaries
    IntervalOf {
        /// Path to the config file
        #[arg(long)]
        config: PathBuf,

        /// Timestamp in unix seconds
        #[arg(long)]
        timestamp: u64,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { output } => cmd_keygen(output),
        Commands::Config { command } => match command {
            ConfigCommands::Init { network, output } => cmd_config_init(&network, output),
            ConfigCommands::Validate { config } => cmd_config_validate(config),
        },
        Commands::Schedule { command } => match command {
            ScheduleCommands::Show { config } => cmd_schedule_show(config),
            ScheduleCommands::IntervalOf { config, timestamp } => {
                cmd_interval_of(config, timestamp)
            }
        },
        Commands::Version => cmd_version(),
    }
}

fn cmd_keygen(output: PathBuf) {
    let signing_key = SigningKey::generate(&mut OsRng);
    let verifying_key = signing_key.verifying_key();
    let pubkey_hex = hex::encode(verifying_key.as_bytes());
    let secret_hex = hex::encode(signing_key.to_bytes());

    std::fs::write(&output, &secret_hex).unwrap_or_else(|e| {
        eprintln!("Error writing key file: {e}");
        std::process::exit(1);
    });

    println!("Generated new Ed25519 operator keypair");
    println!("  Public key: {pubkey_hex}");
    println!("  Secret key saved to: {}", output.display());
}

fn cmd_config_init(network: &str, output: PathBuf) {
    let mut config = RewardsConfig::default_mainnet();
    config.network = network.to_string();
    config.config_hash = config.compute_config_hash();

    config.to_file(&output).unwrap_or_else(|e| {
        eprintln!("Error writing config file: {e}");
        std::process::exit(1);
    });

    println!("Rewards config created: {}", output.display());
    println!("  Network: {}", config.network);
    println!("  Intervals: {}", config.interval_count());
    println!(
        "  Total rewards: {} tokens",
        config.total_rewards / TOKEN_UNIT
    );
    println!("  Config hash: {}", hex::encode(config.config_hash));
}

fn cmd_config_validate(path: PathBuf) {
    let config = load_config(&path);

    config.validate().unwrap_or_else(|e| {
        eprintln!("Config validation failed: {e}");
        std::process::exit(1);
    });

    println!("Config is valid: {}", path.display());
    println!("  Network: {}", config.network);
    println!("  First interval start: {}", config.first_interval_start);
    println!(
        "  Interval duration: {} days",
        config.interval_duration_secs / 86_400
    );
    println!("  Intervals: {}", config.interval_count());
    println!("  Minimum keep count: {}", config.minimum_keep_count);
    println!("  Config hash: {}", hex::encode(config.config_hash));
}

fn cmd_schedule_show(path: PathBuf) {
    let config = load_config(&path);
    let calendar = build_or_exit(config.build_calendar());
    let curve = build_or_exit(config.build_curve());

    println!("Projected release schedule ({} tokens funded)", config.total_rewards / TOKEN_UNIT);
    println!("{:<10} {:<12} {:>8} {:>20}", "interval", "start", "weight", "released (tokens)");

    let mut remaining = config.total_rewards;
    for interval in 0..calendar.interval_count() {
        let start = calendar
            .start_of(interval)
            .expect("interval index is in bounds");
        let released = curve
            .allocation_for(interval, remaining)
            .expect("curve covers every calendar interval");
        remaining -= released;

        let date = DateTime::from_timestamp(start as i64, 0)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| start.to_string());
        let weight = curve.weight_bps(interval).expect("index in bounds");

        println!(
            "{:<10} {:<12} {:>7.2}% {:>20}",
            interval,
            date,
            weight as f64 / 100.0,
            released / TOKEN_UNIT
        );
    }
    println!("Residual after final interval: {} tokens", remaining / TOKEN_UNIT);
}

fn cmd_interval_of(path: PathBuf, timestamp: u64) {
    let config = load_config(&path);
    let calendar = build_or_exit(config.build_calendar());

    let interval = calendar.interval_of(timestamp).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    println!("Timestamp {timestamp} falls in interval {interval}");
    if interval < calendar.interval_count() {
        let start = calendar.start_of(interval).expect("index in bounds");
        let end = calendar.end_of(interval).expect("index in bounds");
        println!("  Start: {start}");
        println!("  End:   {end}");
    } else {
        println!("  Past the end of the schedule; never allocatable");
    }
}

fn cmd_version() {
    println!("keepnet {} (Keepnet rewards CLI)", env!("CARGO_PKG_VERSION"));
}

fn load_config(path: &PathBuf) -> RewardsConfig {
    RewardsConfig::from_file(path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {e}");
        std::process::exit(1);
    })
}

fn build_or_exit<T>(result: Result<T, keepnet_config::ConfigError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Invalid config: {e}");
        std::process::exit(1);
    })
}
