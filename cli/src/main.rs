mod config;
mod launcher;
mod ui;

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};
use engine::{Method, Protocol, TimeoutPreset};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = ui::app_name())]
#[command(about = ui::build_banner())]
struct Cli {
    /// Path to config.toml file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List protocols and the methods they support
    Protocols,

    /// List built-in and configured test cases
    Cases,

    /// List chains available for PaymentID resolution
    Chains,

    /// Show version
    Version,

    /// Run one resolution through the main dispatcher
    Run(RunArgs),

    /// Resolve a PaymentID identifier
    PaymentId(PaymentIdArgs),

    /// Run a main resolution and a PaymentID lookup at the same time
    RunAll(RunAllArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Test case key
    #[arg(long, default_value = "evm")]
    pub case: String,

    /// Protocol override (EVM, Solana, Sei, Injective, PaymentID)
    #[arg(long)]
    pub protocol: Option<Protocol>,

    /// Method, e.g. getAddress or batchGetDomainNameByChainId
    #[arg(long)]
    pub method: Option<Method>,

    /// Timeout preset (veryShort, normal, long, invalid) or milliseconds
    #[arg(long, allow_hyphen_values = true, value_parser = parse_timeout)]
    pub timeout: Option<i64>,

    /// Domain override, the case default is used when empty
    #[arg(long)]
    pub domain: Option<String>,

    /// Address override, the case default is used when empty
    #[arg(long)]
    pub address: Option<String>,

    /// Chain id for batch reverse lookups and PaymentID
    #[arg(long, allow_hyphen_values = true)]
    pub chain_id: Option<String>,

    /// RPC endpoint override for EVM lookups
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PaymentIdArgs {
    /// PaymentID identifier in user@provider form
    #[arg(long, default_value = "jerry@binance")]
    pub domain: String,

    /// Target chain id (see `chains`)
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub chain: i64,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RunAllArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// PaymentID identifier in user@provider form
    #[arg(long, default_value = "jerry@binance")]
    pub payment_domain: String,

    /// PaymentID target chain id
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub payment_chain: i64,
}

fn parse_timeout(value: &str) -> Result<i64, String> {
    TimeoutPreset::from_str(value)
        .map(TimeoutPreset::millis)
        .or_else(|_| value.parse::<i64>())
        .map_err(|_| format!("{value:?} is neither a timeout preset nor a number of milliseconds"))
}

#[tools::main(app = "w3n-harness")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.commands {
        Commands::Version => ui::print_version(),
        Commands::Protocols => ui::print_protocols(&engine::PROTOCOL_REGISTRY),
        Commands::Chains => ui::print_chains(),
        Commands::Cases => launcher::cases(&cli.config),
        Commands::Run(args) => launcher::run(&cli.config, args).await?,
        Commands::PaymentId(args) => launcher::payment_id(&cli.config, args).await?,
        Commands::RunAll(args) => launcher::run_all(&cli.config, args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("veryShort"), Ok(100));
        assert_eq!(parse_timeout("long"), Ok(15_000));
        assert_eq!(parse_timeout("invalid"), Ok(-1));
        assert_eq!(parse_timeout("-5"), Ok(-5));
        assert_eq!(parse_timeout("250"), Ok(250));
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::try_parse_from([
            "w3n-harness",
            "run",
            "--case",
            "solana",
            "--method",
            "getDomainName",
            "--timeout",
            "-1",
        ])
        .unwrap();

        let Commands::Run(args) = cli.commands else {
            panic!("expected run command");
        };
        assert_eq!(args.case, "solana");
        assert_eq!(args.method, Some(Method::GetDomainName));
        assert_eq!(args.timeout, Some(-1));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_parse_payment_id_defaults() {
        let cli = Cli::try_parse_from(["w3n-harness", "payment-id", "--chain", "0"]).unwrap();
        let Commands::PaymentId(args) = cli.commands else {
            panic!("expected payment-id command");
        };
        assert_eq!(args.domain, "jerry@binance");
        assert_eq!(args.chain, 0);
    }
}
