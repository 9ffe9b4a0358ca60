use clap::{Parser, Subcommand};
use eyre::Result;
use foreman_core::{
    ops::{
        add_pool::add_pool,
        batch_execute::execute_batch,
        deploy::deploy_contract,
        ownership::transfer_to_timelock,
        price_feeds::set_price_sources,
        upgrade::queue_upgrade,
        whitelist_workers::{WorkerFactors, whitelist_workers},
    },
    timelock::queue::{QueueRequest, execute_from_args, queue_transaction},
    types::{
        network_config::NetworkConfig, settings::Settings,
        timelock_transaction::TimelockTransaction,
    },
    utils::{
        artifact::{read_artifact, write_artifact},
        signer::connect,
    },
};
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network name from config.toml
    #[arg(long = "network", short = 'n', global = true, default_value = "mainnet")]
    network: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue a governance-delayed call through the timelock
    Queue {
        /// Human-readable description stored with the transaction
        #[arg(long = "description", short = 'd')]
        description: String,

        /// Target contract address
        #[arg(long = "target", short = 't')]
        target: String,

        /// Call value in wei
        #[arg(long = "value", default_value = "0")]
        value: String,

        /// Solidity function signature, e.g. 'setMaxKillBps(uint256)'
        #[arg(long = "signature", short = 's')]
        signature: String,

        /// ABI type of each parameter, repeated in order
        #[arg(long = "type")]
        param_types: Vec<String>,

        /// Parameter values as a JSON array
        #[arg(long = "params", default_value = "[]")]
        params: String,

        /// Execution-eligible timestamp (unix seconds)
        #[arg(long = "eta")]
        eta: u64,
    },
    /// Execute a queued transaction once its eta has passed
    Execute {
        /// Target contract address
        #[arg(long = "target", short = 't')]
        target: String,

        /// Call value in wei
        #[arg(long = "value", default_value = "0")]
        value: String,

        /// Solidity function signature used when queueing
        #[arg(long = "signature", short = 's')]
        signature: String,

        /// ABI-encoded parameter bytes as hex
        #[arg(long = "data")]
        data: String,

        /// Eta the transaction was queued with
        #[arg(long = "eta")]
        eta: u64,
    },
    /// Replay every transaction in a queued artifact
    ExecuteBatch {
        /// Path to a previously written artifact
        #[arg(long = "artifact", short = 'a')]
        artifact_path: String,
    },
    /// Queue worker whitelisting on a vault
    WhitelistWorkers {
        /// Vault symbol from the network config
        #[arg(long = "vault", short = 'v')]
        vault: String,

        /// Worker name from the network config, repeated
        #[arg(long = "worker", short = 'w')]
        workers: Vec<String>,

        /// Whether the workers may take on debt
        #[arg(long = "accept-debt", default_value_t = true, action = clap::ArgAction::Set)]
        accept_debt: bool,

        /// Work factor in basis points
        #[arg(long = "work-factor")]
        work_factor: u64,

        /// Kill factor in basis points
        #[arg(long = "kill-factor")]
        kill_factor: u64,

        /// Maximum tolerated price difference in basis points
        #[arg(long = "max-price-diff")]
        max_price_diff: u64,

        /// Execution-eligible timestamp (unix seconds)
        #[arg(long = "eta")]
        eta: u64,
    },
    /// Queue a new fair-launch staking pool
    AddPool {
        /// Staking token symbol from the network config
        #[arg(long = "stake-token", short = 't')]
        stake_token: String,

        /// Allocation points for the new pool
        #[arg(long = "alloc-point")]
        alloc_point: u64,

        /// Execution-eligible timestamp (unix seconds)
        #[arg(long = "eta")]
        eta: u64,
    },
    /// Queue a proxy implementation upgrade
    QueueUpgrade {
        /// Proxy address to upgrade
        #[arg(long = "proxy", short = 'p')]
        proxy: String,

        /// New implementation address
        #[arg(long = "implementation", short = 'i')]
        implementation: String,

        /// Human-readable description stored with the transaction
        #[arg(long = "description", short = 'd')]
        description: String,

        /// Execution-eligible timestamp (unix seconds)
        #[arg(long = "eta")]
        eta: u64,
    },
    /// Point the oracle medianizer at new primary price sources
    SetPriceSources {
        /// First token symbol from the network config
        #[arg(long = "token0")]
        token0: String,

        /// Second token symbol from the network config
        #[arg(long = "token1")]
        token1: String,

        /// Maximum allowed deviation between sources, 1e18-scaled
        #[arg(long = "max-deviation")]
        max_deviation: String,

        /// Price source address, repeated in order
        #[arg(long = "source")]
        sources: Vec<String>,
    },
    /// Hand contract ownership to the timelock
    TransferOwnership {
        /// Contract address, repeated
        #[arg(long = "contract", short = 'c')]
        contracts: Vec<String>,
    },
    /// Deploy a contract from creation bytecode
    Deploy {
        /// Name used in logs and summaries
        #[arg(long = "name")]
        name: String,

        /// Path to a hex file holding the creation bytecode
        #[arg(long = "bytecode", short = 'b')]
        bytecode: String,

        /// ABI type of each constructor argument, repeated in order
        #[arg(long = "type")]
        constructor_types: Vec<String>,

        /// Constructor values as a JSON array
        #[arg(long = "params", default_value = "[]")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = Settings::from_file(None)?;
    let config = NetworkConfig::load(&settings, &cli.network)?;
    let rpc_url = settings.rpc_url(&cli.network)?;
    let (provider, sender) = connect(&rpc_url).await?;
    let artifact_dir = settings.artifact_dir();

    match &cli.command {
        Commands::Queue {
            description,
            target,
            value,
            signature,
            param_types,
            params,
            eta,
        } => {
            let request = QueueRequest::from_args(
                description,
                target,
                value,
                signature,
                param_types.clone(),
                params,
                *eta,
            )?;
            let transaction = queue_transaction(provider, config.timelock, &request, None).await?;
            let path = write_artifact(&artifact_dir, "queue", std::slice::from_ref(&transaction))?;
            print_queued(std::slice::from_ref(&transaction), &path)?;
        }
        Commands::Execute {
            target,
            value,
            signature,
            data,
            eta,
        } => {
            let tx_hash = execute_from_args(
                provider,
                config.timelock,
                target,
                value,
                signature,
                data,
                *eta,
            )
            .await?;
            println!("\n# Executed");
            println!("- Signature: `{}`", signature);
            println!("- Transaction: `{}`", tx_hash);
        }
        Commands::ExecuteBatch { artifact_path } => {
            let transactions: Vec<TimelockTransaction> =
                read_artifact(Path::new(artifact_path))?;
            let total = transactions.len();
            let report = execute_batch(provider, config.timelock, transactions).await;

            println!("\n# Batch Execution");
            println!("- Executed: {}/{}", report.executed.len(), total);
            for transaction in &report.executed {
                println!("  - {}", transaction.description);
            }
            if !report.failed.is_empty() {
                println!("- Failed: {}/{}", report.failed.len(), total);
                for failure in &report.failed {
                    println!("  - {}: {}", failure.transaction.description, failure.error);
                }
                let path = write_artifact(&artifact_dir, "failed", &report.failed)?;
                println!("\nSaved failures to: {}", path.display());
            }
        }
        Commands::WhitelistWorkers {
            vault,
            workers,
            accept_debt,
            work_factor,
            kill_factor,
            max_price_diff,
            eta,
        } => {
            let factors = WorkerFactors {
                accept_debt: *accept_debt,
                work_factor: *work_factor,
                kill_factor: *kill_factor,
                max_price_diff: *max_price_diff,
            };
            let transactions =
                whitelist_workers(provider, sender, &config, vault, workers, &factors, *eta)
                    .await?;
            let path = write_artifact(&artifact_dir, "whitelist_workers", &transactions)?;
            print_queued(&transactions, &path)?;
        }
        Commands::AddPool {
            stake_token,
            alloc_point,
            eta,
        } => {
            let (pool_id, transaction) =
                add_pool(provider, &config, stake_token, *alloc_point, *eta).await?;
            println!("\nUpcoming pool id: {}", pool_id);
            let path = write_artifact(&artifact_dir, "add_pool", std::slice::from_ref(&transaction))?;
            print_queued(std::slice::from_ref(&transaction), &path)?;
        }
        Commands::QueueUpgrade {
            proxy,
            implementation,
            description,
            eta,
        } => {
            let transaction =
                queue_upgrade(provider, &config, proxy, implementation, description, *eta).await?;
            let path = write_artifact(&artifact_dir, "upgrade", std::slice::from_ref(&transaction))?;
            print_queued(std::slice::from_ref(&transaction), &path)?;
        }
        Commands::SetPriceSources {
            token0,
            token1,
            max_deviation,
            sources,
        } => {
            let tx_hash =
                set_price_sources(provider, &config, token0, token1, max_deviation, sources)
                    .await?;
            println!("\n# Price Sources Updated");
            println!("- Pair: {}/{}", token0, token1);
            println!("- Transaction: `{}`", tx_hash);
        }
        Commands::TransferOwnership { contracts } => {
            let transfers = transfer_to_timelock(provider, &config, contracts).await?;
            println!("\n# Ownership Transfers");
            for transfer in &transfers {
                match &transfer.tx_hash {
                    Some(tx_hash) => println!(
                        "- {}: {} -> timelock at `{}`",
                        transfer.contract, transfer.previous_owner, tx_hash
                    ),
                    None => println!("- {}: already owned by the timelock", transfer.contract),
                }
            }
            let path = write_artifact(&artifact_dir, "ownership", &transfers)?;
            println!("\nSaved transfers to: {}", path.display());
        }
        Commands::Deploy {
            name,
            bytecode,
            constructor_types,
            params,
        } => {
            let (address, tx_hash) =
                deploy_contract(provider, name, bytecode, constructor_types, params).await?;
            println!("\n# Deployed {}", name);
            println!("- Address: `{}`", address);
            println!("- Transaction: `{}`", tx_hash);
        }
    }

    Ok(())
}

// Markdown-style summary for queued transactions, pasteable into an ops log.
fn print_queued(transactions: &[TimelockTransaction], artifact_path: &Path) -> Result<()> {
    println!("\n# Queued Transactions");
    for transaction in transactions {
        println!("\n## {}", transaction.description);
        println!("```json");
        println!("{}", serde_json::to_string_pretty(transaction)?);
        println!("```");
        println!("\nExecute with:");
        println!("```");
        println!("{}", transaction.execute_command);
        println!("```");
    }
    println!("\nSaved transactions to: {}", artifact_path.display());
    Ok(())
}
