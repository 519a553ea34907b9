use anyhow::Result;
use clap::{Parser, Subcommand};

use spendwatch::cli::{
    handle_budget_command, handle_device_command, handle_transaction_command, BudgetCommands,
    DeviceCommands, TransactionCommands,
};
use spendwatch::clock::SystemClock;
use spendwatch::config::{paths::SpendwatchPaths, settings::Settings};
use spendwatch::gateway::ConsoleGateway;
use spendwatch::services::{BudgetMonitor, NotificationDispatcher};
use spendwatch::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendwatch",
    version,
    about = "Budget threshold monitoring and push alert fan-out",
    long_about = "spendwatch watches spending against user-defined budget limits. \
                  Recording a transaction triggers evaluation of every applicable \
                  budget and fans alerts out to the user's registered devices."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Device registration commands
    #[command(subcommand)]
    Device(DeviceCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Evaluate budgets for a user and category
    Evaluate {
        /// User ID
        user: String,
        /// Category ID
        category: String,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let paths = SpendwatchPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    match cli.command {
        Commands::Device(cmd) => {
            handle_device_command(&storage, cmd)?;
        }
        Commands::Budget(cmd) => {
            handle_budget_command(&storage, cmd)?;
        }
        Commands::Transaction(cmd) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Commands::Evaluate { user, category } => {
            let user = user.parse()?;
            let category = category.parse()?;

            let gateway = ConsoleGateway;
            let clock = SystemClock;
            let dispatcher = NotificationDispatcher::new(&gateway, &storage.devices, &settings);
            let monitor = BudgetMonitor::new(
                &storage.budgets,
                &storage.transactions,
                dispatcher,
                &clock,
            );

            let statuses = monitor.evaluate_budgets(user, category)?;
            if statuses.is_empty() {
                println!("No applicable budgets for {}", user);
            } else {
                for status in statuses {
                    println!("{}  {}", status.budget_id, status);
                }
            }
        }
        Commands::Config => {
            println!("Base directory: {}", storage.paths().base_dir().display());
            println!("Budgets:        {}", storage.paths().budgets_file().display());
            println!(
                "Transactions:   {}",
                storage.paths().transactions_file().display()
            );
            println!("Devices:        {}", storage.paths().devices_file().display());
            println!("Currency:       {}", settings.currency_symbol);
        }
    }

    Ok(())
}
