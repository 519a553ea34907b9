//! Transaction CLI commands
//!
//! Recording a transaction doubles as the pipeline trigger: after the write
//! is saved, budget evaluation runs for the affected category.

use chrono::{Local, NaiveDate, NaiveTime};
use clap::Subcommand;

use crate::cli::{parse_amount, parse_category, parse_user};
use crate::clock::SystemClock;
use crate::config::Settings;
use crate::error::{SpendwatchError, SpendwatchResult};
use crate::gateway::ConsoleGateway;
use crate::models::{Transaction, TransactionKind};
use crate::services::{BudgetMonitor, NotificationDispatcher};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a transaction and evaluate the affected budgets
    Add {
        /// User ID
        user: String,
        /// Category ID
        category: String,
        /// Amount in minor currency units (non-negative)
        amount: String,
        /// Kind: expense or income
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Occurrence date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// List a user's transactions
    List {
        /// User ID
        user: String,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> SpendwatchResult<()> {
    match cmd {
        TransactionCommands::Add {
            user,
            category,
            amount,
            kind,
            date,
            note,
        } => {
            let user = parse_user(&user)?;
            let category = parse_category(&category)?;
            let amount = parse_amount(&amount)?;
            let kind = match kind.trim().to_ascii_lowercase().as_str() {
                "expense" => TransactionKind::Expense,
                "income" => TransactionKind::Income,
                other => {
                    return Err(SpendwatchError::Validation(format!(
                        "Unknown kind '{}' (expected expense or income)",
                        other
                    )))
                }
            };
            let occurred_at = match date {
                Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|e| SpendwatchError::Validation(format!("Invalid date: {}", e)))?
                    .and_time(NaiveTime::MIN),
                None => Local::now().naive_local(),
            };

            let mut txn = Transaction::new(user, category, kind, amount, occurred_at);
            if let Some(note) = note {
                txn.note = note;
            }
            txn.validate()
                .map_err(|e| SpendwatchError::Validation(e.to_string()))?;

            storage.transactions.upsert(txn.clone())?;
            storage.transactions.save()?;
            println!("Recorded {} of {} ({})", txn.kind, txn.amount, txn.id);

            // The write has committed; alerting runs fire-and-forget
            let gateway = ConsoleGateway;
            let clock = SystemClock;
            let dispatcher = NotificationDispatcher::new(&gateway, &storage.devices, settings);
            let monitor = BudgetMonitor::new(
                &storage.budgets,
                &storage.transactions,
                dispatcher,
                &clock,
            );
            monitor.on_transaction_written(user, category);
        }
        TransactionCommands::List { user, limit } => {
            let user = parse_user(&user)?;
            let transactions = storage.transactions.get_by_user(user)?;
            if transactions.is_empty() {
                println!("No transactions for {}", user);
            } else {
                for txn in transactions.iter().take(limit) {
                    println!(
                        "{}  {}  {}  {}",
                        txn.occurred_at.format("%Y-%m-%d"),
                        txn.kind,
                        txn.amount,
                        txn.note
                    );
                }
            }
        }
    }

    Ok(())
}
