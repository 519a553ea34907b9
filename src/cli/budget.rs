//! Budget CLI commands
//!
//! Creating, listing and deleting spending limits.

use clap::Subcommand;

use crate::cli::{parse_amount, parse_category, parse_period, parse_user};
use crate::error::{SpendwatchError, SpendwatchResult};
use crate::models::Budget;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a budget
    Set {
        /// User ID
        user: String,
        /// Spending limit in minor currency units (e.g. "1,000,000")
        limit: String,
        /// Recurrence: weekly or monthly
        #[arg(short, long, default_value = "monthly")]
        period: String,
        /// Category ID; omit for a global (all-categories) limit
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List a user's budgets
    List {
        /// User ID
        user: String,
    },

    /// Delete a budget
    Delete {
        /// Budget ID
        id: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> SpendwatchResult<()> {
    match cmd {
        BudgetCommands::Set {
            user,
            limit,
            period,
            category,
        } => {
            let user = parse_user(&user)?;
            let limit = parse_amount(&limit)?;
            let period = parse_period(&period)?;
            let category = category.as_deref().map(parse_category).transpose()?;

            let budget = Budget::new(user, category, limit, period);
            budget
                .validate()
                .map_err(|e| SpendwatchError::Validation(e.to_string()))?;

            storage.budgets.upsert(budget.clone())?;
            storage.budgets.save()?;

            println!("Created budget {} ({})", budget.id.as_uuid(), budget);
        }
        BudgetCommands::List { user } => {
            let user = parse_user(&user)?;
            let budgets = storage.budgets.get_for_user(user)?;
            if budgets.is_empty() {
                println!("No budgets for {}", user);
            } else {
                for budget in budgets {
                    println!("{}  {}", budget.id.as_uuid(), budget);
                }
            }
        }
        BudgetCommands::Delete { id } => {
            let id = id
                .parse()
                .map_err(|e| SpendwatchError::Validation(format!("Invalid budget ID: {}", e)))?;
            if storage.budgets.delete(id)? {
                storage.budgets.save()?;
                println!("Deleted budget");
            } else {
                return Err(SpendwatchError::budget_not_found(id.to_string()));
            }
        }
    }

    Ok(())
}
