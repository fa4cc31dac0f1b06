use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;

#[derive(Parser)]
#[command(name = "adledger")]
#[command(
    version,
    about = "Daily ad spend and revenue ledger with tax and profit reports"
)]
#[command(
    long_about = "Record daily advertising spend, other costs and revenue per ad account, see tax, profit and profit rate summaries, and export Excel reports."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ad account management
    Accounts {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Daily record management
    Records {
        #[command(subcommand)]
        action: RecordCommands,
    },

    /// Period totals for an account (dashboard view)
    Summary {
        /// Account id or exact name
        account: String,
    },

    /// Monthly aggregates for an account, most recent month first
    Monthly {
        /// Account id or exact name
        account: String,
    },

    /// Costs, revenue, profit and profit rate of the last 30 records
    Trend {
        /// Account id or exact name
        account: String,
    },

    /// Export the full Excel report for an account
    Export {
        /// Account id or exact name
        account: String,

        /// Output directory (defaults to the configured export.output_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Import accounts.json and transactions.json from the old web app
    ImportLegacy {
        /// Path to accounts.json
        accounts: PathBuf,

        /// Path to transactions.json
        transactions: PathBuf,
    },

    /// Show the sheets and cells of an exported workbook
    Inspect {
        /// Path to the .xlsx file
        file: PathBuf,

        /// Print every non-empty cell
        #[arg(long)]
        full: bool,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create an ad account
    Add {
        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all accounts
    List,
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Add a daily record. Amounts use Indonesian notation (1.500.000,50)
    Add {
        /// Account id or exact name
        account: String,

        /// Record date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long)]
        ad_spend: String,

        #[arg(long)]
        revenue: String,

        #[arg(long)]
        other_costs: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List an account's records, most recent first
    List {
        /// Account id or exact name
        account: String,
    },

    /// Change fields of an existing record
    Update {
        id: i64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        ad_spend: Option<String>,

        #[arg(long)]
        revenue: Option<String>,

        #[arg(long)]
        other_costs: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a record
    Delete { id: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_record_add() {
        let cli = Cli::try_parse_from([
            "adledger",
            "--json",
            "records",
            "add",
            "Toko Batik",
            "--date",
            "2024-01-05",
            "--ad-spend",
            "1.000.000",
            "--revenue",
            "1.500.000",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Records {
                action:
                    RecordCommands::Add {
                        account,
                        ad_spend,
                        other_costs,
                        ..
                    },
            } => {
                assert_eq!(account, "Toko Batik");
                assert_eq!(ad_spend, "1.000.000");
                assert!(other_costs.is_none());
            }
            _ => panic!("expected records add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["adledger", "summary", "1", "--no-color"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(cli.command, Commands::Summary { .. }));
    }
}
