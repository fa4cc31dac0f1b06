use anyhow::Result;
use colored::Colorize;

use crate::cli::formatters::{format_accounts_table, to_json};
use crate::cli::AccountCommands;
use crate::config::Config;
use crate::db::{Account, RecordStore};

pub async fn dispatch_accounts(
    action: AccountCommands,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    match action {
        AccountCommands::Add { name, description } => {
            dispatch_account_add(&name, description, config, json_output).await
        }
        AccountCommands::List => dispatch_accounts_list(config, json_output).await,
    }
}

async fn dispatch_account_add(
    name: &str,
    description: Option<String>,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow::anyhow!("Account name cannot be empty"));
    }

    tracing::info!("Adding account {}", name);

    let store = super::open_store(config)?;
    let mut account = Account::new(name, description.filter(|d| !d.trim().is_empty()));
    account.id = Some(store.add_account(&account)?);

    if json_output {
        println!("{}", to_json(&account));
        return Ok(());
    }

    println!("\n{} Account added successfully!", "✓".green().bold());
    println!("  Account ID: {}", account.id.unwrap_or_default());
    println!("  Name:       {}", account.name.cyan().bold());
    if let Some(d) = &account.description {
        println!("  Notes:      {}", d);
    }
    println!();

    Ok(())
}

async fn dispatch_accounts_list(config: &Config, json_output: bool) -> Result<()> {
    let store = super::open_store(config)?;
    let accounts = store.list_accounts()?;

    if json_output {
        println!("{}", to_json(&accounts));
    } else {
        print!("{}", format_accounts_table(&accounts));
    }
    Ok(())
}
