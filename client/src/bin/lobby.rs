//! Command-line lobby harness: exercises the wallet and wager
//! controllers against a running ledger authority (see
//! `royale-simulator` for a local one).

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use royale_client::{LedgerClient, SessionStore, WagerController, WalletController};
use royale_types::{Color, Game, Outcome};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Ledger authority endpoint.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    endpoint: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the current balance.
    Balance,
    /// Deposit an amount.
    Deposit { amount: u64 },
    /// Withdraw an amount to a recipient.
    Withdraw { amount: u64, recipient: String },
    /// Spin the slot reels.
    Slots { bet: u64 },
    /// Bet on a roulette color (red, black or green).
    Roulette { bet: u64, choice: String },
    /// Show recent transactions.
    History,
}

fn parse_color(value: &str) -> Result<Color> {
    match value {
        "red" => Ok(Color::Red),
        "black" => Ok(Color::Black),
        "green" => Ok(Color::Green),
        other => bail!("unknown color {other:?} (expected red, black or green)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let args = Args::parse();
    let ledger = LedgerClient::new(&args.endpoint)?;
    let session = Arc::new(SessionStore::new());
    let wallet = WalletController::new(session.clone(), ledger.clone());
    let wager = WagerController::new(session.clone(), ledger.clone());

    match args.command {
        Command::Balance => {
            let balance = wallet.refresh_balance().await?;
            println!("balance: {balance}");
        }
        Command::Deposit { amount } => {
            let balance = wallet.deposit(amount).await?;
            println!("deposited {amount}, balance: {balance}");
        }
        Command::Withdraw { amount, recipient } => {
            wallet.refresh_balance().await?;
            let balance = wallet.withdraw(amount, &recipient).await?;
            println!("withdrew {amount} to {recipient}, balance: {balance}");
        }
        Command::Slots { bet } => {
            wallet.refresh_balance().await?;
            let result = wager.place_wager(Game::Slots, bet, None).await?;
            if let Outcome::Reels { reels } = &result.result {
                println!("reels: {}", reels.join(" "));
            }
            report(result.win, result.balance);
        }
        Command::Roulette { bet, choice } => {
            let choice = parse_color(&choice)?;
            wallet.refresh_balance().await?;
            let result = wager.place_wager(Game::Roulette, bet, Some(choice)).await?;
            if let Outcome::Spin { number, color } = &result.result {
                println!("landed on {number} ({color})");
            }
            report(result.win, result.balance);
        }
        Command::History => {
            for record in ledger.history().await? {
                println!(
                    "{} {} {} ({})",
                    record.created_at, record.kind, record.amount, record.description
                );
            }
        }
    }
    Ok(())
}

fn report(win: u64, balance: u64) {
    if win > 0 {
        println!("won {win}! balance: {balance}");
    } else {
        println!("no win, balance: {balance}");
    }
}
