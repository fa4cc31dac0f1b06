//! adledger - daily ad spend and revenue ledger
//!
//! Tracks advertising spend, other costs and revenue per ad account,
//! derives tax, profit and profit rate, aggregates them by period and month,
//! and exports multi-sheet Excel reports.

pub mod cli;
pub mod config;
pub mod db;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod importers;
pub mod metrics;
pub mod reports;
pub mod utils;
