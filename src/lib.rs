/// Account balance and withdrawal rules.
/// Balances are only changed through a [`client::Client`].
pub mod account;

/// Append-only log of applied transactions.
pub mod history;

/// Deposit and withdrawal values and how they apply to an account.
pub mod transaction;

/// Clients, their identifiers, and the single entry point for moving money.
pub mod client;

/// Branch code and default withdrawal limits.
pub mod config;

/// Ledger interface, plus "in memory" implementation.
/// Keeps every client and account, hands out account numbers and routes
/// deposits and withdrawals to the owning client.
pub mod ledger;

/// Turns raw operator input into validated commands for a [`ledger::Ledger`].
pub mod command;

/// Reading command scripts and printing account listings as CSV.
/// Lives in the library so integration tests can drive it.
pub mod bin_utils;
