use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::{
    account::{Account, AccountNumber, WithdrawalPolicy},
    client::{Client, ClientId, ClientRegistration},
    config::Config,
    transaction::Transaction,
};

use super::{AccountSummary, Clock, Ledger, LedgerError, SystemClock};

pub struct InMemoryLedger<C = SystemClock> {
    config: Config,
    clock: C,
    clients: HashMap<ClientId, Client>,
    accounts: BTreeMap<AccountNumber, Account>,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(Config::default(), SystemClock)
    }
}

impl<C: Clock> InMemoryLedger<C> {
    pub fn new(config: Config, clock: C) -> Self {
        Self {
            config,
            clock,
            clients: HashMap::new(),
            accounts: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number the next opened account will get.
    ///
    /// Accounts are never removed, so this is the account count plus one.
    /// Numbering follows the highest number handed out so far, which keeps
    /// numbers unique even if that ever changes.
    pub fn allocate_account_number(&self) -> AccountNumber {
        self.accounts
            .last_key_value()
            .map_or(1, |(number, _)| number + 1)
    }

    fn execute(
        &mut self,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<(), LedgerError> {
        let account = self
            .accounts
            .get_mut(&number)
            .ok_or(LedgerError::AccountNotFound(number))?;
        let client = self
            .clients
            .get(account.owner())
            .ok_or_else(|| LedgerError::ClientNotFound(account.owner().clone()))?;

        match client.execute(account, &transaction, self.clock.now()) {
            Ok(()) => {
                debug!(
                    account = number,
                    kind = ?transaction.kind(),
                    amount = %transaction.amount(),
                    balance = %account.balance(),
                    "Transaction applied"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    account = number,
                    kind = ?transaction.kind(),
                    amount = %transaction.amount(),
                    error = %err,
                    "Transaction rejected"
                );
                Err(err.into())
            }
        }
    }
}

impl<C: Clock> Ledger for InMemoryLedger<C> {
    fn register_client(
        &mut self,
        registration: ClientRegistration,
    ) -> Result<&Client, LedgerError> {
        match self.clients.entry(registration.id.clone()) {
            Entry::Occupied(entry) => {
                warn!(client = %entry.key(), "Client already registered");
                Err(LedgerError::DuplicateClient(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                info!(client = %entry.key(), name = %registration.name, "Client registered");
                Ok(entry.insert(Client::new(registration)))
            }
        }
    }

    fn find_client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.get(id)
    }

    fn find_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&number)
    }

    fn open_account(&mut self, id: &ClientId) -> Result<&Account, LedgerError> {
        let number = self.allocate_account_number();
        let client = self
            .clients
            .get_mut(id)
            .ok_or_else(|| LedgerError::ClientNotFound(id.clone()))?;

        let account = Account::new(
            number,
            self.config.branch.clone(),
            id.clone(),
            WithdrawalPolicy::Limited(self.config.withdrawal_limits),
        );
        client.register_account(&account)?;
        info!(client = %id, account = number, branch = %account.branch(), "Account opened");

        Ok(self.accounts.entry(number).or_insert(account))
    }

    fn deposit(&mut self, number: AccountNumber, amount: Decimal) -> Result<(), LedgerError> {
        self.execute(number, Transaction::Deposit { amount })
    }

    fn withdraw(&mut self, number: AccountNumber, amount: Decimal) -> Result<(), LedgerError> {
        self.execute(number, Transaction::Withdrawal { amount })
    }

    fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .values()
            .map(|account| AccountSummary {
                branch: account.branch().to_string(),
                number: account.number(),
                client: account.owner().clone(),
                holder: self
                    .clients
                    .get(account.owner())
                    .map(|client| client.name().to_string())
                    .unwrap_or_default(),
                balance: account.balance(),
            })
            .collect()
    }
}
