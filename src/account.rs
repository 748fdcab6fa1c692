use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{client::ClientId, history::History};

pub type AccountNumber = u32;

pub const DEFAULT_BRANCH: &str = "0001";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalLimits {
    /// Largest amount a single withdrawal may take out.
    pub per_transaction: Decimal,
    /// How many withdrawals are allowed within one UTC day.
    pub daily_withdrawals: usize,
}

impl Default for WithdrawalLimits {
    fn default() -> Self {
        Self {
            per_transaction: Decimal::from(500),
            daily_withdrawals: 3,
        }
    }
}

/// Extra rules checked before the balance check of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalPolicy {
    Unrestricted,
    Limited(WithdrawalLimits),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Amount must be greater than zero, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Withdrawal of {amount} exceeds the per-transaction ceiling of {ceiling}")]
    OverPerTransactionCeiling { amount: Decimal, ceiling: Decimal },
    #[error("Daily limit of {limit} withdrawals reached")]
    DailyWithdrawalLimitReached { limit: usize },
    #[error("Depositing {amount} would overflow the balance of {balance}")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
}

#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    branch: String,
    owner: ClientId,
    balance: Decimal,
    policy: WithdrawalPolicy,
    pub(crate) history: History,
}

impl Account {
    pub fn new(
        number: AccountNumber,
        branch: impl Into<String>,
        owner: ClientId,
        policy: WithdrawalPolicy,
    ) -> Self {
        Self {
            number,
            branch: branch.into(),
            owner,
            balance: Decimal::ZERO,
            policy,
            history: History::default(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn owner(&self) -> &ClientId {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn policy(&self) -> WithdrawalPolicy {
        self.policy
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }
        let Some(balance) = self.balance.checked_add(amount) else {
            return Err(AccountError::BalanceOverflow {
                balance: self.balance,
                amount,
            });
        };
        self.balance = balance;
        Ok(())
    }

    pub(crate) fn withdraw(
        &mut self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        self.check_withdrawal(amount, now)?;
        self.balance -= amount;
        Ok(())
    }

    /// Runs every withdrawal rule without touching the balance.
    pub fn check_withdrawal(
        &self,
        amount: Decimal,
        now: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        if let WithdrawalPolicy::Limited(limits) = self.policy {
            if self.history.withdrawals_on(now.date_naive()) >= limits.daily_withdrawals {
                return Err(AccountError::DailyWithdrawalLimitReached {
                    limit: limits.daily_withdrawals,
                });
            }
            if amount > limits.per_transaction {
                return Err(AccountError::OverPerTransactionCeiling {
                    amount,
                    ceiling: limits.per_transaction,
                });
            }
        }

        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    use crate::transaction::TransactionKind;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 10, 14, 0, 0).unwrap()
    }

    fn owner() -> ClientId {
        "12345678901".parse::<ClientId>().unwrap()
    }

    fn checking_account() -> Account {
        Account::new(
            1,
            DEFAULT_BRANCH,
            owner(),
            WithdrawalPolicy::Limited(WithdrawalLimits::default()),
        )
    }

    // mimics what the client does after a successful withdrawal
    fn withdraw_and_record(
        acc: &mut Account,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        acc.withdraw(amount, at)?;
        acc.history.record(TransactionKind::Withdrawal, amount, at);
        Ok(())
    }

    #[test]
    fn new_account_is_empty() {
        let acc = checking_account();
        assert_eq!(acc.number(), 1);
        assert_eq!(acc.branch(), "0001");
        assert_eq!(acc.owner(), &owner());
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert!(acc.history().is_empty());
    }

    #[test]
    fn deposit() {
        let mut acc = checking_account();
        acc.deposit(dec!(13.25)).unwrap();
        assert_eq!(acc.balance(), dec!(13.25));

        for amount in [dec!(0), dec!(-1)] {
            let err = acc.deposit(amount).unwrap_err();
            assert_eq!(err, AccountError::InvalidAmount { amount });
        }
        assert_eq!(acc.balance(), dec!(13.25));
    }

    #[test]
    fn deposit_overflow_keeps_balance() {
        let mut acc = checking_account();
        acc.deposit(dec!(50000000000000000000000000000)).unwrap();

        let err = acc.deposit(dec!(50000000000000000000000000000)).unwrap_err();
        assert_eq!(
            err,
            AccountError::BalanceOverflow {
                balance: dec!(50000000000000000000000000000),
                amount: dec!(50000000000000000000000000000)
            }
        );
        assert_eq!(acc.balance(), dec!(50000000000000000000000000000));

        acc.deposit(Decimal::MAX - acc.balance()).unwrap();
        assert_eq!(acc.balance(), Decimal::MAX);
        assert!(matches!(
            acc.deposit(dec!(1)),
            Err(AccountError::BalanceOverflow { .. })
        ));
        assert_eq!(acc.balance(), Decimal::MAX);
    }

    #[test]
    fn base_withdrawal_rules() {
        let mut acc = Account::new(2, DEFAULT_BRANCH, owner(), WithdrawalPolicy::Unrestricted);
        acc.deposit(dec!(2000)).unwrap();

        // no ceiling for the base policy
        acc.withdraw(dec!(1500), now()).unwrap();
        assert_eq!(acc.balance(), dec!(500));

        let err = acc.withdraw(dec!(500.01), now()).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                requested: dec!(500.01),
                available: dec!(500)
            }
        );
        let err = acc.withdraw(dec!(-5), now()).unwrap_err();
        assert!(matches!(err, AccountError::InvalidAmount { .. }));
        assert_eq!(acc.balance(), dec!(500));

        // no daily cap either
        for _ in 0..5 {
            acc.withdraw(dec!(1), now()).unwrap();
        }
        assert_eq!(acc.balance(), dec!(495));
    }

    #[test]
    fn ceiling_is_enforced() {
        let mut acc = checking_account();
        acc.deposit(dec!(1000)).unwrap();

        let err = acc.withdraw(dec!(500.01), now()).unwrap_err();
        assert_eq!(
            err,
            AccountError::OverPerTransactionCeiling {
                amount: dec!(500.01),
                ceiling: dec!(500)
            }
        );
        assert_eq!(acc.balance(), dec!(1000));
        assert_eq!(
            err.to_string(),
            "Withdrawal of 500.01 exceeds the per-transaction ceiling of 500"
        );
    }

    #[test]
    fn drain_to_zero_then_insufficient_funds() {
        let mut acc = checking_account();
        acc.deposit(dec!(1000)).unwrap();

        withdraw_and_record(&mut acc, dec!(500), now()).unwrap();
        assert_eq!(acc.balance(), dec!(500));
        withdraw_and_record(&mut acc, dec!(500), now()).unwrap();
        assert_eq!(acc.balance(), Decimal::ZERO);

        let err = withdraw_and_record(&mut acc, dec!(1), now()).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds { .. }));
        assert_eq!(acc.balance(), Decimal::ZERO);
    }

    #[test]
    fn fourth_withdrawal_of_the_day_is_rejected() {
        let mut acc = checking_account();
        acc.deposit(dec!(1000)).unwrap();

        for _ in 0..3 {
            withdraw_and_record(&mut acc, dec!(10), now()).unwrap();
        }
        let err = withdraw_and_record(&mut acc, dec!(10), now()).unwrap_err();
        assert_eq!(err, AccountError::DailyWithdrawalLimitReached { limit: 3 });
        assert_eq!(acc.balance(), dec!(970));
        assert_eq!(err.to_string(), "Daily limit of 3 withdrawals reached");
    }

    #[test]
    fn daily_cap_resets_on_the_next_day() {
        let mut acc = checking_account();
        acc.deposit(dec!(1000)).unwrap();

        for _ in 0..3 {
            withdraw_and_record(&mut acc, dec!(10), now()).unwrap();
        }
        withdraw_and_record(&mut acc, dec!(10), now() + Duration::days(1)).unwrap();
        assert_eq!(acc.balance(), dec!(960));
    }

    #[test]
    fn daily_cap_is_checked_before_ceiling() {
        let limits = WithdrawalLimits {
            per_transaction: dec!(100),
            daily_withdrawals: 1,
        };
        let mut acc = Account::new(
            3,
            DEFAULT_BRANCH,
            owner(),
            WithdrawalPolicy::Limited(limits),
        );
        acc.deposit(dec!(1000)).unwrap();
        withdraw_and_record(&mut acc, dec!(100), now()).unwrap();

        let err = acc.check_withdrawal(dec!(200), now()).unwrap_err();
        assert!(matches!(
            err,
            AccountError::DailyWithdrawalLimitReached { limit: 1 }
        ));
    }
}
