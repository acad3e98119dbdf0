//! The module contains the `Account` aggregate.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Id, Operation, OperationType, ResultEngine};

/// A bank account.
///
/// The balance is the only mutable field and it only moves through
/// [`Account::apply`] and [`Account::revert`]. It never goes below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: Id,
    name: String,
    balance: i64,
}

impl Account {
    pub fn new(id: Id, name: &str, balance: i64) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidBankAccount(
                "account name must not be empty".to_string(),
            ));
        }
        if balance < 0 {
            return Err(EngineError::InvalidBankAccount(
                "balance must be >= 0".to_string(),
            ));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            balance,
        })
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Applies the balance effect of `operation`.
    ///
    /// Income increases the balance; an expense larger than the balance fails
    /// with [`EngineError::InsufficientFunds`] and leaves the balance as is.
    pub fn apply(&mut self, operation: &Operation) -> ResultEngine<()> {
        self.ensure_owner(operation)?;
        match operation.kind() {
            OperationType::Income => self.credit(operation.amount()),
            OperationType::Expense => self.debit(operation.amount()),
        }
    }

    /// Undoes the balance effect of `operation`.
    ///
    /// Reverting an income the account no longer covers fails with
    /// [`EngineError::InvalidOperation`].
    pub fn revert(&mut self, operation: &Operation) -> ResultEngine<()> {
        self.ensure_owner(operation)?;
        match operation.kind() {
            OperationType::Income => {
                if operation.amount() > self.balance {
                    return Err(EngineError::InvalidOperation(format!(
                        "cannot revert income {} of {}: account {} only has {}",
                        operation.id(),
                        operation.amount(),
                        self.id,
                        self.balance
                    )));
                }
                self.debit(operation.amount())
            }
            OperationType::Expense => self.credit(operation.amount()),
        }
    }

    /// Swaps the effect of `previous` for the effect of `next` in one step.
    ///
    /// Both operations must belong to this account. This is not a revert
    /// followed by an apply: only the resulting balance is checked, so
    /// editing an income whose money was already spent does not fail on the
    /// intermediate value.
    pub fn rebalance(&mut self, previous: &Operation, next: &Operation) -> ResultEngine<()> {
        self.ensure_owner(previous)?;
        self.ensure_owner(next)?;

        let balance = self
            .balance
            .checked_sub(previous.signed_amount())
            .and_then(|b| b.checked_add(next.signed_amount()))
            .ok_or_else(|| {
                EngineError::InvalidOperation(format!("balance overflow on account {}", self.id))
            })?;
        if balance < 0 {
            return Err(EngineError::InsufficientFunds(format!(
                "account {} has {}, update leaves it short by {}",
                self.id,
                self.balance,
                balance.unsigned_abs()
            )));
        }
        self.balance = balance;
        Ok(())
    }

    fn ensure_owner(&self, operation: &Operation) -> ResultEngine<()> {
        if operation.account_id() != &self.id {
            return Err(EngineError::InvalidOperation(format!(
                "operation {} belongs to account {}, not {}",
                operation.id(),
                operation.account_id(),
                self.id
            )));
        }
        Ok(())
    }

    fn credit(&mut self, amount: i64) -> ResultEngine<()> {
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            EngineError::InvalidOperation(format!("balance overflow on account {}", self.id))
        })?;
        Ok(())
    }

    fn debit(&mut self, amount: i64) -> ResultEngine<()> {
        if amount > self.balance {
            return Err(EngineError::InsufficientFunds(format!(
                "account {} has {}, needs {amount}",
                self.id, self.balance
            )));
        }
        self.balance -= amount;
        Ok(())
    }
}
