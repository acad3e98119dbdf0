use crate::{Account, EngineError, Operation, ResultEngine};

use super::Engine;

impl Engine {
    /// Applies `operation` to `account` and stores the result.
    ///
    /// On a failed store the in-memory `account` is restored, so the caller
    /// holds the same value the repository does.
    pub(super) fn apply_and_store(
        &self,
        account: &mut Account,
        operation: &Operation,
    ) -> ResultEngine<()> {
        let before = account.clone();
        account.apply(operation)?;
        if let Err(err) = self.accounts.update(account) {
            *account = before;
            return Err(err);
        }
        Ok(())
    }

    pub(super) fn revert_and_store(
        &self,
        account: &mut Account,
        operation: &Operation,
    ) -> ResultEngine<()> {
        let before = account.clone();
        account.revert(operation)?;
        if let Err(err) = self.accounts.update(account) {
            *account = before;
            return Err(err);
        }
        Ok(())
    }

    /// Re-reads the owning account and applies `operation` to it.
    pub(super) fn apply_to_owner(&self, operation: &Operation) -> ResultEngine<()> {
        let mut account = self.accounts.get(operation.account_id())?;
        self.apply_and_store(&mut account, operation)
    }

    /// Re-reads the owning account and reverts `operation` from it.
    pub(super) fn revert_from_owner(&self, operation: &Operation) -> ResultEngine<()> {
        let mut account = self.accounts.get(operation.account_id())?;
        self.revert_and_store(&mut account, operation)
    }

    /// Moves the balance effect from `previous` to `next`.
    ///
    /// On the same account this is a single write through
    /// [`Account::rebalance`], which checks the final balance only, never the
    /// value between revert and apply. Across accounts the
    /// previous effect is reverted first; if applying the next one then
    /// fails, the previous effect is re-applied to its account.
    pub(super) fn move_balance(&self, previous: &Operation, next: &Operation) -> ResultEngine<()> {
        if previous.account_id() == next.account_id() {
            let mut account = self.accounts.get(previous.account_id())?;
            account.rebalance(previous, next)?;
            return self.accounts.update(&account);
        }

        self.revert_from_owner(previous)?;
        if let Err(err) = self.apply_to_owner(next) {
            return Err(compensate(
                err,
                "re-apply previous effect after failed move",
                || self.apply_to_owner(previous),
            ));
        }
        Ok(())
    }
}

/// Runs the compensating `rollback` for a write that failed after an earlier
/// write succeeded.
///
/// Returns `cause` when the rollback succeeds. When it fails too, the stores
/// are out of step: the failure is logged and returned as
/// [`EngineError::Inconsistent`] wrapping both errors.
pub(super) fn compensate(
    cause: EngineError,
    step: &'static str,
    rollback: impl FnOnce() -> ResultEngine<()>,
) -> EngineError {
    tracing::warn!(error = %cause, step, "write failed, compensating");
    match rollback() {
        Ok(()) => cause,
        Err(rollback) => {
            tracing::error!(
                error = %cause,
                rollback_error = %rollback,
                step,
                "compensation failed, balance and operation stores disagree"
            );
            EngineError::Inconsistent {
                cause: Box::new(cause),
                rollback: Box::new(rollback),
            }
        }
    }
}
