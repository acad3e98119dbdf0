use chrono::{DateTime, Utc};

use crate::{
    Account, CreateOperationCmd, EngineError, Id, Operation, OperationFilter, ResultEngine,
    Totals, UpdateOperationCmd, net_totals,
};

use super::{Engine, balances::compensate};

impl Engine {
    /// Records a new operation and applies its balance effect.
    ///
    /// The account is written before the operation. If storing the operation
    /// then fails, the balance change is reverted.
    pub fn create_operation(&self, cmd: CreateOperationCmd) -> ResultEngine<Operation> {
        let operation = self.operation_factory.create(
            cmd.kind,
            cmd.account_id,
            cmd.category_id,
            cmd.amount,
            cmd.date,
            &cmd.description,
        )?;

        let _writer = self.writer.lock();
        let mut account = self.resolve_references(&operation)?;
        self.apply_and_store(&mut account, &operation)?;

        if let Err(err) = self.operations.create(&operation) {
            return Err(compensate(
                err,
                "revert balance after failed operation insert",
                || self.revert_and_store(&mut account, &operation),
            ));
        }

        tracing::debug!(
            operation_id = %operation.id(),
            account_id = %account.id(),
            amount = operation.signed_amount(),
            balance = account.balance(),
            "operation created"
        );
        Ok(operation)
    }

    /// Replaces an operation, moving its balance effect to the new values.
    ///
    /// The account and category of the replacement are validated like in
    /// [`Engine::create_operation`]. A failed store of the replacement moves
    /// the balance effect back.
    pub fn update_operation(&self, cmd: UpdateOperationCmd) -> ResultEngine<Operation> {
        let _writer = self.writer.lock();
        let existing = self.operations.get(&cmd.id)?;
        let replacement = self.operation_factory.rebuild(
            cmd.id,
            cmd.kind,
            cmd.account_id,
            cmd.category_id,
            cmd.amount,
            cmd.date,
            &cmd.description,
        )?;
        self.resolve_references(&replacement)?;

        self.move_balance(&existing, &replacement)?;

        if let Err(err) = self.operations.update(&replacement) {
            return Err(compensate(
                err,
                "move balance back after failed operation update",
                || self.move_balance(&replacement, &existing),
            ));
        }

        tracing::debug!(
            operation_id = %replacement.id(),
            from_account = %existing.account_id(),
            to_account = %replacement.account_id(),
            amount = replacement.signed_amount(),
            "operation updated"
        );
        Ok(replacement)
    }

    /// Deletes an operation and reverts its balance effect.
    pub fn delete_operation(&self, id: &Id) -> ResultEngine<()> {
        let _writer = self.writer.lock();
        let existing = self.operations.get(id)?;
        self.revert_from_owner(&existing)?;

        if let Err(err) = self.operations.delete(id) {
            return Err(compensate(
                err,
                "re-apply balance after failed operation delete",
                || self.apply_to_owner(&existing),
            ));
        }

        tracing::debug!(
            operation_id = %id,
            account_id = %existing.account_id(),
            "operation deleted"
        );
        Ok(())
    }

    pub fn get_operation(&self, id: &Id) -> ResultEngine<Operation> {
        self.operations.get(id)
    }

    /// Lists operations matching `filter`, ordered by date then id.
    ///
    /// Fails with [`EngineError::InvalidOperation`] when the period starts
    /// after it ends.
    pub fn list_operations_with_filter(
        &self,
        filter: &OperationFilter,
    ) -> ResultEngine<Vec<Operation>> {
        filter.validate()?;
        self.operations.list_by_filter(filter)
    }

    /// Lists the operations of one account within `[from, to]`.
    pub fn list_operations(
        &self,
        account_id: &Id,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultEngine<Vec<Operation>> {
        if from > to {
            return Err(EngineError::InvalidOperation(
                "invalid period: from must be <= to".to_string(),
            ));
        }
        let filter = OperationFilter::new()
            .for_account(account_id.clone())
            .between(from, to);
        self.operations.list_by_filter(&filter)
    }

    /// Income/expense totals over the operations matching `filter`.
    pub fn totals(&self, filter: &OperationFilter) -> ResultEngine<Totals> {
        let operations = self.list_operations_with_filter(filter)?;
        net_totals(&operations)
    }

    /// Loads the account and category an operation refers to and checks that
    /// the operation type matches the category type.
    ///
    /// Shared by the balance-moving writes and by
    /// [`Engine::create_operation_without_balance`], which validates the same
    /// references but never applies the returned account's balance.
    pub(super) fn resolve_references(&self, operation: &Operation) -> ResultEngine<Account> {
        let account = self.accounts.get(operation.account_id())?;
        let category = self.categories.get(operation.category_id())?;
        if category.kind() != operation.kind() {
            return Err(EngineError::OperationTypeMismatch(format!(
                "operation is {}, category {} is {}",
                operation.kind(),
                category.id(),
                category.kind()
            )));
        }
        Ok(account)
    }
}
