//! Rehydration entry points used by bulk imports.

use crate::{Account, Category, Id, ImportOperationCmd, Operation, OperationType, ResultEngine};

use super::Engine;

impl Engine {
    /// Stores an account with a caller-supplied id and balance.
    pub fn create_account_with_id(
        &self,
        id: Id,
        name: &str,
        balance: i64,
    ) -> ResultEngine<Account> {
        let account = self.account_factory.rebuild(id, name, balance)?;
        self.accounts.create(&account)?;
        Ok(account)
    }

    /// Stores a category with a caller-supplied id.
    pub fn create_category_with_id(
        &self,
        id: Id,
        name: &str,
        kind: OperationType,
    ) -> ResultEngine<Category> {
        let category = self.category_factory.rebuild(id, name, kind)?;
        self.categories.create(&category)?;
        Ok(category)
    }

    /// Stores an operation without applying its balance effect.
    ///
    /// Imported account balances already include imported operations. The
    /// account and category must still exist and the types must agree.
    pub fn create_operation_without_balance(
        &self,
        cmd: ImportOperationCmd,
    ) -> ResultEngine<Operation> {
        let operation = self.operation_factory.rebuild(
            cmd.id,
            cmd.kind,
            cmd.account_id,
            cmd.category_id,
            cmd.amount,
            cmd.date,
            &cmd.description,
        )?;
        // References are checked like any write; the account is not updated.
        self.resolve_references(&operation)?;
        self.operations.create(&operation)?;
        Ok(operation)
    }
}
