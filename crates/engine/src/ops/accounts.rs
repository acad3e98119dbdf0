use crate::{Account, Id, ResultEngine};

use super::Engine;

impl Engine {
    /// Creates an account with a zero balance.
    pub fn create_account(&self, name: &str) -> ResultEngine<Account> {
        let account = self.account_factory.create(name, 0)?;
        self.accounts.create(&account)?;
        tracing::debug!(account_id = %account.id(), name = account.name(), "account created");
        Ok(account)
    }

    /// Renames an account.
    ///
    /// The stored balance is kept: only operations move it.
    pub fn update_account(&self, id: &Id, name: &str) -> ResultEngine<Account> {
        let _writer = self.writer.lock();
        let current = self.accounts.get(id)?;
        let account = self
            .account_factory
            .rebuild(id.clone(), name, current.balance())?;
        self.accounts.update(&account)?;
        Ok(account)
    }

    /// Deletes an account.
    ///
    /// Operations referring to it are left in place.
    pub fn delete_account(&self, id: &Id) -> ResultEngine<()> {
        self.accounts.delete(id)
    }

    pub fn get_account(&self, id: &Id) -> ResultEngine<Account> {
        self.accounts.get(id)
    }

    pub fn list_accounts(&self) -> ResultEngine<Vec<Account>> {
        self.accounts.list()
    }
}
