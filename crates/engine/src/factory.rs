//! Validated construction of aggregates.
//!
//! `create` allocates a fresh [`Id`] from the injected generator; `rebuild`
//! reuses a caller-supplied one (imports, updates). Both go through the
//! aggregate constructors, so an invalid aggregate can never be observed.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{Account, Category, Id, IdGenerator, Operation, OperationType, ResultEngine};

#[derive(Clone)]
pub struct AccountFactory {
    ids: Arc<dyn IdGenerator>,
}

impl AccountFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn create(&self, name: &str, balance: i64) -> ResultEngine<Account> {
        let id = self.ids.new_id()?;
        self.rebuild(id, name, balance)
    }

    pub fn rebuild(&self, id: Id, name: &str, balance: i64) -> ResultEngine<Account> {
        Account::new(id, name, balance)
    }
}

#[derive(Clone)]
pub struct CategoryFactory {
    ids: Arc<dyn IdGenerator>,
}

impl CategoryFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn create(&self, name: &str, kind: OperationType) -> ResultEngine<Category> {
        let id = self.ids.new_id()?;
        self.rebuild(id, name, kind)
    }

    pub fn rebuild(&self, id: Id, name: &str, kind: OperationType) -> ResultEngine<Category> {
        Category::new(id, kind, name)
    }
}

#[derive(Clone)]
pub struct OperationFactory {
    ids: Arc<dyn IdGenerator>,
}

impl OperationFactory {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn create(
        &self,
        kind: OperationType,
        account_id: Id,
        category_id: Id,
        amount: i64,
        date: DateTime<Utc>,
        description: &str,
    ) -> ResultEngine<Operation> {
        let id = self.ids.new_id()?;
        self.rebuild(id, kind, account_id, category_id, amount, date, description)
    }

    pub fn rebuild(
        &self,
        id: Id,
        kind: OperationType,
        account_id: Id,
        category_id: Id,
        amount: i64,
        date: DateTime<Utc>,
        description: &str,
    ) -> ResultEngine<Operation> {
        Operation::new(id, kind, account_id, category_id, amount, date, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineError, UlidGenerator};

    struct BrokenEntropy;

    impl IdGenerator for BrokenEntropy {
        fn new_id(&self) -> ResultEngine<Id> {
            Err(EngineError::Entropy("no entropy".to_string()))
        }
    }

    #[test]
    fn create_allocates_distinct_ids() {
        let factory = AccountFactory::new(Arc::new(UlidGenerator::new()));
        let a = factory.create("Main", 0).unwrap();
        let b = factory.create("Main", 0).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rebuild_keeps_supplied_id() {
        let factory = CategoryFactory::new(Arc::new(UlidGenerator::new()));
        let id = Id::parse("01J0000000000000000000000C").unwrap();
        let category = factory
            .rebuild(id.clone(), "Salary", OperationType::Income)
            .unwrap();
        assert_eq!(category.id(), &id);
    }

    #[test]
    fn generator_failure_propagates() {
        let factory = OperationFactory::new(Arc::new(BrokenEntropy));
        let id = Id::parse("01J0000000000000000000000C").unwrap();
        let err = factory
            .create(
                OperationType::Income,
                id.clone(),
                id,
                10,
                Utc::now(),
                "",
            )
            .unwrap_err();
        assert_eq!(err, EngineError::Entropy("no entropy".to_string()));
    }
}
