use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::{
    AccountFactory, CategoryFactory, IdGenerator, OperationFactory, UlidGenerator,
    repository::{
        AccountRepository, CategoryRepository, InMemoryAccountRepository,
        InMemoryCategoryRepository, InMemoryOperationRepository, OperationRepository,
    },
};

mod accounts;
mod balances;
mod categories;
mod import;
mod operations;

/// Coordinator over the account, category and operation repositories.
///
/// Holds no state of its own besides the writer gate: the gate serializes
/// balance read-modify-write cycles between concurrent writers. Readers never
/// take it, so a reader may observe an account balance whose operation has
/// not been stored yet.
pub struct Engine {
    accounts: Arc<dyn AccountRepository>,
    categories: Arc<dyn CategoryRepository>,
    operations: Arc<dyn OperationRepository>,
    account_factory: AccountFactory,
    category_factory: CategoryFactory,
    operation_factory: OperationFactory,
    writer: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

/// The builder for `Engine`.
///
/// Every dependency is optional; missing repositories default to the
/// in-memory ones and the id generator defaults to [`UlidGenerator`].
#[derive(Default)]
pub struct EngineBuilder {
    accounts: Option<Arc<dyn AccountRepository>>,
    categories: Option<Arc<dyn CategoryRepository>>,
    operations: Option<Arc<dyn OperationRepository>>,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl EngineBuilder {
    pub fn accounts(mut self, repository: Arc<dyn AccountRepository>) -> EngineBuilder {
        self.accounts = Some(repository);
        self
    }

    pub fn categories(mut self, repository: Arc<dyn CategoryRepository>) -> EngineBuilder {
        self.categories = Some(repository);
        self
    }

    pub fn operations(mut self, repository: Arc<dyn OperationRepository>) -> EngineBuilder {
        self.operations = Some(repository);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> EngineBuilder {
        self.ids = Some(ids);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new()) as Arc<dyn IdGenerator>);

        Engine {
            accounts: self
                .accounts
                .unwrap_or_else(|| Arc::new(InMemoryAccountRepository::new())),
            categories: self
                .categories
                .unwrap_or_else(|| Arc::new(InMemoryCategoryRepository::new())),
            operations: self
                .operations
                .unwrap_or_else(|| Arc::new(InMemoryOperationRepository::new())),
            account_factory: AccountFactory::new(Arc::clone(&ids)),
            category_factory: CategoryFactory::new(Arc::clone(&ids)),
            operation_factory: OperationFactory::new(ids),
            writer: Mutex::new(()),
        }
    }
}
