//! # Repository traits
//!
//! Storage abstractions for the three aggregates. The engine only talks to
//! these traits, so stores can be swapped (or wrapped in tests) without
//! touching the coordination logic.
//!
//! Contract shared by every implementation:
//!
//! - `create` fails with [`EngineError::AlreadyExists`] on a duplicate id.
//! - `update` is a full replacement and fails with [`EngineError::NotFound`]
//!   when the id is absent; so does `delete`.
//! - `get` and every listing return copies, never the stored instance.
//! - Listings are deterministically ordered and return an empty `Vec` when
//!   nothing matches.
//!
//! [`EngineError::AlreadyExists`]: crate::EngineError::AlreadyExists
//! [`EngineError::NotFound`]: crate::EngineError::NotFound

use crate::{Account, Category, Id, Operation, OperationFilter, OperationType, ResultEngine};

mod memory;

pub use memory::{InMemoryAccountRepository, InMemoryCategoryRepository, InMemoryOperationRepository};

pub trait AccountRepository: Send + Sync {
    fn create(&self, account: &Account) -> ResultEngine<()>;

    fn update(&self, account: &Account) -> ResultEngine<()>;

    fn delete(&self, id: &Id) -> ResultEngine<()>;

    fn get(&self, id: &Id) -> ResultEngine<Account>;

    /// All accounts ordered by lowercase name, then id.
    fn list(&self) -> ResultEngine<Vec<Account>>;
}

pub trait CategoryRepository: Send + Sync {
    fn create(&self, category: &Category) -> ResultEngine<()>;

    fn update(&self, category: &Category) -> ResultEngine<()>;

    fn delete(&self, id: &Id) -> ResultEngine<()>;

    fn get(&self, id: &Id) -> ResultEngine<Category>;

    /// All categories ordered by type, lowercase name, then id.
    fn list_all(&self) -> ResultEngine<Vec<Category>>;

    /// Categories of one type, in the same order as [`list_all`].
    ///
    /// [`list_all`]: CategoryRepository::list_all
    fn list_by_type(&self, kind: OperationType) -> ResultEngine<Vec<Category>>;
}

pub trait OperationRepository: Send + Sync {
    fn create(&self, operation: &Operation) -> ResultEngine<()>;

    fn update(&self, operation: &Operation) -> ResultEngine<()>;

    fn delete(&self, id: &Id) -> ResultEngine<()>;

    fn get(&self, id: &Id) -> ResultEngine<Operation>;

    /// Operations matching `filter`, ordered by date ascending, then id.
    fn list_by_filter(&self, filter: &OperationFilter) -> ResultEngine<Vec<Operation>>;
}
