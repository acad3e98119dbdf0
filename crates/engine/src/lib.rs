//! Account, category and operation bookkeeping.
//!
//! [`Engine`] is the coordinator: it keeps every account balance in
//! lock-step with the operations recorded against it, across three
//! independent repositories. Writes are applied sequentially and
//! compensated on failure (no cross-store transaction).

pub use accounts::Account;
pub use analytics::{Totals, net_totals};
pub use categories::Category;
pub use commands::{CreateOperationCmd, ImportOperationCmd, UpdateOperationCmd};
pub use error::{EngineError, ErrorKind};
pub use factory::{AccountFactory, CategoryFactory, OperationFactory};
pub use filter::OperationFilter;
pub use id::{ID_ALPHABET, Id, IdGenerator, UlidGenerator};
pub use operations::{Operation, OperationType};
pub use ops::{Engine, EngineBuilder};
pub use snapshot::{AccountRecord, CategoryRecord, OperationRecord, RestoreReport, Snapshot};
pub use timed::{OperationService, Timed};

mod accounts;
mod analytics;
mod categories;
mod commands;
mod error;
mod factory;
mod filter;
mod id;
mod operations;
mod ops;
pub mod repository;
mod snapshot;
mod timed;

pub type ResultEngine<T> = Result<T, EngineError>;
