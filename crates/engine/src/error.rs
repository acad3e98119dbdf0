//! The module contains the errors the engine can return.
//!
//! Every variant except [`Inconsistent`] and [`Entropy`] maps one-to-one to
//! a sentinel that callers branch on:
//!
//! - [`NotFound`] when an identifier is absent from its repository.
//! - [`AlreadyExists`] when an identifier is already taken.
//! - [`InvalidBankAccount`], [`InvalidCategory`], [`InvalidOperation`] and
//!   [`InvalidId`] for structural validation failures.
//! - [`InsufficientFunds`] when a balance would become negative.
//! - [`OperationTypeMismatch`] when an operation and its category disagree.
//!
//! [`Inconsistent`] is returned when a compensating write failed after an
//! earlier write already succeeded, leaving the stores out of lock-step.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`AlreadyExists`]: EngineError::AlreadyExists
//!  [`InvalidBankAccount`]: EngineError::InvalidBankAccount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidOperation`]: EngineError::InvalidOperation
//!  [`InvalidId`]: EngineError::InvalidId
//!  [`InsufficientFunds`]: EngineError::InsufficientFunds
//!  [`OperationTypeMismatch`]: EngineError::OperationTypeMismatch
//!  [`Inconsistent`]: EngineError::Inconsistent
//!  [`Entropy`]: EngineError::Entropy
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("\"{0}\" already present!")]
    AlreadyExists(String),
    #[error("Invalid bank account: {0}")]
    InvalidBankAccount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("Operation type mismatch: {0}")]
    OperationTypeMismatch(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Randomness source unavailable: {0}")]
    Entropy(String),
    #[error("stores left inconsistent: {cause} (compensation failed: {rollback})")]
    Inconsistent {
        cause: Box<EngineError>,
        rollback: Box<EngineError>,
    },
}

/// Discriminant of [`EngineError`], for callers that only branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidBankAccount,
    InvalidCategory,
    InvalidOperation,
    InsufficientFunds,
    OperationTypeMismatch,
    InvalidId,
    Entropy,
    Inconsistent,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::InvalidBankAccount(_) => ErrorKind::InvalidBankAccount,
            Self::InvalidCategory(_) => ErrorKind::InvalidCategory,
            Self::InvalidOperation(_) => ErrorKind::InvalidOperation,
            Self::InsufficientFunds(_) => ErrorKind::InsufficientFunds,
            Self::OperationTypeMismatch(_) => ErrorKind::OperationTypeMismatch,
            Self::InvalidId(_) => ErrorKind::InvalidId,
            Self::Entropy(_) => ErrorKind::Entropy,
            Self::Inconsistent { .. } => ErrorKind::Inconsistent,
        }
    }

    /// The error that started the failing workflow.
    ///
    /// For [`EngineError::Inconsistent`] this is the original failure, not the
    /// compensation failure; for every other variant it is `self`.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            Self::Inconsistent { cause, .. } => cause.root_cause(),
            other => other,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::AlreadyExists(a), Self::AlreadyExists(b)) => a == b,
            (Self::InvalidBankAccount(a), Self::InvalidBankAccount(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidOperation(a), Self::InvalidOperation(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::OperationTypeMismatch(a), Self::OperationTypeMismatch(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::Entropy(a), Self::Entropy(b)) => a == b,
            (
                Self::Inconsistent {
                    cause: a,
                    rollback: ra,
                },
                Self::Inconsistent {
                    cause: b,
                    rollback: rb,
                },
            ) => a == b && ra == rb,
            _ => false,
        }
    }
}
