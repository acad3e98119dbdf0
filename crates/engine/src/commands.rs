//! Command structs for operation writes.
//!
//! These types group the parameters of create/update/import, keeping call
//! sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

use crate::{Id, OperationType};

/// Record a new operation and apply its balance effect.
#[derive(Clone, Debug)]
pub struct CreateOperationCmd {
    pub kind: OperationType,
    pub account_id: Id,
    pub category_id: Id,
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl CreateOperationCmd {
    #[must_use]
    pub fn new(
        kind: OperationType,
        account_id: Id,
        category_id: Id,
        amount: i64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            account_id,
            category_id,
            amount,
            date,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Replace an existing operation, moving its balance effect.
#[derive(Clone, Debug)]
pub struct UpdateOperationCmd {
    pub id: Id,
    pub kind: OperationType,
    pub account_id: Id,
    pub category_id: Id,
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl UpdateOperationCmd {
    #[must_use]
    pub fn new(
        id: Id,
        kind: OperationType,
        account_id: Id,
        category_id: Id,
        amount: i64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            account_id,
            category_id,
            amount,
            date,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Rehydrate an operation with a known id.
///
/// Unlike [`CreateOperationCmd`], importing never touches the account
/// balance: imported balances already include imported operations.
#[derive(Clone, Debug)]
pub struct ImportOperationCmd {
    pub id: Id,
    pub kind: OperationType,
    pub account_id: Id,
    pub category_id: Id,
    pub amount: i64,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl ImportOperationCmd {
    #[must_use]
    pub fn new(
        id: Id,
        kind: OperationType,
        account_id: Id,
        category_id: Id,
        amount: i64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            account_id,
            category_id,
            amount,
            date,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
