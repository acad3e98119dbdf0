//! Plain-data view of the whole store, for import/export collaborators.
//!
//! Records keep identifiers and types as strings, so a malformed entry in an
//! imported file is skipped during [`Engine::restore`] instead of failing
//! the whole batch at deserialization time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Account, Category, Engine, Id, ImportOperationCmd, Operation, OperationFilter, OperationType,
    ResultEngine,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub operations: Vec<OperationRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    pub balance: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub account_id: String,
    pub category_id: String,
    pub amount: i64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
}

/// Outcome of [`Engine::restore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub created_accounts: usize,
    pub created_categories: usize,
    pub created_operations: usize,
    pub skipped_accounts: usize,
    pub skipped_categories: usize,
    pub skipped_operations: usize,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            name: account.name().to_string(),
            balance: account.balance(),
        }
    }
}

impl From<&Category> for CategoryRecord {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().to_string(),
            kind: category.kind().as_str().to_string(),
            name: category.name().to_string(),
        }
    }
}

impl From<&Operation> for OperationRecord {
    fn from(operation: &Operation) -> Self {
        Self {
            id: operation.id().to_string(),
            kind: operation.kind().as_str().to_string(),
            account_id: operation.account_id().to_string(),
            category_id: operation.category_id().to_string(),
            amount: operation.amount(),
            date: operation.date(),
            description: operation.description().to_string(),
        }
    }
}

impl TryFrom<&OperationRecord> for ImportOperationCmd {
    type Error = crate::EngineError;

    fn try_from(record: &OperationRecord) -> Result<Self, Self::Error> {
        Ok(ImportOperationCmd::new(
            Id::parse(&record.id)?,
            OperationType::try_from(record.kind.as_str())?,
            Id::parse(&record.account_id)?,
            Id::parse(&record.category_id)?,
            record.amount,
            record.date,
        )
        .description(record.description.as_str()))
    }
}

impl Engine {
    /// Takes a snapshot of every account, category and operation, each in
    /// its repository's listing order.
    pub fn snapshot(&self) -> ResultEngine<Snapshot> {
        Ok(Snapshot {
            accounts: self.list_accounts()?.iter().map(Into::into).collect(),
            categories: self.list_categories(None)?.iter().map(Into::into).collect(),
            operations: self
                .list_operations_with_filter(&OperationFilter::new())?
                .iter()
                .map(Into::into)
                .collect(),
        })
    }

    /// Replays a snapshot through the rehydration entry points.
    ///
    /// Accounts keep their recorded balances and operations are stored
    /// without touching them. Entries that fail validation, conflict with an
    /// existing id or refer to something missing are skipped and counted.
    pub fn restore(&self, snapshot: &Snapshot) -> RestoreReport {
        let mut report = RestoreReport::default();

        for record in &snapshot.accounts {
            let result = Id::parse(&record.id)
                .and_then(|id| self.create_account_with_id(id, &record.name, record.balance));
            match result {
                Ok(_) => report.created_accounts += 1,
                Err(err) => {
                    tracing::warn!(id = %record.id, error = %err, "skipping account");
                    report.skipped_accounts += 1;
                }
            }
        }

        for record in &snapshot.categories {
            let result = Id::parse(&record.id).and_then(|id| {
                let kind = OperationType::try_from(record.kind.as_str())?;
                self.create_category_with_id(id, &record.name, kind)
            });
            match result {
                Ok(_) => report.created_categories += 1,
                Err(err) => {
                    tracing::warn!(id = %record.id, error = %err, "skipping category");
                    report.skipped_categories += 1;
                }
            }
        }

        for record in &snapshot.operations {
            let result = ImportOperationCmd::try_from(record)
                .and_then(|cmd| self.create_operation_without_balance(cmd));
            match result {
                Ok(_) => report.created_operations += 1,
                Err(err) => {
                    tracing::warn!(id = %record.id, error = %err, "skipping operation");
                    report.skipped_operations += 1;
                }
            }
        }

        tracing::info!(?report, "snapshot restored");
        report
    }
}
