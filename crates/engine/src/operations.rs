//! Operation primitives.
//!
//! An `Operation` is a single income or expense recorded against one account
//! and one category. Its balance effect is applied by the coordinator, never
//! by the operation itself.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Id, ResultEngine};

/// Direction of money for operations and categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Expense,
    Income,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OperationType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidOperation(format!(
                "invalid operation type: {other}"
            ))),
        }
    }
}

impl FromStr for OperationType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    id: Id,
    kind: OperationType,
    account_id: Id,
    category_id: Id,
    amount: i64,
    date: DateTime<Utc>,
    description: String,
}

impl Operation {
    /// Builds an operation after structural validation.
    ///
    /// Only the shape is checked here (`amount > 0`). Whether `kind` matches
    /// the category is a cross-aggregate rule enforced by the engine.
    pub fn new(
        id: Id,
        kind: OperationType,
        account_id: Id,
        category_id: Id,
        amount: i64,
        date: DateTime<Utc>,
        description: &str,
    ) -> ResultEngine<Self> {
        if amount <= 0 {
            return Err(EngineError::InvalidOperation(
                "amount must be > 0".to_string(),
            ));
        }

        Ok(Self {
            id,
            kind,
            account_id,
            category_id,
            amount,
            date,
            description: description.trim().to_string(),
        })
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn kind(&self) -> OperationType {
        self.kind
    }

    pub fn account_id(&self) -> &Id {
        &self.account_id
    }

    pub fn category_id(&self) -> &Id {
        &self.category_id
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Signed effect on the account balance (positive for income).
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            OperationType::Income => self.amount,
            OperationType::Expense => -self.amount,
        }
    }
}
