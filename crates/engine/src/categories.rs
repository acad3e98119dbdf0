//! Spending and income categories.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Id, OperationType, ResultEngine};

/// A category classifies operations; its type must match theirs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: Id,
    kind: OperationType,
    name: String,
}

impl Category {
    pub fn new(id: Id, kind: OperationType, name: &str) -> ResultEngine<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidCategory(
                "category name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            kind,
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn kind(&self) -> OperationType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
