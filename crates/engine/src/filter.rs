//! Criteria for listing operations.

use chrono::{DateTime, Utc};

use crate::{EngineError, Id, Operation, OperationType, ResultEngine};

/// Immutable filter for operations.
///
/// Every unset field means "no restriction" on that dimension. `from` and
/// `to` are both inclusive.
///
/// ```rust
/// use engine::{Id, OperationFilter, OperationType};
///
/// let account = Id::parse("01J0000000000000000000000A").unwrap();
/// let filter = OperationFilter::new()
///     .for_account(account)
///     .of_type(OperationType::Expense);
/// assert!(filter.category_id().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationFilter {
    account_id: Option<Id>,
    category_id: Option<Id>,
    kind: Option<OperationType>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl OperationFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_account(mut self, id: Id) -> Self {
        self.account_id = Some(id);
        self
    }

    #[must_use]
    pub fn for_category(mut self, id: Id) -> Self {
        self.category_id = Some(id);
        self
    }

    #[must_use]
    pub fn of_type(mut self, kind: OperationType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Keeps operations dated on or after `from`.
    #[must_use]
    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Keeps operations dated on or before `to`.
    #[must_use]
    pub fn to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn between(self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from(from).to(to)
    }

    pub fn account_id(&self) -> Option<&Id> {
        self.account_id.as_ref()
    }

    pub fn category_id(&self) -> Option<&Id> {
        self.category_id.as_ref()
    }

    pub fn kind(&self) -> Option<OperationType> {
        self.kind
    }

    pub fn period(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        (self.from, self.to)
    }

    /// Returns `true` when `operation` satisfies every set predicate.
    pub fn matches(&self, operation: &Operation) -> bool {
        if self
            .account_id
            .as_ref()
            .is_some_and(|id| id != operation.account_id())
        {
            return false;
        }
        if self
            .category_id
            .as_ref()
            .is_some_and(|id| id != operation.category_id())
        {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != operation.kind()) {
            return false;
        }
        if self.from.is_some_and(|from| operation.date() < from) {
            return false;
        }
        if self.to.is_some_and(|to| operation.date() > to) {
            return false;
        }
        true
    }

    /// Rejects a period whose start is after its end.
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err(EngineError::InvalidOperation(
                "invalid period: from must be <= to".to_string(),
            ));
        }
        Ok(())
    }
}
