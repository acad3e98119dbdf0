//! Income/expense totals over a listing of operations.

use serde::Serialize;

use crate::{EngineError, Operation, OperationType, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: i64,
    pub expense: i64,
    /// `income - expense`.
    pub delta: i64,
}

/// Sums amounts by type.
///
/// Fails with [`EngineError::InvalidOperation`] when a sum leaves the `i64`
/// range.
pub fn net_totals(operations: &[Operation]) -> ResultEngine<Totals> {
    let mut totals = operations.iter().try_fold(Totals::default(), |mut acc, op| {
        let sum = match op.kind() {
            OperationType::Income => &mut acc.income,
            OperationType::Expense => &mut acc.expense,
        };
        *sum = sum
            .checked_add(op.amount())
            .ok_or_else(|| overflow(op.kind().as_str()))?;
        Ok::<_, EngineError>(acc)
    })?;
    totals.delta = totals
        .income
        .checked_sub(totals.expense)
        .ok_or_else(|| overflow("delta"))?;
    Ok(totals)
}

fn overflow(what: &str) -> EngineError {
    EngineError::InvalidOperation(format!("{what} total overflows"))
}
