mod common;

use common::{day, expense_category, income_category};
use engine::{CreateOperationCmd, Engine, Id, OperationFilter, OperationType, UpdateOperationCmd};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Income(i64),
    Expense(i64),
    Resize { index: usize, amount: i64 },
    Delete { index: usize },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (1..500_i64).prop_map(Step::Income),
        (1..500_i64).prop_map(Step::Expense),
        (any::<usize>(), 1..500_i64).prop_map(|(index, amount)| Step::Resize { index, amount }),
        any::<usize>().prop_map(|index| Step::Delete { index }),
    ]
}

fn stored_sum(engine: &Engine, account: &Id) -> i64 {
    engine
        .list_operations_with_filter(&OperationFilter::new().for_account(account.clone()))
        .unwrap()
        .iter()
        .map(engine::Operation::signed_amount)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn balance_always_equals_sum_of_stored_operations(steps in prop::collection::vec(step(), 1..40)) {
        let engine = Engine::builder().build();
        let account = engine.create_account("Wallet").unwrap();
        let salary = income_category(&engine);
        let groceries = expense_category(&engine);
        let mut ids: Vec<Id> = Vec::new();

        for step in steps {
            // Rejected writes are expected; the invariant must hold either way.
            match step {
                Step::Income(amount) | Step::Expense(amount) => {
                    let (kind, category) = match step {
                        Step::Income(_) => (OperationType::Income, salary.id()),
                        _ => (OperationType::Expense, groceries.id()),
                    };
                    if let Ok(op) = engine.create_operation(CreateOperationCmd::new(
                        kind,
                        account.id().clone(),
                        category.clone(),
                        amount,
                        day(1),
                    )) {
                        ids.push(op.id().clone());
                    }
                }
                Step::Resize { index, amount } if !ids.is_empty() => {
                    let id = &ids[index % ids.len()];
                    let existing = engine.get_operation(id).unwrap();
                    let _ = engine.update_operation(UpdateOperationCmd::new(
                        id.clone(),
                        existing.kind(),
                        account.id().clone(),
                        existing.category_id().clone(),
                        amount,
                        existing.date(),
                    ));
                }
                Step::Delete { index } if !ids.is_empty() => {
                    let id = ids.remove(index % ids.len());
                    if engine.delete_operation(&id).is_err() {
                        ids.push(id);
                    }
                }
                Step::Resize { .. } | Step::Delete { .. } => {}
            }

            let balance = engine.get_account(account.id()).unwrap().balance();
            prop_assert!(balance >= 0);
            prop_assert_eq!(balance, stored_sum(&engine, account.id()));
        }
    }
}
