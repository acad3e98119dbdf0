#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use chrono::{DateTime, TimeZone, Utc};
use engine::{
    Account, Category, Engine, EngineError, Id, IdGenerator, Operation, OperationFilter,
    OperationType, ResultEngine, UlidGenerator,
    repository::{
        AccountRepository, InMemoryAccountRepository, InMemoryOperationRepository,
        OperationRepository,
    },
};

/// Operation store whose writes can be made to fail on demand.
#[derive(Default)]
pub struct FailingOperations {
    inner: InMemoryOperationRepository,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
}

fn injected(what: &str) -> EngineError {
    EngineError::NotFound(format!("injected {what} failure"))
}

impl OperationRepository for FailingOperations {
    fn create(&self, operation: &Operation) -> ResultEngine<()> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(injected("create"));
        }
        self.inner.create(operation)
    }

    fn update(&self, operation: &Operation) -> ResultEngine<()> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(injected("update"));
        }
        self.inner.update(operation)
    }

    fn delete(&self, id: &Id) -> ResultEngine<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("delete"));
        }
        self.inner.delete(id)
    }

    fn get(&self, id: &Id) -> ResultEngine<Operation> {
        self.inner.get(id)
    }

    fn list_by_filter(&self, filter: &OperationFilter) -> ResultEngine<Vec<Operation>> {
        self.inner.list_by_filter(filter)
    }
}

/// Account store that starts failing updates after a number of successes.
pub struct FlakyAccounts {
    inner: InMemoryAccountRepository,
    updates_left: AtomicUsize,
}

impl FlakyAccounts {
    pub fn new() -> Self {
        Self {
            inner: InMemoryAccountRepository::new(),
            updates_left: AtomicUsize::new(usize::MAX),
        }
    }

    /// Allow `n` more successful updates, then fail every following one.
    pub fn fail_updates_after(&self, n: usize) {
        self.updates_left.store(n, Ordering::SeqCst);
    }
}

impl AccountRepository for FlakyAccounts {
    fn create(&self, account: &Account) -> ResultEngine<()> {
        self.inner.create(account)
    }

    fn update(&self, account: &Account) -> ResultEngine<()> {
        let allowed = self
            .updates_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(injected("account update"));
        }
        self.inner.update(account)
    }

    fn delete(&self, id: &Id) -> ResultEngine<()> {
        self.inner.delete(id)
    }

    fn get(&self, id: &Id) -> ResultEngine<Account> {
        self.inner.get(id)
    }

    fn list(&self) -> ResultEngine<Vec<Account>> {
        self.inner.list()
    }
}

pub struct Harness {
    pub engine: Engine,
    pub accounts: Arc<FlakyAccounts>,
    pub operations: Arc<FailingOperations>,
}

pub fn harness() -> Harness {
    let accounts = Arc::new(FlakyAccounts::new());
    let operations = Arc::new(FailingOperations::default());
    let engine = Engine::builder()
        .accounts(accounts.clone())
        .operations(operations.clone())
        .build();
    Harness {
        engine,
        accounts,
        operations,
    }
}

pub fn fresh_id() -> Id {
    UlidGenerator::new().new_id().unwrap()
}

pub fn account_with_balance(engine: &Engine, name: &str, balance: i64) -> Account {
    engine
        .create_account_with_id(fresh_id(), name, balance)
        .unwrap()
}

pub fn income_category(engine: &Engine) -> Category {
    engine
        .create_category("Salary", OperationType::Income)
        .unwrap()
}

pub fn expense_category(engine: &Engine) -> Category {
    engine
        .create_category("Groceries", OperationType::Expense)
        .unwrap()
}

pub fn balance(engine: &Engine, id: &Id) -> i64 {
    engine.get_account(id).unwrap().balance()
}

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, d, 10, 0, 0).unwrap()
}
