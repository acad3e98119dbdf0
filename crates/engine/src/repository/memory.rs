//! In-memory repositories.
//!
//! Each repository guards its whole collection with one reader/writer lock.
//! Listings sort under a consistent snapshot, which per-entity locks could
//! not give.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::{
    Account, Category, EngineError, Id, Operation, OperationFilter, OperationType, ResultEngine,
};

use super::{AccountRepository, CategoryRepository, OperationRepository};

trait Keyed: Clone {
    const LABEL: &'static str;

    fn key(&self) -> &Id;
}

impl Keyed for Account {
    const LABEL: &'static str = "account";

    fn key(&self) -> &Id {
        self.id()
    }
}

impl Keyed for Category {
    const LABEL: &'static str = "category";

    fn key(&self) -> &Id {
        self.id()
    }
}

impl Keyed for Operation {
    const LABEL: &'static str = "operation";

    fn key(&self) -> &Id {
        self.id()
    }
}

/// Keyed collection shared by the three repositories.
#[derive(Debug)]
struct Store<T> {
    items: RwLock<HashMap<Id, T>>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Keyed> Store<T> {
    fn create(&self, item: &T) -> ResultEngine<()> {
        let mut items = self.items.write();
        if items.contains_key(item.key()) {
            return Err(EngineError::AlreadyExists(format!(
                "{} {}",
                T::LABEL,
                item.key()
            )));
        }
        items.insert(item.key().clone(), item.clone());
        Ok(())
    }

    fn update(&self, item: &T) -> ResultEngine<()> {
        let mut items = self.items.write();
        match items.get_mut(item.key()) {
            Some(stored) => {
                *stored = item.clone();
                Ok(())
            }
            None => Err(not_found::<T>(item.key())),
        }
    }

    fn delete(&self, id: &Id) -> ResultEngine<()> {
        self.items
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found::<T>(id))
    }

    fn get(&self, id: &Id) -> ResultEngine<T> {
        self.items
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| not_found::<T>(id))
    }

    fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .values()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }
}

fn not_found<T: Keyed>(id: &Id) -> EngineError {
    EngineError::NotFound(format!("{} {id}", T::LABEL))
}

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    store: Store<Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn create(&self, account: &Account) -> ResultEngine<()> {
        self.store.create(account)
    }

    fn update(&self, account: &Account) -> ResultEngine<()> {
        self.store.update(account)
    }

    fn delete(&self, id: &Id) -> ResultEngine<()> {
        self.store.delete(id)
    }

    fn get(&self, id: &Id) -> ResultEngine<Account> {
        self.store.get(id)
    }

    fn list(&self) -> ResultEngine<Vec<Account>> {
        let mut accounts = self.store.select(|_| true);
        accounts.sort_by_cached_key(|a| (a.name().to_lowercase(), a.id().clone()));
        Ok(accounts)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    store: Store<Category>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_categories(categories: &mut [Category]) {
    categories.sort_by_cached_key(|c| (c.kind(), c.name().to_lowercase(), c.id().clone()));
}

impl CategoryRepository for InMemoryCategoryRepository {
    fn create(&self, category: &Category) -> ResultEngine<()> {
        self.store.create(category)
    }

    fn update(&self, category: &Category) -> ResultEngine<()> {
        self.store.update(category)
    }

    fn delete(&self, id: &Id) -> ResultEngine<()> {
        self.store.delete(id)
    }

    fn get(&self, id: &Id) -> ResultEngine<Category> {
        self.store.get(id)
    }

    fn list_all(&self) -> ResultEngine<Vec<Category>> {
        let mut categories = self.store.select(|_| true);
        sort_categories(&mut categories);
        Ok(categories)
    }

    fn list_by_type(&self, kind: OperationType) -> ResultEngine<Vec<Category>> {
        let mut categories = self.store.select(|c| c.kind() == kind);
        sort_categories(&mut categories);
        Ok(categories)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOperationRepository {
    store: Store<Operation>,
}

impl InMemoryOperationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OperationRepository for InMemoryOperationRepository {
    fn create(&self, operation: &Operation) -> ResultEngine<()> {
        self.store.create(operation)
    }

    fn update(&self, operation: &Operation) -> ResultEngine<()> {
        self.store.update(operation)
    }

    fn delete(&self, id: &Id) -> ResultEngine<()> {
        self.store.delete(id)
    }

    fn get(&self, id: &Id) -> ResultEngine<Operation> {
        self.store.get(id)
    }

    fn list_by_filter(&self, filter: &OperationFilter) -> ResultEngine<Vec<Operation>> {
        let mut operations = self.store.select(|op| filter.matches(op));
        operations.sort_by(|a, b| a.date().cmp(&b.date()).then_with(|| a.id().cmp(b.id())));
        Ok(operations)
    }
}
