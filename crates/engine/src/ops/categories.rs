use crate::{Category, Id, OperationType, ResultEngine};

use super::Engine;

impl Engine {
    pub fn create_category(&self, name: &str, kind: OperationType) -> ResultEngine<Category> {
        let category = self.category_factory.create(name, kind)?;
        self.categories.create(&category)?;
        tracing::debug!(category_id = %category.id(), kind = %kind, "category created");
        Ok(category)
    }

    /// Replaces a category.
    ///
    /// Changing the type does not touch operations already filed under it.
    pub fn update_category(
        &self,
        id: &Id,
        name: &str,
        kind: OperationType,
    ) -> ResultEngine<Category> {
        let category = self.category_factory.rebuild(id.clone(), name, kind)?;
        self.categories.update(&category)?;
        Ok(category)
    }

    pub fn delete_category(&self, id: &Id) -> ResultEngine<()> {
        self.categories.delete(id)
    }

    pub fn get_category(&self, id: &Id) -> ResultEngine<Category> {
        self.categories.get(id)
    }

    /// Lists categories of one type, or all of them when `kind` is `None`.
    pub fn list_categories(&self, kind: Option<OperationType>) -> ResultEngine<Vec<Category>> {
        match kind {
            Some(kind) => self.categories.list_by_type(kind),
            None => self.categories.list_all(),
        }
    }
}
