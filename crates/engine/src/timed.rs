//! Operation surface as a trait, plus a timing wrapper.
//!
//! [`Timed`] implements [`OperationService`] by delegating to another
//! implementation and logging how long each call took. Wrappers are composed
//! explicitly where the engine is wired.

use std::time::Instant;

use crate::{
    CreateOperationCmd, Engine, Id, Operation, OperationFilter, ResultEngine, UpdateOperationCmd,
};

pub trait OperationService {
    fn create_operation(&self, cmd: CreateOperationCmd) -> ResultEngine<Operation>;

    fn update_operation(&self, cmd: UpdateOperationCmd) -> ResultEngine<Operation>;

    fn delete_operation(&self, id: &Id) -> ResultEngine<()>;

    fn get_operation(&self, id: &Id) -> ResultEngine<Operation>;

    fn list_operations_with_filter(
        &self,
        filter: &OperationFilter,
    ) -> ResultEngine<Vec<Operation>>;
}

impl OperationService for Engine {
    fn create_operation(&self, cmd: CreateOperationCmd) -> ResultEngine<Operation> {
        Engine::create_operation(self, cmd)
    }

    fn update_operation(&self, cmd: UpdateOperationCmd) -> ResultEngine<Operation> {
        Engine::update_operation(self, cmd)
    }

    fn delete_operation(&self, id: &Id) -> ResultEngine<()> {
        Engine::delete_operation(self, id)
    }

    fn get_operation(&self, id: &Id) -> ResultEngine<Operation> {
        Engine::get_operation(self, id)
    }

    fn list_operations_with_filter(
        &self,
        filter: &OperationFilter,
    ) -> ResultEngine<Vec<Operation>> {
        Engine::list_operations_with_filter(self, filter)
    }
}

/// Logs the duration and outcome of every call to the wrapped service.
#[derive(Debug)]
pub struct Timed<S> {
    inner: S,
}

impl<S> Timed<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn time<T>(
        &self,
        command: &'static str,
        call: impl FnOnce(&S) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let start = Instant::now();
        let result = call(&self.inner);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

        match &result {
            Ok(_) => tracing::info!(command, elapsed_ms, "command finished"),
            Err(err) => tracing::warn!(command, elapsed_ms, error = %err, "command failed"),
        }
        result
    }
}

impl<S: OperationService> OperationService for Timed<S> {
    fn create_operation(&self, cmd: CreateOperationCmd) -> ResultEngine<Operation> {
        self.time("operation.create", |inner| inner.create_operation(cmd))
    }

    fn update_operation(&self, cmd: UpdateOperationCmd) -> ResultEngine<Operation> {
        self.time("operation.update", |inner| inner.update_operation(cmd))
    }

    fn delete_operation(&self, id: &Id) -> ResultEngine<()> {
        self.time("operation.delete", |inner| inner.delete_operation(id))
    }

    fn get_operation(&self, id: &Id) -> ResultEngine<Operation> {
        self.time("operation.get", |inner| inner.get_operation(id))
    }

    fn list_operations_with_filter(
        &self,
        filter: &OperationFilter,
    ) -> ResultEngine<Vec<Operation>> {
        self.time("operation.list", |inner| {
            inner.list_operations_with_filter(filter)
        })
    }
}
