//! Context persistence collaborator

use crate::context::ApiContext;
use api_playground_common::{PlaygroundError, Result};
use tracing::debug;
use uuid::Uuid;

/// Storage for API contexts, with at most one active context
///
/// Saving a context whose id already exists replaces it (last writer wins).
#[cfg_attr(test, mockall::automock)]
pub trait ContextStore {
    fn save(&mut self, context: ApiContext) -> Result<()>;

    fn get(&self, id: &Uuid) -> Option<ApiContext>;

    /// All contexts in first-save order
    fn get_all(&self) -> Vec<ApiContext>;

    /// Remove a context; returns whether it existed
    fn delete(&mut self, id: &Uuid) -> bool;

    /// Mark a context active, or clear the marker with `None`
    ///
    /// # Errors
    /// `ContextNotFound` if `id` is not stored.
    fn set_active(&mut self, id: Option<Uuid>) -> Result<()>;

    fn get_active(&self) -> Option<ApiContext>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryContextStore {
    contexts: Vec<ApiContext>,
    active: Option<Uuid>,
}

impl MemoryContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    fn position(&self, id: &Uuid) -> Option<usize> {
        self.contexts.iter().position(|c| &c.id == id)
    }
}

impl ContextStore for MemoryContextStore {
    fn save(&mut self, context: ApiContext) -> Result<()> {
        match self.position(&context.id) {
            Some(index) => self.contexts[index] = context,
            None => self.contexts.push(context),
        }
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Option<ApiContext> {
        self.position(id).map(|index| self.contexts[index].clone())
    }

    fn get_all(&self) -> Vec<ApiContext> {
        self.contexts.clone()
    }

    fn delete(&mut self, id: &Uuid) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        self.contexts.remove(index);
        if self.active.as_ref() == Some(id) {
            debug!(%id, "deleted the active context, clearing active marker");
            self.active = None;
        }
        true
    }

    fn set_active(&mut self, id: Option<Uuid>) -> Result<()> {
        if let Some(id) = &id {
            if self.position(id).is_none() {
                return Err(PlaygroundError::ContextNotFound(id.to_string()));
            }
        }
        self.active = id;
        Ok(())
    }

    fn get_active(&self) -> Option<ApiContext> {
        self.active.as_ref().and_then(|id| self.get(id))
    }
}

/// Save a context and make it the active one
pub fn save_and_activate(store: &mut dyn ContextStore, context: ApiContext) -> Result<Uuid> {
    let id = context.id;
    store.save(context)?;
    store.set_active(Some(id))?;
    Ok(id)
}
