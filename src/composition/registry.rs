use std::collections::BTreeMap;

use crate::{
    composition::model::Composition,
    foundation::error::{AdreelError, AdreelResult},
};

/// Compositions keyed by id, listed in registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    comps: Vec<Composition>,
    index: BTreeMap<String, usize>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a composition. Duplicate ids are rejected.
    pub fn register(&mut self, comp: Composition) -> AdreelResult<()> {
        if self.index.contains_key(comp.id()) {
            return Err(AdreelError::validation(format!(
                "duplicate composition id '{}'",
                comp.id()
            )));
        }
        self.index.insert(comp.id().to_owned(), self.comps.len());
        self.comps.push(comp);
        Ok(())
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, comp: Composition) -> AdreelResult<Self> {
        self.register(comp)?;
        Ok(self)
    }

    /// Look up by id; the error lists the available ids.
    pub fn get(&self, id: &str) -> AdreelResult<&Composition> {
        self.index
            .get(id)
            .map(|&i| &self.comps[i])
            .ok_or_else(|| {
                AdreelError::validation(format!(
                    "unknown composition '{id}' (available: {})",
                    self.ids().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.comps.iter().map(Composition::id)
    }

    /// Compositions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Composition> {
        self.comps.iter()
    }

    /// Number of compositions.
    pub fn len(&self) -> usize {
        self.comps.len()
    }

    /// `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.comps.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
