//! Feedback overrides and used-variable tracking.

use crate::expressible::Expressible;
use crate::VariableValue;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Overrides for the properties of one element, keyed by property name.
pub type PropertyOverrides = IndexMap<String, Expressible<VariableValue>>;

/// Per-element, per-property values supplied by active feedbacks.
///
/// An override always takes precedence over the element's own value for
/// that property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackOverrides {
    elements: IndexMap<String, PropertyOverrides>,
}

impl FeedbackOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an override for `property` on the element with id `element_id`.
    pub fn insert(
        &mut self,
        element_id: impl Into<String>,
        property: impl Into<String>,
        value: Expressible<VariableValue>,
    ) {
        self.elements
            .entry(element_id.into())
            .or_default()
            .insert(property.into(), value);
    }

    pub fn get(&self, element_id: &str, property: &str) -> Option<&Expressible<VariableValue>> {
        self.elements.get(element_id)?.get(property)
    }

    /// All overrides for one element.
    pub fn for_element(&self, element_id: &str) -> Option<&PropertyOverrides> {
        self.elements.get(element_id)
    }

    /// Number of elements with at least one override.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Variable ids touched during one resolution pass.
///
/// Shared by every concurrently resolving element, so insertion goes through
/// a mutex. Ids keep their first-seen order.
#[derive(Debug, Default)]
pub struct UsedVariables {
    ids: Mutex<IndexSet<String>>,
}

impl UsedVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: impl Into<String>) {
        self.lock().insert(id.into());
    }

    pub fn extend<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut set = self.lock();
        set.extend(ids.into_iter().map(Into::into));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn into_set(self) -> IndexSet<String> {
        self.ids.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, IndexSet<String>> {
        // Insertions cannot leave the set half-written, so a poisoned lock is still usable.
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
