//! Labels (hypotheses) and their string identifiers.
//!
//! A label is any comparable, hashable value chosen by the embedding
//! application. The classifier only needs to turn labels into stable strings
//! and back when a model is dumped or loaded; that conversion is supplied as a
//! [`LabelCodec`] rather than kept in global state.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Bounds every label type must satisfy.
pub trait Label: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Label for T {}

/// Converts labels to stable string identifiers and back.
pub trait LabelCodec<L> {
    /// Stable identifier used in serialized models.
    fn label_id(&self, label: &L) -> String;

    /// Rebuild a label from its identifier; `None` if unregistered.
    fn label_from_id(&self, id: &str) -> Option<L>;
}

/// Identity codec for plain string labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringLabels;

impl LabelCodec<String> for StringLabels {
    fn label_id(&self, label: &String) -> String {
        label.clone()
    }

    fn label_from_id(&self, id: &str) -> Option<String> {
        Some(id.to_string())
    }
}

/// Registered mapping from identifiers to application label values.
///
/// Identifiers come from the labels' `Display` output.
#[derive(Debug, Clone)]
pub struct LabelRegistry<L> {
    by_id: HashMap<String, L>,
}

impl<L: Label + fmt::Display> LabelRegistry<L> {
    pub fn new(labels: impl IntoIterator<Item = L>) -> Self {
        let by_id = labels
            .into_iter()
            .map(|label| (label.to_string(), label))
            .collect();
        Self { by_id }
    }

    /// Register one more label, replacing any label with the same identifier.
    pub fn register(&mut self, label: L) {
        self.by_id.insert(label.to_string(), label);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<L: Label + fmt::Display> LabelCodec<L> for LabelRegistry<L> {
    fn label_id(&self, label: &L) -> String {
        label.to_string()
    }

    fn label_from_id(&self, id: &str) -> Option<L> {
        self.by_id.get(id).cloned()
    }
}
