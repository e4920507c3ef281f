//! Parsed layout definitions, before inheritance and validation

use crate::key::{KeyValue, ModifierState};

/// One key position with its per-state mappings, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDefinition {
    pub position: String,
    pub mappings: Vec<(ModifierState, KeyValue)>,
}

impl KeyDefinition {
    pub fn mapping_for(&self, state: ModifierState) -> Option<&KeyValue> {
        self.mappings
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, v)| v)
    }
}

/// One physical row of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDefinition {
    pub keys: Vec<KeyDefinition>,
}

/// A layout as parsed from a single `.obl` source, before the registry
/// resolves inheritance and checks completeness.
///
/// `states` lists the modifier states the layout supports, in declaration
/// order. A layout with a `parent` may leave it empty to inherit the
/// parent's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDefinition {
    pub id: String,
    pub parent: Option<String>,
    pub states: Vec<ModifierState>,
    pub rows: Vec<RowDefinition>,
}

impl LayoutDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        LayoutDefinition {
            id: id.into(),
            parent: None,
            states: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|r| r.keys.len()).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.rows.iter().flat_map(|r| r.keys.iter())
    }
}
