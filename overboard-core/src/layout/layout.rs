//! Resolved, validated layouts

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::key::{KeyValue, ModifierState};

use super::definition::{KeyDefinition, LayoutDefinition, RowDefinition};

/// One key of a resolved layout. Mappings are kept in state order so
/// iteration, and therefore pack serialization, is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    position: String,
    mappings: BTreeMap<ModifierState, KeyValue>,
}

impl Key {
    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn value(&self, state: ModifierState) -> Option<&KeyValue> {
        self.mappings.get(&state)
    }

    pub fn mappings(&self) -> impl Iterator<Item = (ModifierState, &KeyValue)> {
        self.mappings.iter().map(|(s, v)| (*s, v))
    }
}

/// An immutable layout where every key resolves every supported state.
///
/// Instances only come out of [`Layout::build`], which enforces the
/// completeness invariant, so `lookup` with a supported state on an
/// existing position never comes back empty.
#[derive(Debug, Clone)]
pub struct Layout {
    id: String,
    states: Vec<ModifierState>,
    rows: Vec<Vec<Key>>,
    positions: HashMap<String, (usize, usize)>,
}

impl Layout {
    /// Validate and freeze a fully merged layout.
    ///
    /// Errors are [`Error::MalformedLayout`]: no supported states, a
    /// duplicate position, a mapping for an undeclared state, or a key
    /// missing a mapping for a supported state.
    pub fn build(
        id: String,
        states: Vec<ModifierState>,
        rows: Vec<Vec<(String, BTreeMap<ModifierState, KeyValue>)>>,
    ) -> Result<Layout> {
        if states.is_empty() {
            return Err(Error::MalformedLayout {
                layout: id,
                reason: "no supported states declared".to_string(),
            });
        }

        let mut positions = HashMap::new();
        let mut built_rows = Vec::with_capacity(rows.len());

        for (row_idx, row) in rows.into_iter().enumerate() {
            let mut built_row = Vec::with_capacity(row.len());
            for (position, mappings) in row {
                if positions
                    .insert(position.clone(), (row_idx, built_row.len()))
                    .is_some()
                {
                    return Err(Error::MalformedLayout {
                        layout: id,
                        reason: format!("key '{}': duplicate position", position),
                    });
                }
                for state in mappings.keys() {
                    if !states.contains(state) {
                        return Err(Error::MalformedLayout {
                            layout: id,
                            reason: format!(
                                "key '{}': mapping for undeclared state '{}'",
                                position, state
                            ),
                        });
                    }
                }
                for state in &states {
                    if !mappings.contains_key(state) {
                        return Err(Error::MalformedLayout {
                            layout: id,
                            reason: format!(
                                "key '{}': no mapping for state '{}'",
                                position, state
                            ),
                        });
                    }
                }
                built_row.push(Key { position, mappings });
            }
            built_rows.push(built_row);
        }

        Ok(Layout {
            id,
            states,
            rows: built_rows,
            positions,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Supported modifier states in declaration order.
    pub fn states(&self) -> &[ModifierState] {
        &self.states
    }

    pub fn supports(&self, state: ModifierState) -> bool {
        self.states.contains(&state)
    }

    /// The meaning of a key under a modifier state. `None` only for an
    /// unknown position or an unsupported state.
    pub fn lookup(&self, position: &str, state: ModifierState) -> Option<&KeyValue> {
        self.key(position)?.value(state)
    }

    pub fn key(&self, position: &str) -> Option<&Key> {
        let (row, col) = *self.positions.get(position)?;
        Some(&self.rows[row][col])
    }

    pub fn rows(&self) -> &[Vec<Key>] {
        &self.rows
    }

    /// All keys in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.rows.iter().flat_map(|r| r.iter())
    }

    pub fn key_count(&self) -> usize {
        self.positions.len()
    }

    /// Flatten back to a definition, e.g. for pack serialization. The
    /// result carries no parent; a resolved layout already is the merge
    /// of its whole inheritance chain.
    pub fn to_definition(&self) -> LayoutDefinition {
        LayoutDefinition {
            id: self.id.clone(),
            parent: None,
            states: self.states.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| RowDefinition {
                    keys: row
                        .iter()
                        .map(|key| KeyDefinition {
                            position: key.position.clone(),
                            mappings: key.mappings().map(|(s, v)| (s, v.clone())).collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
