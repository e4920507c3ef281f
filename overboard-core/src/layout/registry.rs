//! Registry construction: inheritance resolution and whole-set validation

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::key::{KeyValue, ModifierState};

use super::definition::{KeyDefinition, LayoutDefinition};
use super::layout::Layout;

type MergedRows = Vec<Vec<(String, BTreeMap<ModifierState, KeyValue>)>>;

/// All resolved layouts, indexed by identifier.
///
/// Built once from every parsed definition; inheritance is resolved as an
/// explicit graph before validation, so the registry only ever holds
/// complete layouts. Read-only after `build`, shareable across threads.
#[derive(Debug)]
pub struct LayoutRegistry {
    layouts: Vec<Layout>,
    index: HashMap<String, usize>,
}

impl LayoutRegistry {
    /// Resolve inheritance and validate every definition.
    ///
    /// Fails with [`Error::LayoutGraph`] on a duplicate identifier, an
    /// `extends` reference to an unknown layout, or an inheritance cycle;
    /// with [`Error::MalformedLayout`] when a resolved layout is
    /// incomplete.
    pub fn build(definitions: Vec<LayoutDefinition>) -> Result<LayoutRegistry> {
        let mut def_index: HashMap<String, usize> = HashMap::new();
        for (i, def) in definitions.iter().enumerate() {
            if def_index.insert(def.id.clone(), i).is_some() {
                return Err(Error::LayoutGraph(format!(
                    "duplicate layout identifier '{}'",
                    def.id
                )));
            }
        }

        let mut resolved: HashMap<String, Layout> = HashMap::new();
        let mut visiting: Vec<String> = Vec::new();
        for def in &definitions {
            resolve_layout(&def.id, &definitions, &def_index, &mut resolved, &mut visiting)?;
        }

        // Declaration order, stable for `list` and serialization.
        let mut layouts = Vec::with_capacity(definitions.len());
        let mut index = HashMap::new();
        for def in &definitions {
            let layout = resolved
                .remove(&def.id)
                .ok_or_else(|| Error::LayoutGraph(format!("unresolved layout '{}'", def.id)))?;
            index.insert(def.id.clone(), layouts.len());
            layouts.push(layout);
        }

        Ok(LayoutRegistry { layouts, index })
    }

    pub fn get(&self, id: &str) -> Result<&Layout> {
        self.index
            .get(id)
            .map(|&i| &self.layouts[i])
            .ok_or_else(|| Error::UnknownLayout(id.to_string()))
    }

    /// Identifiers in declaration order.
    pub fn list(&self) -> impl Iterator<Item = &str> {
        self.layouts.iter().map(|l| l.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layout> {
        self.layouts.iter()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

fn resolve_layout(
    id: &str,
    definitions: &[LayoutDefinition],
    def_index: &HashMap<String, usize>,
    resolved: &mut HashMap<String, Layout>,
    visiting: &mut Vec<String>,
) -> Result<()> {
    if resolved.contains_key(id) {
        return Ok(());
    }
    if let Some(start) = visiting.iter().position(|v| v == id) {
        let mut path: Vec<&str> = visiting[start..].iter().map(String::as_str).collect();
        path.push(id);
        return Err(Error::LayoutGraph(format!(
            "inheritance cycle: {}",
            path.join(" -> ")
        )));
    }

    let def = &definitions[def_index[id]];
    let (states, rows) = match &def.parent {
        Some(parent_id) => {
            if !def_index.contains_key(parent_id) {
                return Err(Error::LayoutGraph(format!(
                    "layout '{}' extends unknown layout '{}'",
                    id, parent_id
                )));
            }
            visiting.push(id.to_string());
            let result = resolve_layout(parent_id, definitions, def_index, resolved, visiting);
            visiting.pop();
            result?;

            let parent = &resolved[parent_id];
            let states = if def.states.is_empty() {
                parent.states().to_vec()
            } else {
                def.states.clone()
            };
            let rows = merge_onto_parent(parent, def, &states)?;
            (states, rows)
        }
        None => (def.states.clone(), own_rows(def)?),
    };

    let layout = Layout::build(id.to_string(), states, rows)?;
    resolved.insert(id.to_string(), layout);
    Ok(())
}

/// A definition's own rows, with per-key duplicate-state detection.
fn own_rows(def: &LayoutDefinition) -> Result<MergedRows> {
    def.rows
        .iter()
        .map(|row| {
            row.keys
                .iter()
                .map(|key| Ok((key.position.clone(), key_mappings(&def.id, key)?)))
                .collect()
        })
        .collect()
}

/// Overlay a child definition onto its resolved parent.
///
/// Positions the parent already has are patched state by state; positions
/// only the child has keep the child's row grouping and append after the
/// parent's rows. Parent mappings for states the child no longer declares
/// are dropped, so a child may narrow the supported set.
fn merge_onto_parent(
    parent: &Layout,
    child: &LayoutDefinition,
    states: &[ModifierState],
) -> Result<MergedRows> {
    let mut rows: MergedRows = parent
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|key| {
                    let mappings = key
                        .mappings()
                        .filter(|(state, _)| states.contains(state))
                        .map(|(state, value)| (state, value.clone()))
                        .collect();
                    (key.position().to_string(), mappings)
                })
                .collect()
        })
        .collect();

    let mut position_of: HashMap<String, (usize, usize)> = HashMap::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, (position, _)) in row.iter().enumerate() {
            position_of.insert(position.clone(), (r, c));
        }
    }

    for child_row in &child.rows {
        let mut appended: Vec<(String, BTreeMap<ModifierState, KeyValue>)> = Vec::new();
        for key in &child_row.keys {
            let patch = key_mappings(&child.id, key)?;
            match position_of.get(&key.position) {
                Some(&(r, c)) => {
                    rows[r][c].1.extend(patch);
                }
                None => {
                    if appended.iter().any(|(p, _)| *p == key.position) {
                        return Err(Error::MalformedLayout {
                            layout: child.id.clone(),
                            reason: format!("key '{}': duplicate position", key.position),
                        });
                    }
                    appended.push((key.position.clone(), patch));
                }
            }
        }
        if !appended.is_empty() {
            for (c, (position, _)) in appended.iter().enumerate() {
                position_of.insert(position.clone(), (rows.len(), c));
            }
            rows.push(appended);
        }
    }

    Ok(rows)
}

fn key_mappings(
    layout_id: &str,
    key: &KeyDefinition,
) -> Result<BTreeMap<ModifierState, KeyValue>> {
    let mut map = BTreeMap::new();
    for (state, value) in &key.mappings {
        if map.insert(*state, value.clone()).is_some() {
            return Err(Error::MalformedLayout {
                layout: layout_id.to_string(),
                reason: format!(
                    "key '{}': duplicate mapping for state '{}'",
                    key.position, state
                ),
            });
        }
    }
    Ok(map)
}
