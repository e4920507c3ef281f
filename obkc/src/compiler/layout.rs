use std::collections::HashSet;

use overboard_core::{
    Error, KeyDefinition, KeyValue, KeyVocabulary, LayoutDefinition, LayoutRegistry,
    ModifierState, RowDefinition,
};

use crate::parser::ast::{KeyDecl, LayoutFile, StateExpr, ValueExpr};

use super::{process_string_escapes, unicode_char};

/// Lowers a parsed layout file to a [`LayoutDefinition`].
///
/// Name resolution happens here; structural validation (completeness,
/// inheritance) belongs to [`LayoutRegistry`]. A parentless layout gets
/// that validation immediately since it cannot change once compiled, a
/// layout with `extends` is only checked after the registry merges it
/// onto its base.
pub struct LayoutCompiler<'a> {
    vocabulary: &'a KeyVocabulary,
}

impl<'a> LayoutCompiler<'a> {
    pub fn new(vocabulary: &'a KeyVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn compile(&self, file: &LayoutFile) -> Result<LayoutDefinition, Error> {
        let mut states = Vec::new();
        for expr in &file.states {
            let state = self.resolve_state_expr(expr)?;
            if states.contains(&state) {
                return Err(Error::MalformedLayout {
                    layout: file.id.clone(),
                    reason: format!("duplicate declared state '{}'", state),
                });
            }
            states.push(state);
        }

        let mut seen_positions = HashSet::new();
        let mut rows = Vec::new();
        for row in &file.rows {
            let mut keys = Vec::new();
            for key in &row.keys {
                keys.push(self.compile_key(file, key, &states, &mut seen_positions)?);
            }
            rows.push(RowDefinition { keys });
        }

        let definition = LayoutDefinition {
            id: file.id.clone(),
            parent: file.extends.clone(),
            states,
            rows,
        };

        if definition.parent.is_none() {
            LayoutRegistry::build(vec![definition.clone()])?;
        }

        Ok(definition)
    }

    fn compile_key(
        &self,
        file: &LayoutFile,
        key: &KeyDecl,
        declared: &[ModifierState],
        seen_positions: &mut HashSet<String>,
    ) -> Result<KeyDefinition, Error> {
        if !seen_positions.insert(key.position.clone()) {
            return Err(Error::MalformedLayout {
                layout: file.id.clone(),
                reason: format!("key '{}': duplicate position", key.position),
            });
        }

        let mut mappings: Vec<(ModifierState, KeyValue)> = Vec::new();
        for mapping in &key.mappings {
            let state = self.resolve_state_expr(&mapping.state)?;
            if mappings.iter().any(|(s, _)| *s == state) {
                return Err(Error::MalformedLayout {
                    layout: file.id.clone(),
                    reason: format!(
                        "key '{}': duplicate mapping for state '{}'",
                        key.position, state
                    ),
                });
            }
            // Files that declare no states inherit them from the base
            // layout, so the check has to wait for the registry merge.
            if !declared.is_empty() && !declared.contains(&state) {
                return Err(Error::MalformedLayout {
                    layout: file.id.clone(),
                    reason: format!(
                        "key '{}': mapping for undeclared state '{}'",
                        key.position, state
                    ),
                });
            }
            let value = self.resolve_value(file, &key.position, &mapping.value, mapping.line)?;
            mappings.push((state, value));
        }

        Ok(KeyDefinition {
            position: key.position.clone(),
            mappings,
        })
    }

    fn resolve_state_expr(&self, expr: &StateExpr) -> Result<ModifierState, Error> {
        if expr.names.iter().any(|n| n == "base") {
            if expr.names.len() > 1 {
                return Err(Error::Parse {
                    line: expr.line,
                    message: "'base' cannot be combined with modifiers".to_string(),
                });
            }
            return Ok(ModifierState::EMPTY);
        }

        let mut state = ModifierState::EMPTY;
        for name in &expr.names {
            let modifier = match self.vocabulary.resolve(name)? {
                KeyValue::Modifier(m) => m,
                _ => {
                    return Err(Error::Parse {
                        line: expr.line,
                        message: format!("'{}' is not a modifier", name),
                    })
                }
            };
            if state.contains(modifier) {
                return Err(Error::Parse {
                    line: expr.line,
                    message: format!("duplicate modifier '{}' in state", name),
                });
            }
            state = state.with(modifier);
        }
        Ok(state)
    }

    fn resolve_value(
        &self,
        file: &LayoutFile,
        position: &str,
        value: &ValueExpr,
        line: usize,
    ) -> Result<KeyValue, Error> {
        match value {
            ValueExpr::String(s) => {
                let text = process_string_escapes(s, line)?;
                Ok(KeyValue::from_text(&text))
            }
            ValueExpr::Unicode(code) => Ok(KeyValue::Char(unicode_char(*code, line)?)),
            ValueExpr::Name(name) => {
                self.vocabulary
                    .resolve(name)
                    .map_err(|_| Error::MalformedLayout {
                        layout: file.id.clone(),
                        reason: format!("key '{}': unknown meaning name '{}'", position, name),
                    })
            }
        }
    }
}
