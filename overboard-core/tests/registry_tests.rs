mod common;

use common::*;
use overboard_core::{Error, KeyValue, Modifier, ModifierState};

const QWERTY_US: &str = r#"
layout "qwerty_us" {
    states = [base, shift]
    row {
        key q { base = "q" shift = "Q" }
        key w { base = "w" shift = "W" }
        key e { base = "e" shift = "E" }
    }
    row {
        key y { base = "y" shift = "Y" }
        key z { base = "z" shift = "Z" }
    }
}
"#;

const QWERTZ_DE: &str = r#"
layout "qwertz_de" extends "qwerty_us" {
    row {
        key y { base = "z" shift = "Z" }
        key z { base = "y" shift = "Y" }
    }
    row {
        key ue { base = "ü" shift = "Ü" }
    }
}
"#;

#[test]
fn test_lookup_through_registry() {
    let registry = registry_from_sources(&[QWERTY_US]).unwrap();
    let layout = registry.get("qwerty_us").unwrap();
    let shift = ModifierState::from(Modifier::Shift);

    assert_eq!(
        layout.lookup("q", ModifierState::EMPTY),
        Some(&KeyValue::Char('q'))
    );
    assert_eq!(layout.lookup("q", shift), Some(&KeyValue::Char('Q')));
    assert_eq!(layout.lookup("missing", ModifierState::EMPTY), None);

    match registry.get("dvorak") {
        Err(Error::UnknownLayout(id)) => assert_eq!(id, "dvorak"),
        other => panic!("expected UnknownLayout, got {other:?}"),
    }
}

#[test]
fn test_child_patches_parent_keys() {
    let registry = registry_from_sources(&[QWERTY_US, QWERTZ_DE]).unwrap();
    let child = registry.get("qwertz_de").unwrap();
    let shift = ModifierState::from(Modifier::Shift);

    // Patched positions carry the child's values
    assert_eq!(
        child.lookup("y", ModifierState::EMPTY),
        Some(&KeyValue::Char('z'))
    );
    assert_eq!(
        child.lookup("z", ModifierState::EMPTY),
        Some(&KeyValue::Char('y'))
    );

    // Untouched positions come from the parent
    assert_eq!(
        child.lookup("w", ModifierState::EMPTY),
        Some(&KeyValue::Char('w'))
    );
    assert_eq!(child.lookup("e", shift), Some(&KeyValue::Char('E')));

    // The parent itself is unaffected
    let parent = registry.get("qwerty_us").unwrap();
    assert_eq!(
        parent.lookup("y", ModifierState::EMPTY),
        Some(&KeyValue::Char('y'))
    );
    assert_eq!(parent.key_count(), 5);
}

#[test]
fn test_child_appends_new_keys_after_parent_rows() {
    let registry = registry_from_sources(&[QWERTY_US, QWERTZ_DE]).unwrap();
    let child = registry.get("qwertz_de").unwrap();

    assert_eq!(
        child.lookup("ue", ModifierState::EMPTY),
        Some(&KeyValue::Char('ü'))
    );
    assert_eq!(child.key_count(), 6);

    // Parent rows keep their geometry; the new position lands in an
    // appended row
    let rows = child.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 3);
    assert_eq!(rows[1].len(), 2);
    assert_eq!(rows[2].len(), 1);
    assert_eq!(rows[2][0].position(), "ue");
}

#[test]
fn test_partial_patch_keeps_other_states() {
    let child = r#"
layout "symbols" extends "qwerty_us" {
    row {
        key q { base = "@" }
    }
}
"#;
    let registry = registry_from_sources(&[QWERTY_US, child]).unwrap();
    let layout = registry.get("symbols").unwrap();
    let shift = ModifierState::from(Modifier::Shift);

    assert_eq!(
        layout.lookup("q", ModifierState::EMPTY),
        Some(&KeyValue::Char('@'))
    );
    // The shift mapping was not patched and survives from the parent
    assert_eq!(layout.lookup("q", shift), Some(&KeyValue::Char('Q')));
}

#[test]
fn test_child_narrows_supported_states() {
    let child = r#"
layout "base_only" extends "qwerty_us" {
    states = [base]
    row {
        key extra { base = "!" }
    }
}
"#;
    let registry = registry_from_sources(&[QWERTY_US, child]).unwrap();
    let layout = registry.get("base_only").unwrap();
    let shift = ModifierState::from(Modifier::Shift);

    assert_eq!(layout.states(), &[ModifierState::EMPTY]);
    assert!(!layout.supports(shift));
    assert_eq!(layout.lookup("q", shift), None);
    assert_eq!(
        layout.lookup("q", ModifierState::EMPTY),
        Some(&KeyValue::Char('q'))
    );
}

#[test]
fn test_child_inherits_states_when_silent() {
    let registry = registry_from_sources(&[QWERTY_US, QWERTZ_DE]).unwrap();
    let child = registry.get("qwertz_de").unwrap();
    let shift = ModifierState::from(Modifier::Shift);

    assert_eq!(child.states().len(), 2);
    assert!(child.supports(shift));
}

#[test]
fn test_grandchild_resolves_through_chain() {
    let middle = r#"
layout "middle" extends "qwerty_us" {
    row {
        key q { base = "1" }
    }
}
"#;
    let leaf = r#"
layout "leaf" extends "middle" {
    row {
        key w { base = "2" }
    }
}
"#;
    // Declaration order does not have to follow the inheritance order
    let registry = registry_from_sources(&[leaf, QWERTY_US, middle]).unwrap();
    let layout = registry.get("leaf").unwrap();

    assert_eq!(
        layout.lookup("q", ModifierState::EMPTY),
        Some(&KeyValue::Char('1'))
    );
    assert_eq!(
        layout.lookup("w", ModifierState::EMPTY),
        Some(&KeyValue::Char('2'))
    );
    assert_eq!(
        layout.lookup("e", ModifierState::EMPTY),
        Some(&KeyValue::Char('e'))
    );

    let ids: Vec<&str> = registry.list().collect();
    assert_eq!(ids, vec!["leaf", "qwerty_us", "middle"]);
}

#[test]
fn test_unknown_parent_rejected() {
    let orphan = r#"
layout "orphan" extends "missing" {
    row {
        key q { base = "q" }
    }
}
"#;
    match registry_from_sources(&[orphan]) {
        Err(Error::LayoutGraph(message)) => {
            assert!(message.contains("extends unknown layout 'missing'"), "{message}");
        }
        other => panic!("expected LayoutGraph error, got {other:?}"),
    }
}

#[test]
fn test_inheritance_cycle_rejected() {
    let first = r#"
layout "first" extends "second" {
    row {
        key q { base = "q" }
    }
}
"#;
    let second = r#"
layout "second" extends "first" {
    row {
        key w { base = "w" }
    }
}
"#;
    match registry_from_sources(&[first, second]) {
        Err(Error::LayoutGraph(message)) => {
            assert!(message.contains("inheritance cycle"), "{message}");
        }
        other => panic!("expected LayoutGraph error, got {other:?}"),
    }
}

#[test]
fn test_duplicate_identifier_rejected() {
    match registry_from_sources(&[QWERTY_US, QWERTY_US]) {
        Err(Error::LayoutGraph(message)) => {
            assert!(message.contains("duplicate layout identifier"), "{message}");
        }
        other => panic!("expected LayoutGraph error, got {other:?}"),
    }
}

#[test]
fn test_incomplete_parentless_layout_rejected() {
    // Missing the shift mapping on one key
    let incomplete = r#"
layout "incomplete" {
    states = [base, shift]
    row {
        key q { base = "q" }
    }
}
"#;
    match registry_from_sources(&[incomplete]) {
        Err(Error::MalformedLayout { layout, reason }) => {
            assert_eq!(layout, "incomplete");
            assert!(reason.contains("no mapping for state 'shift'"), "{reason}");
        }
        other => panic!("expected MalformedLayout, got {other:?}"),
    }
}

#[test]
fn test_patch_for_dropped_state_rejected() {
    let child = r#"
layout "narrowed" extends "qwerty_us" {
    states = [base]
    row {
        key q { base = "@" shift = "Q" }
    }
}
"#;
    match registry_from_sources(&[QWERTY_US, child]) {
        Err(Error::MalformedLayout { layout, reason }) => {
            assert_eq!(layout, "narrowed");
            assert!(reason.contains("undeclared state 'shift'"), "{reason}");
        }
        other => panic!("expected MalformedLayout, got {other:?}"),
    }
}
