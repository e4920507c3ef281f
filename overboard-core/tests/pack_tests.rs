mod common;

use common::*;
use pretty_assertions::assert_eq;

use overboard_core::pack::{InfoEntry, PackError, PackLoader, INFO_LOCALE, INFO_NAME};
use overboard_core::{
    ComposeResolver, DeadKey, FeedResult, KeyValue, Modifier, ModifierState,
};

const LAYOUT: &str = r#"
layout "latn_qwerty_us" {
    states = [base, shift]
    row {
        key a { base = "a" shift = "A" }
        key b { base = "b" shift = "B" }
    }
}
"#;

const CHILD_LAYOUT: &str = r#"
layout "latn_azerty_fr" extends "latn_qwerty_us" {
    row {
        key a { base = "q" shift = "Q" }
    }
}
"#;

const COMPOSE: &str = r#"
acute + "e" => "é"
grave + "e" => "è"
"#;

fn sample_pack() -> overboard_core::pack::ObkFile {
    let layouts = vec![
        obkc::compile_layout_str(LAYOUT).unwrap(),
        obkc::compile_layout_str(CHILD_LAYOUT).unwrap(),
    ];
    let sequences = obkc::compile_sequences_str(COMPOSE).unwrap();
    let info = vec![
        InfoEntry {
            id: *INFO_NAME,
            value: "Test Pack".to_string(),
        },
        InfoEntry {
            id: *INFO_LOCALE,
            value: "en-US".to_string(),
        },
    ];
    obkc::build_pack(layouts, sequences, info).unwrap()
}

#[test]
fn test_pack_round_trip() {
    let binary = pack_binary(&sample_pack());
    let loaded = PackLoader::load(&binary).unwrap();

    assert_eq!(loaded.header.layout_count, 2);
    assert_eq!(loaded.header.sequence_count, 2);
    assert_eq!(loaded.info_value(INFO_NAME), Some("Test Pack"));
    assert_eq!(loaded.info_value(INFO_LOCALE), Some("en-US"));

    let pack = loaded.assemble().unwrap();
    assert_eq!(pack.name(), Some("Test Pack"));

    let layout = pack.registry.get("latn_qwerty_us").unwrap();
    let shift = ModifierState::from(Modifier::Shift);
    assert_eq!(layout.lookup("a", shift), Some(&KeyValue::Char('A')));

    let mut resolver = ComposeResolver::new(&pack.compose);
    assert_eq!(
        resolver.feed(&KeyValue::Dead(DeadKey::Acute)),
        FeedResult::Pending
    );
    assert_eq!(
        resolver.feed(&KeyValue::Char('e')),
        FeedResult::Resolved("é".to_string())
    );
}

#[test]
fn test_pack_stores_layouts_resolved() {
    let binary = pack_binary(&sample_pack());
    let loaded = PackLoader::load(&binary).unwrap();

    // Inheritance was applied at compile time
    assert!(loaded.layouts.iter().all(|l| l.parent.is_none()));

    let pack = loaded.assemble().unwrap();
    let child = pack.registry.get("latn_azerty_fr").unwrap();
    assert_eq!(
        child.lookup("a", ModifierState::EMPTY),
        Some(&KeyValue::Char('q'))
    );
    // Inherited key and states survive the round trip
    assert_eq!(
        child.lookup("b", ModifierState::EMPTY),
        Some(&KeyValue::Char('b'))
    );
    assert_eq!(child.states().len(), 2);
}

#[test]
fn test_pack_bytes_independent_of_sequence_order() {
    let layouts = || {
        vec![
            obkc::compile_layout_str(LAYOUT).unwrap(),
            obkc::compile_layout_str(CHILD_LAYOUT).unwrap(),
        ]
    };

    let forward = obkc::compile_sequences_str(COMPOSE).unwrap();
    let mut reversed = forward.clone();
    reversed.reverse();

    let first = pack_binary(&obkc::build_pack(layouts(), forward, vec![]).unwrap());
    let second = pack_binary(&obkc::build_pack(layouts(), reversed, vec![]).unwrap());

    assert_eq!(first, second);
}

#[test]
fn test_corrupt_magic_rejected() {
    let mut binary = pack_binary(&sample_pack());
    binary[0] = b'X';

    match PackLoader::load(&binary) {
        Err(PackError::InvalidMagicCode(magic)) => assert_eq!(&magic, b"XBKP"),
        other => panic!("expected InvalidMagicCode, got {other:?}"),
    }
}

#[test]
fn test_truncated_pack_rejected() {
    let binary = pack_binary(&sample_pack());

    assert!(matches!(
        PackLoader::load(&binary[..8]),
        Err(PackError::FileTooSmall(8))
    ));
    assert!(matches!(
        PackLoader::load(&binary[..binary.len() - 3]),
        Err(PackError::Io(_))
    ));
}

#[test]
fn test_newer_vocabulary_rejected() {
    let mut binary = pack_binary(&sample_pack());
    // Vocabulary version lives at offset 6, little endian
    binary[6] = 0xFF;
    binary[7] = 0xFF;

    match PackLoader::load(&binary) {
        Err(PackError::VocabularyTooNew { pack, .. }) => assert_eq!(pack, 0xFFFF),
        other => panic!("expected VocabularyTooNew, got {other:?}"),
    }
}

#[test]
fn test_newer_major_version_rejected() {
    let mut binary = pack_binary(&sample_pack());
    binary[4] += 1;

    assert!(matches!(
        PackLoader::load(&binary),
        Err(PackError::UnsupportedVersion { .. })
    ));
}
