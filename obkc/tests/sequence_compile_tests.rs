use pretty_assertions::assert_eq;

use obkc::{
    build_pack, compile_sequence_source, compile_sequences_str, DeadKey, Error, KeyValue,
    KeyVocabulary,
};

#[test]
fn test_chain_elements_compile() {
    let source = r#"
/* @NAME = "accents" */
acute + "e" => "é"
"ab" + U0301 => "x"
"#;
    let sequences = compile_sequences_str(source).unwrap();
    assert_eq!(sequences.len(), 2);

    assert_eq!(
        sequences[0].chain,
        vec![KeyValue::Dead(DeadKey::Acute), KeyValue::Char('e')]
    );
    assert_eq!(sequences[0].output, "é");

    // A quoted run explodes into one element per character
    assert_eq!(
        sequences[1].chain,
        vec![
            KeyValue::Char('a'),
            KeyValue::Char('b'),
            KeyValue::Char('\u{0301}')
        ]
    );
}

#[test]
fn test_options_come_from_comments() {
    let source = r#"
/* @NAME = "accents" */
// @LOCALE = "fr-FR"
acute + "e" => "é"
"#;
    let vocabulary = KeyVocabulary::new();
    let (_, options) = compile_sequence_source(source, &vocabulary).unwrap();

    assert_eq!(options.get("NAME").map(String::as_str), Some("accents"));
    assert_eq!(options.get("LOCALE").map(String::as_str), Some("fr-FR"));
}

#[test]
fn test_output_is_nfc_normalized() {
    // Combining acute after "e" versus the precomposed character
    let decomposed = compile_sequences_str("acute + \"e\" => \"e\" + U0301\n").unwrap();
    let precomposed = compile_sequences_str("acute + \"e\" => \"é\"\n").unwrap();

    assert_eq!(decomposed, precomposed);
    assert_eq!(decomposed[0].output, "é");
}

#[test]
fn test_multi_piece_output_concatenates() {
    let sequences = compile_sequences_str("\"q\" => \"x\" + \"y\" + U0021\n").unwrap();
    assert_eq!(sequences[0].output, "xy!");
}

#[test]
fn test_conflicting_outputs_rejected() {
    let sequences = compile_sequences_str(
        r#"
acute + "e" => "é"
acute + "e" => "á"
"#,
    )
    .unwrap();

    match build_pack(vec![], sequences, vec![]) {
        Err(Error::ConflictingSequence(report)) => {
            assert_eq!(report.conflicts.len(), 1);
            let conflict = &report.conflicts[0];
            assert_eq!(
                conflict.chain,
                vec![KeyValue::Dead(DeadKey::Acute), KeyValue::Char('e')]
            );
            // Outputs come out sorted, not in definition order
            assert_eq!(conflict.outputs, ("á".to_string(), "é".to_string()));
        }
        other => panic!("expected ConflictingSequence, got {other:?}"),
    }
}

#[test]
fn test_conflicts_collected_and_sorted() {
    let sequences = compile_sequences_str(
        r#"
"b" => "1"
"b" => "2"
"a" => "3"
"a" => "4"
"#,
    )
    .unwrap();

    match build_pack(vec![], sequences, vec![]) {
        Err(Error::ConflictingSequence(report)) => {
            assert_eq!(report.conflicts.len(), 2);
            assert_eq!(report.conflicts[0].chain, vec![KeyValue::Char('a')]);
            assert_eq!(report.conflicts[1].chain, vec![KeyValue::Char('b')]);
        }
        other => panic!("expected ConflictingSequence, got {other:?}"),
    }
}

#[test]
fn test_identical_duplicates_collapse() {
    let sequences = compile_sequences_str(
        r#"
acute + "e" => "é"
acute + "e" => "é"
"#,
    )
    .unwrap();
    assert_eq!(sequences.len(), 2);

    let pack = build_pack(vec![], sequences, vec![]).unwrap();
    assert_eq!(pack.sequences.len(), 1);
    assert_eq!(pack.header.sequence_count, 1);
}
