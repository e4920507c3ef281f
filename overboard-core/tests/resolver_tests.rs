mod common;

use common::*;
use overboard_core::{
    Command, CommitResult, ComposeResolver, ComposeState, ComposeTrie, DeadKey, FeedResult,
    KeyValue,
};

fn accents() -> ComposeTrie {
    trie_from_source(
        r#"
acute + "e"         => "é"
acute + "a"         => "á"
grave + "e"         => "è"
compose + "o" + "e" => "œ"
"#,
    )
}

#[test]
fn test_two_key_sequence_resolves() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    assert_eq!(
        resolver.feed(&KeyValue::Dead(DeadKey::Acute)),
        FeedResult::Pending
    );
    assert_eq!(
        resolver.feed(&KeyValue::Char('e')),
        FeedResult::Resolved("é".to_string())
    );
    assert_eq!(resolver.state(), ComposeState::Idle);
}

#[test]
fn test_strict_prefix_stays_pending() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    // compose + "o" is a strict prefix of exactly one sequence
    assert_eq!(
        resolver.feed(&KeyValue::Command(Command::Compose)),
        FeedResult::Pending
    );
    assert_eq!(resolver.feed(&KeyValue::Char('o')), FeedResult::Pending);
    assert_eq!(resolver.state(), ComposeState::Pending);
    assert_eq!(resolver.pending_len(), 2);

    assert_eq!(
        resolver.feed(&KeyValue::Char('e')),
        FeedResult::Resolved("œ".to_string())
    );
}

#[test]
fn test_unmatched_continuation_aborts_with_consumed_keys() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    assert_eq!(
        resolver.feed(&KeyValue::Dead(DeadKey::Acute)),
        FeedResult::Pending
    );
    // 'x' continues no sequence; everything consumed comes back for
    // literal replay, the failing key last
    assert_eq!(
        resolver.feed(&KeyValue::Char('x')),
        FeedResult::Aborted(vec![KeyValue::Dead(DeadKey::Acute), KeyValue::Char('x')])
    );
    assert_eq!(resolver.state(), ComposeState::Idle);
}

#[test]
fn test_unmatched_first_key_aborts() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    assert_eq!(
        resolver.feed(&KeyValue::Char('z')),
        FeedResult::Aborted(vec![KeyValue::Char('z')])
    );
    assert_eq!(resolver.state(), ComposeState::Idle);
}

#[test]
fn test_resolver_usable_after_abort() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    resolver.feed(&KeyValue::Dead(DeadKey::Acute));
    resolver.feed(&KeyValue::Char('x'));

    // The abort reset the cursor, the next sequence starts clean
    assert_eq!(
        resolver.feed(&KeyValue::Dead(DeadKey::Grave)),
        FeedResult::Pending
    );
    assert_eq!(
        resolver.feed(&KeyValue::Char('e')),
        FeedResult::Resolved("è".to_string())
    );
}

#[test]
fn test_ambiguous_prefix_commit_emits_candidate() {
    // "a" is both a complete sequence and a prefix of "ab"
    let trie = trie_from_source(
        r#"
"a"  => "alpha"
"ab" => "alpha-beta"
"#,
    );
    let mut resolver = ComposeResolver::new(&trie);

    assert_eq!(resolver.feed(&KeyValue::Char('a')), FeedResult::Pending);
    assert_eq!(
        resolver.commit(),
        CommitResult::Committed("alpha".to_string())
    );
    assert_eq!(resolver.state(), ComposeState::Idle);
}

#[test]
fn test_ambiguous_prefix_can_continue() {
    let trie = trie_from_source(
        r#"
"a"  => "alpha"
"ab" => "alpha-beta"
"#,
    );
    let mut resolver = ComposeResolver::new(&trie);

    assert_eq!(resolver.feed(&KeyValue::Char('a')), FeedResult::Pending);
    assert_eq!(
        resolver.feed(&KeyValue::Char('b')),
        FeedResult::Resolved("alpha-beta".to_string())
    );
}

#[test]
fn test_commit_without_candidate_rejects() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    resolver.feed(&KeyValue::Command(Command::Compose));
    resolver.feed(&KeyValue::Char('o'));

    // compose + "o" has no output of its own
    assert_eq!(
        resolver.commit(),
        CommitResult::Rejected(vec![
            KeyValue::Command(Command::Compose),
            KeyValue::Char('o')
        ])
    );
    assert_eq!(resolver.state(), ComposeState::Idle);
}

#[test]
fn test_commit_while_idle_rejects_nothing() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    assert_eq!(resolver.commit(), CommitResult::Rejected(vec![]));
}

#[test]
fn test_reset_drops_buffered_keys() {
    let trie = accents();
    let mut resolver = ComposeResolver::new(&trie);

    resolver.feed(&KeyValue::Dead(DeadKey::Acute));
    assert_eq!(resolver.state(), ComposeState::Pending);

    resolver.reset();
    assert_eq!(resolver.state(), ComposeState::Idle);
    assert_eq!(resolver.pending_len(), 0);

    // Fresh match still works
    assert_eq!(
        resolver.feed(&KeyValue::Dead(DeadKey::Acute)),
        FeedResult::Pending
    );
    assert_eq!(
        resolver.feed(&KeyValue::Char('a')),
        FeedResult::Resolved("á".to_string())
    );
}

#[test]
fn test_sessions_share_one_trie() {
    let trie = accents();
    let mut first = ComposeResolver::new(&trie);
    let mut second = ComposeResolver::new(&trie);

    // Interleaved sessions never see each other's state
    assert_eq!(first.feed(&KeyValue::Dead(DeadKey::Acute)), FeedResult::Pending);
    assert_eq!(second.feed(&KeyValue::Dead(DeadKey::Grave)), FeedResult::Pending);
    assert_eq!(
        first.feed(&KeyValue::Char('e')),
        FeedResult::Resolved("é".to_string())
    );
    assert_eq!(
        second.feed(&KeyValue::Char('e')),
        FeedResult::Resolved("è".to_string())
    );
}
