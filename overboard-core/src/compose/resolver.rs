//! Incremental compose matching for one input session

use crate::key::KeyValue;

use super::trie::ComposeTrie;

/// Outcome of feeding one key to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedResult {
    /// The key extended a live sequence; more keys may follow.
    Pending,
    /// A sequence completed unambiguously. The resolver has reset.
    Resolved(String),
    /// No compiled sequence continues with this key. Carries everything
    /// the resolver consumed, the failing key last, for the caller to
    /// replay as literal input. The resolver has reset.
    Aborted(Vec<KeyValue>),
}

/// Outcome of an explicit commit while a sequence is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResult {
    /// The pending position was itself a complete sequence.
    Committed(String),
    /// Nothing to emit; carries the consumed keys for literal replay.
    Rejected(Vec<KeyValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    Idle,
    Pending,
}

/// A cursor into a shared [`ComposeTrie`].
///
/// One resolver per input context; it owns its position and buffered keys
/// and the trie stays read-only, so sessions never synchronize. `Resolved`
/// and `Aborted` reset the cursor on the way out; timing policy ("pending
/// too long") lives with the caller, which signals it through [`commit`].
///
/// [`commit`]: ComposeResolver::commit
pub struct ComposeResolver<'a> {
    trie: &'a ComposeTrie,
    node: usize,
    buffered: Vec<KeyValue>,
}

impl<'a> ComposeResolver<'a> {
    pub fn new(trie: &'a ComposeTrie) -> Self {
        ComposeResolver {
            trie,
            node: ComposeTrie::ROOT,
            buffered: Vec::new(),
        }
    }

    /// Advance by one key.
    ///
    /// A child that carries an output and no further children resolves
    /// immediately. A child with children stays pending even when it has
    /// an output of its own; that output becomes the commit candidate.
    pub fn feed(&mut self, key: &KeyValue) -> FeedResult {
        match self.trie.child(self.node, key) {
            Some(child) => {
                if let Some(output) = self.trie.output(child) {
                    if !self.trie.has_children(child) {
                        let output = output.to_string();
                        self.reset();
                        return FeedResult::Resolved(output);
                    }
                }
                self.node = child;
                self.buffered.push(key.clone());
                FeedResult::Pending
            }
            None => {
                let mut consumed = std::mem::take(&mut self.buffered);
                consumed.push(key.clone());
                self.node = ComposeTrie::ROOT;
                FeedResult::Aborted(consumed)
            }
        }
    }

    /// Commit the pending position now, without waiting for further keys.
    ///
    /// Emits the current node's output when the buffered chain is itself a
    /// complete sequence; otherwise hands the buffered keys back. Resets
    /// either way, so committing while idle yields `Rejected(vec![])`.
    pub fn commit(&mut self) -> CommitResult {
        let result = match self.trie.output(self.node) {
            Some(output) if self.node != ComposeTrie::ROOT => {
                CommitResult::Committed(output.to_string())
            }
            _ => CommitResult::Rejected(std::mem::take(&mut self.buffered)),
        };
        self.reset();
        result
    }

    /// Force `Idle`, dropping any buffered keys. Used on focus change or
    /// explicit cancellation.
    pub fn reset(&mut self) {
        self.node = ComposeTrie::ROOT;
        self.buffered.clear();
    }

    pub fn state(&self) -> ComposeState {
        if self.node == ComposeTrie::ROOT {
            ComposeState::Idle
        } else {
            ComposeState::Pending
        }
    }

    /// Number of keys consumed by the pending sequence.
    pub fn pending_len(&self) -> usize {
        self.buffered.len()
    }
}
