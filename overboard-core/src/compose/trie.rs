//! Prefix tree over key values, built once and read-only afterwards

use crate::error::{ConflictReport, Error, Result, SequenceConflict};
use crate::key::KeyValue;

use std::collections::BTreeMap;

/// One compose rule: an ordered, non-empty chain of key values and the
/// output it produces. The derived order (chain first, then output) is the
/// canonical sort used for deterministic compilation and conflict reports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ComposeSequence {
    pub chain: Vec<KeyValue>,
    pub output: String,
}

#[derive(Debug, Clone)]
struct Node {
    /// Terminal output, present when the path from the root to this node
    /// is a complete sequence. A node may carry both an output and
    /// children when that sequence is also a prefix of longer ones.
    output: Option<String>,
    /// Ordered so trie walks are independent of insertion order.
    children: BTreeMap<KeyValue, usize>,
}

impl Node {
    fn new() -> Self {
        Node {
            output: None,
            children: BTreeMap::new(),
        }
    }
}

/// The compiled form of a sequence set: a trie keyed by [`KeyValue`].
///
/// Nodes live in an arena indexed by `usize`; the root is index 0 and
/// never carries an output. Cursors ([`super::ComposeResolver`]) walk the
/// shared trie by index, so any number of input sessions can read it
/// concurrently.
#[derive(Debug, Clone)]
pub struct ComposeTrie {
    nodes: Vec<Node>,
    sequence_count: usize,
}

impl ComposeTrie {
    pub(crate) const ROOT: usize = 0;

    pub fn new() -> Self {
        ComposeTrie {
            nodes: vec![Node::new()],
            sequence_count: 0,
        }
    }

    /// Compile a whole definition set in one deterministic pass.
    ///
    /// Sequences are sorted by chain content before insertion, so any
    /// permutation of the input yields an identical trie. Conflicting
    /// definitions (same chain, different outputs) are collected across
    /// the entire set and reported together, sorted by chain; identical
    /// duplicates collapse silently.
    pub fn from_sequences(mut sequences: Vec<ComposeSequence>) -> Result<ComposeTrie> {
        for seq in &sequences {
            if seq.chain.is_empty() {
                return Err(Error::InvalidSequence(format!(
                    "empty chain for output {:?}",
                    seq.output
                )));
            }
        }
        sequences.sort();
        sequences.dedup();

        let mut conflicts = Vec::new();
        for pair in sequences.windows(2) {
            if pair[0].chain == pair[1].chain {
                conflicts.push(SequenceConflict {
                    chain: pair[0].chain.clone(),
                    outputs: (pair[0].output.clone(), pair[1].output.clone()),
                });
            }
        }
        if !conflicts.is_empty() {
            return Err(Error::ConflictingSequence(ConflictReport { conflicts }));
        }

        let mut trie = ComposeTrie::new();
        for seq in sequences {
            trie.insert(&seq.chain, &seq.output)?;
        }
        Ok(trie)
    }

    /// Insert one sequence. Returns `false` when an identical sequence was
    /// already present (a harmless duplicate).
    pub fn insert(&mut self, chain: &[KeyValue], output: &str) -> Result<bool> {
        if chain.is_empty() {
            return Err(Error::InvalidSequence(format!(
                "empty chain for output {:?}",
                output
            )));
        }

        let mut node = Self::ROOT;
        for key in chain {
            node = match self.nodes[node].children.get(key) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[node].children.insert(key.clone(), child);
                    child
                }
            };
        }

        match &self.nodes[node].output {
            None => {
                self.nodes[node].output = Some(output.to_string());
                self.sequence_count += 1;
                Ok(true)
            }
            Some(existing) if existing == output => Ok(false),
            Some(existing) => {
                let mut outputs = (existing.clone(), output.to_string());
                if outputs.1 < outputs.0 {
                    std::mem::swap(&mut outputs.0, &mut outputs.1);
                }
                Err(Error::ConflictingSequence(ConflictReport {
                    conflicts: vec![SequenceConflict {
                        chain: chain.to_vec(),
                        outputs,
                    }],
                }))
            }
        }
    }

    /// The output for an exact chain, if one was compiled.
    pub fn lookup(&self, chain: &[KeyValue]) -> Option<&str> {
        let mut node = Self::ROOT;
        for key in chain {
            node = *self.nodes[node].children.get(key)?;
        }
        self.nodes[node].output.as_deref()
    }

    /// Every compiled sequence in chain order, independent of how the trie
    /// was built. Pack serialization and equality checks go through this.
    pub fn sequences(&self) -> Vec<ComposeSequence> {
        let mut out = Vec::with_capacity(self.sequence_count);
        let mut chain = Vec::new();
        self.collect(Self::ROOT, &mut chain, &mut out);
        out
    }

    fn collect(&self, node: usize, chain: &mut Vec<KeyValue>, out: &mut Vec<ComposeSequence>) {
        if let Some(output) = &self.nodes[node].output {
            out.push(ComposeSequence {
                chain: chain.clone(),
                output: output.clone(),
            });
        }
        for (key, &child) in &self.nodes[node].children {
            chain.push(key.clone());
            self.collect(child, chain, out);
            chain.pop();
        }
    }

    /// Number of distinct sequences.
    pub fn len(&self) -> usize {
        self.sequence_count
    }

    pub fn is_empty(&self) -> bool {
        self.sequence_count == 0
    }

    pub(crate) fn child(&self, node: usize, key: &KeyValue) -> Option<usize> {
        self.nodes[node].children.get(key).copied()
    }

    pub(crate) fn output(&self, node: usize) -> Option<&str> {
        self.nodes[node].output.as_deref()
    }

    pub(crate) fn has_children(&self, node: usize) -> bool {
        !self.nodes[node].children.is_empty()
    }
}

impl Default for ComposeTrie {
    fn default() -> Self {
        Self::new()
    }
}
