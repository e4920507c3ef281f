//! Compose engine
//!
//! Sequence definitions compile into a single shared [`ComposeTrie`];
//! each input session walks it through its own [`ComposeResolver`],
//! feeding one key at a time and getting back pending/resolved/aborted
//! transitions.

mod resolver;
mod trie;

pub use resolver::{CommitResult, ComposeResolver, ComposeState, FeedResult};
pub use trie::{ComposeSequence, ComposeTrie};
