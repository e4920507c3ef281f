//! Key Value Model
//!
//! The shared vocabulary of key meanings used by layouts, compose
//! sequences and compiled packs.

mod modifier;
mod value;
mod vocabulary;

pub use modifier::{Modifier, ModifierState};
pub use value::{Command, DeadKey, KeyValue};
pub use vocabulary::{KeyVocabulary, VOCABULARY_VERSION};
