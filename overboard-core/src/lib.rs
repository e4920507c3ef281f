pub mod compose;
pub mod error;
pub mod key;
pub mod layout;
pub mod pack;

// Re-export commonly used types
pub use compose::{
    CommitResult, ComposeResolver, ComposeSequence, ComposeState, ComposeTrie, FeedResult,
};
pub use error::{ConflictReport, Error, Result, SequenceConflict};
pub use key::{
    Command, DeadKey, KeyValue, KeyVocabulary, Modifier, ModifierState, VOCABULARY_VERSION,
};
pub use layout::{Key, KeyDefinition, Layout, LayoutDefinition, LayoutRegistry, RowDefinition};
pub use pack::{KeyboardPack, ObkFile, PackError, PackLoader};
