//! Compiled keyboard packs
//!
//! Loads `.obk` blobs produced by the compiler and reassembles the
//! runtime structures, re-running full validation in the process.

mod error;
mod format;
mod loader;

pub use error::PackError;
pub use format::{
    InfoEntry, KeyboardPack, ObkFile, PackHeader, FORMAT_MAJOR, FORMAT_MINOR, INFO_DESC,
    INFO_LOCALE, INFO_NAME, INFO_SCRIPT, MAGIC, VAL_CHAR, VAL_COMMAND, VAL_DEAD, VAL_MODIFIER,
    VAL_TEXT,
};
pub use loader::PackLoader;
