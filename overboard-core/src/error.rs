//! Error types shared by the layout and compose engines

use std::fmt;

use thiserror::Error;

use crate::key::KeyValue;

#[derive(Error, Debug)]
pub enum Error {
    /// Source-level diagnostic from the layout or sequence parsers.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A symbolic name absent from the key vocabulary.
    #[error("unknown key name '{0}'")]
    UnknownKeyName(String),

    /// A single layout violates its own contract. The reason names the
    /// offending key position where one exists.
    #[error("malformed layout '{layout}': {reason}")]
    MalformedLayout { layout: String, reason: String },

    /// Registry-wide defect: duplicate identifier, unknown base layout or
    /// an inheritance cycle.
    #[error("layout graph error: {0}")]
    LayoutGraph(String),

    /// Runtime lookup of a layout identifier that was never registered.
    #[error("unknown layout '{0}'")]
    UnknownLayout(String),

    #[error("invalid compose sequence: {0}")]
    InvalidSequence(String),

    /// Two compose definitions share a chain but disagree on the output.
    /// Conflicts are collected and sorted so the report does not depend on
    /// the order definitions were read in.
    #[error("{0}")]
    ConflictingSequence(ConflictReport),

    #[error("pack error: {0}")]
    Pack(#[from] crate::pack::PackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One chain mapped to two different outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceConflict {
    pub chain: Vec<KeyValue>,
    /// The two distinct outputs, in sorted order.
    pub outputs: (String, String),
}

impl fmt::Display for SequenceConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain [")?;
        for (i, key) in self.chain.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", key)?;
        }
        write!(
            f,
            "] maps to both {:?} and {:?}",
            self.outputs.0, self.outputs.1
        )
    }
}

/// All conflicts found while compiling one set of sequence definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    pub conflicts: Vec<SequenceConflict>,
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} conflicting compose sequence{}: ",
            self.conflicts.len(),
            if self.conflicts.len() == 1 { "" } else { "s" }
        )?;
        for (i, conflict) in self.conflicts.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", conflict)?;
        }
        Ok(())
    }
}
