pub mod ast;
pub mod layout;
pub mod sequence;

pub use ast::{
    ChainElement, KeyDecl, LayoutFile, MappingDecl, OutputPiece, RowDecl, SequenceFile,
    SequenceRule, StateExpr, ValueExpr,
};
pub use layout::LayoutParser;
pub use sequence::SequenceParser;
