use std::collections::HashMap;

// AST nodes for layout sources

#[derive(Debug)]
pub struct LayoutFile {
    pub options: HashMap<String, String>,
    pub id: String,
    pub extends: Option<String>,
    pub states: Vec<StateExpr>,
    pub rows: Vec<RowDecl>,
}

/// A modifier combination as written: `base`, `shift`, `shift & fn`.
#[derive(Debug, Clone)]
pub struct StateExpr {
    pub names: Vec<String>,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct RowDecl {
    pub keys: Vec<KeyDecl>,
}

#[derive(Debug, Clone)]
pub struct KeyDecl {
    pub position: String,
    pub mappings: Vec<MappingDecl>,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct MappingDecl {
    pub state: StateExpr,
    pub value: ValueExpr,
    pub line: usize,
}

/// A mapping value as written; escapes are processed at compile time.
#[derive(Debug, Clone)]
pub enum ValueExpr {
    String(String),
    Unicode(u32),
    Name(String),
}

// AST nodes for sequence sources

#[derive(Debug)]
pub struct SequenceFile {
    pub options: HashMap<String, String>,
    pub rules: Vec<SequenceRule>,
}

#[derive(Debug, Clone)]
pub struct SequenceRule {
    pub chain: Vec<ChainElement>,
    pub output: Vec<OutputPiece>,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub enum ChainElement {
    /// A named key from the vocabulary.
    Name(String),
    /// A quoted run; each character becomes one chain element.
    String(String),
    Unicode(u32),
}

#[derive(Debug, Clone)]
pub enum OutputPiece {
    String(String),
    Unicode(u32),
}
