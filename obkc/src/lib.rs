//! Compiler for Overboard keyboard sources.
//!
//! Turns `.obl` layout files and `.seq` compose files into a compiled
//! `.obk` pack that `overboard-core` loads at runtime. The pipeline is
//! parse ([`parser`]), resolve names against the key vocabulary
//! ([`compiler`]) and serialize ([`binary`]); structural validation runs
//! through the core registry and trie so the compiler can never write a
//! pack the runtime would refuse.

pub mod binary;
pub mod compiler;
pub mod lexer;
pub mod parser;

pub use overboard_core::*;

use std::collections::HashMap;
use std::fs::{self, read_to_string, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use overboard_core::pack::{
    InfoEntry, PackHeader, INFO_DESC, INFO_LOCALE, INFO_NAME, INFO_SCRIPT,
};

use binary::ObkWriter;
use compiler::{LayoutCompiler, SequenceCompiler};
use parser::{LayoutParser, SequenceParser};

/// Compile one layout source to its definition, plus the `@KEY` metadata
/// options found in the file's comments.
pub fn compile_layout_source(
    source: &str,
    vocabulary: &KeyVocabulary,
) -> Result<(LayoutDefinition, HashMap<String, String>)> {
    let file = LayoutParser::new(source).parse()?;
    let definition = LayoutCompiler::new(vocabulary).compile(&file)?;
    Ok((definition, file.options))
}

/// Compile one compose source to its sequences, plus metadata options.
pub fn compile_sequence_source(
    source: &str,
    vocabulary: &KeyVocabulary,
) -> Result<(Vec<ComposeSequence>, HashMap<String, String>)> {
    let file = SequenceParser::new(source).parse()?;
    let sequences = SequenceCompiler::new(vocabulary).compile(&file)?;
    Ok((sequences, file.options))
}

/// Compile a layout source with the default vocabulary, dropping options.
pub fn compile_layout_str(source: &str) -> Result<LayoutDefinition> {
    let vocabulary = KeyVocabulary::new();
    compile_layout_source(source, &vocabulary).map(|(definition, _)| definition)
}

/// Compile a compose source with the default vocabulary, dropping options.
pub fn compile_sequences_str(source: &str) -> Result<Vec<ComposeSequence>> {
    let vocabulary = KeyVocabulary::new();
    compile_sequence_source(source, &vocabulary).map(|(sequences, _)| sequences)
}

/// Read a source file as UTF-8, stripping a leading BOM if present.
pub fn read_source(path: &Path) -> Result<String> {
    let mut content = read_to_string(path)?;
    if content.starts_with('\u{FEFF}') {
        content = content.trim_start_matches('\u{FEFF}').to_string();
    }
    Ok(content)
}

/// Source files with the given extension, sorted by path so compile
/// order, and with it option precedence, does not depend on directory
/// iteration order. A missing directory reads as empty.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    if !dir.is_dir() {
        return Ok(paths);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Map `@NAME`-style metadata options to pack info entries. Entries come
/// out in a fixed order; unrecognized options are dropped.
pub fn info_from_options(options: &HashMap<String, String>) -> Vec<InfoEntry> {
    let known = [
        ("NAME", INFO_NAME),
        ("SCRIPT", INFO_SCRIPT),
        ("LOCALE", INFO_LOCALE),
        ("DESCRIPTION", INFO_DESC),
    ];

    let mut info = Vec::new();
    for (key, id) in known {
        if let Some(value) = options.get(key) {
            info.push(InfoEntry {
                id: *id,
                value: value.clone(),
            });
        }
    }
    info
}

/// Validate compiled definitions and assemble the pack structure.
///
/// Layouts are stored resolved: the registry merges each inheritance
/// chain and the serialized definitions carry no parent references. The
/// sequence list is the trie's canonical ordering, so packs built from
/// the same definitions are byte-identical regardless of source order.
pub fn build_pack(
    layouts: Vec<LayoutDefinition>,
    sequences: Vec<ComposeSequence>,
    info: Vec<InfoEntry>,
) -> Result<ObkFile> {
    let registry = LayoutRegistry::build(layouts)?;
    let trie = ComposeTrie::from_sequences(sequences)?;

    let layouts: Vec<LayoutDefinition> = registry.iter().map(Layout::to_definition).collect();
    let sequences = trie.sequences();

    let mut header = PackHeader::new();
    header.info_count = info.len() as u16;
    header.layout_count = layouts.len() as u16;
    header.sequence_count = sequences.len() as u32;

    Ok(ObkFile {
        header,
        info,
        layouts,
        sequences,
    })
}

/// Compile a pack source directory: `layouts/*.obl` plus `compose/*.seq`.
/// Metadata options merge across files, later files winning.
pub fn compile_pack_dir(src_dir: &Path) -> Result<ObkFile> {
    let vocabulary = KeyVocabulary::new();
    let mut options: HashMap<String, String> = HashMap::new();

    let mut layouts = Vec::new();
    for path in discover_sources(&src_dir.join("layouts"), "obl")? {
        let source = read_source(&path)?;
        let (definition, file_options) = compile_layout_source(&source, &vocabulary)?;
        options.extend(file_options);
        layouts.push(definition);
    }

    let mut sequences = Vec::new();
    for path in discover_sources(&src_dir.join("compose"), "seq")? {
        let source = read_source(&path)?;
        let (compiled, file_options) = compile_sequence_source(&source, &vocabulary)?;
        options.extend(file_options);
        sequences.extend(compiled);
    }

    build_pack(layouts, sequences, info_from_options(&options))
}

/// Compile a source directory and write the `.obk` pack in one call.
pub fn convert_src_to_obk(src_dir: &Path, output_path: &Path) -> Result<()> {
    let pack = compile_pack_dir(src_dir)?;
    write_pack_file(&pack, output_path)
}

pub fn write_pack_file(pack: &ObkFile, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    ObkWriter::new(writer).write_pack(pack)
}
