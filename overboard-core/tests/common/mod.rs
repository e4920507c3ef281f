use overboard_core::pack::ObkFile;
use overboard_core::{ComposeTrie, Error, LayoutRegistry};

/// Compiles layout sources with obkc and builds a registry over all of
/// them, in the given order.
pub fn registry_from_sources(sources: &[&str]) -> Result<LayoutRegistry, Error> {
    let mut definitions = Vec::new();
    for source in sources {
        definitions.push(obkc::compile_layout_str(source)?);
    }
    LayoutRegistry::build(definitions)
}

/// Compiles compose rules with obkc and builds the trie.
#[allow(dead_code)]
pub fn trie_from_source(source: &str) -> ComposeTrie {
    let sequences = obkc::compile_sequences_str(source).expect("compose source should compile");
    ComposeTrie::from_sequences(sequences).expect("sequences should build into a trie")
}

/// Serializes a pack through the compiler's writer.
#[allow(dead_code)]
pub fn pack_binary(pack: &ObkFile) -> Vec<u8> {
    let mut buffer = Vec::new();
    obkc::binary::ObkWriter::new(&mut buffer)
        .write_pack(pack)
        .expect("writing to a Vec should not fail");
    buffer
}
