use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;

use obkc::{
    build_pack, compile_layout_source, compile_sequence_source, discover_sources,
    info_from_options, read_source, write_pack_file, KeyVocabulary,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Overboard keyboard pack compiler", long_about = None)]
struct Args {
    /// Pack source directory (layouts/*.obl, compose/*.seq)
    src_dir: PathBuf,

    /// Output OBK file path (defaults to the source directory with .obk)
    output: Option<PathBuf>,

    /// Validate sources without writing a pack
    #[arg(long)]
    check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let output_path = args.output.clone().unwrap_or_else(|| {
        let mut path = args.src_dir.clone();
        path.set_extension("obk");
        path
    });

    let vocabulary = KeyVocabulary::new();
    let mut options: HashMap<String, String> = HashMap::new();

    let mut layouts = Vec::new();
    for path in discover_sources(&args.src_dir.join("layouts"), "obl")? {
        if args.verbose {
            println!("Compiling {}", path.display());
        }
        let source =
            read_source(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let (definition, file_options) = compile_layout_source(&source, &vocabulary)
            .with_context(|| format!("failed to compile {}", path.display()))?;
        options.extend(file_options);
        layouts.push(definition);
    }

    let mut sequences = Vec::new();
    for path in discover_sources(&args.src_dir.join("compose"), "seq")? {
        if args.verbose {
            println!("Compiling {}", path.display());
        }
        let source =
            read_source(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let (compiled, file_options) = compile_sequence_source(&source, &vocabulary)
            .with_context(|| format!("failed to compile {}", path.display()))?;
        options.extend(file_options);
        sequences.extend(compiled);
    }

    if layouts.is_empty() && sequences.is_empty() {
        anyhow::bail!("no sources found under {}", args.src_dir.display());
    }

    let pack = build_pack(layouts, sequences, info_from_options(&options))
        .context("pack validation failed")?;

    if args.verbose || args.check {
        println!(
            "Compiled {} layouts, {} sequences, {} info entries",
            pack.header.layout_count, pack.header.sequence_count, pack.header.info_count
        );
    }

    if args.check {
        return Ok(());
    }

    write_pack_file(&pack, &output_path)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    if args.verbose {
        println!("Wrote {}", output_path.display());
    }

    Ok(())
}
