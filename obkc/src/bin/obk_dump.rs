use obkc::PackLoader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <obk_file>", args[0]);
        std::process::exit(1);
    }

    let data = std::fs::read(&args[1])?;

    let pack = match PackLoader::load(&data) {
        Ok(pack) => pack,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let header = &pack.header;
    println!("Magic: {}", String::from_utf8_lossy(&header.magic));
    println!("Version: {}.{}", header.major_version, header.minor_version);
    println!("Vocabulary: v{}", header.vocabulary_version);
    println!(
        "Counts: {} info, {} layouts, {} sequences",
        header.info_count, header.layout_count, header.sequence_count
    );

    if !pack.info.is_empty() {
        println!("\n=== INFO ===");
        for entry in &pack.info {
            println!("{}: \"{}\"", String::from_utf8_lossy(&entry.id), entry.value);
        }
    }

    if !pack.layouts.is_empty() {
        println!("\n=== LAYOUTS ===");
        for layout in &pack.layouts {
            let states: Vec<String> = layout.states.iter().map(|s| s.to_string()).collect();
            println!("Layout '{}': states [{}]", layout.id, states.join(", "));
            for (row_idx, row) in layout.rows.iter().enumerate() {
                for key in &row.keys {
                    let mappings: Vec<String> = key
                        .mappings
                        .iter()
                        .map(|(state, value)| format!("{}={}", state, value))
                        .collect();
                    println!("  [{}] {}: {}", row_idx, key.position, mappings.join("  "));
                }
            }
        }
    }

    if !pack.sequences.is_empty() {
        println!("\n=== SEQUENCES ===");
        for sequence in &pack.sequences {
            let chain: Vec<String> = sequence.chain.iter().map(|k| k.to_string()).collect();
            println!("{} => {:?}", chain.join(" + "), sequence.output);
        }
    }

    Ok(())
}
