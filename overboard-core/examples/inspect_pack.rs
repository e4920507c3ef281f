use overboard_core::pack::{PackLoader, INFO_DESC, INFO_LOCALE, INFO_NAME, INFO_SCRIPT};
use std::env;
use std::fs;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <obk-file>", args[0]);
        std::process::exit(1);
    }

    let pack_path = &args[1];
    let pack_bytes = fs::read(pack_path).expect("Failed to read pack file");

    match PackLoader::load(&pack_bytes) {
        Ok(file) => {
            println!("Pack Information:");
            println!("=================");
            println!(
                "Format: {}.{}",
                file.header.major_version, file.header.minor_version
            );
            println!("Vocabulary revision: {}", file.header.vocabulary_version);

            if let Some(name) = file.info_value(INFO_NAME) {
                println!("Name: {}", name);
            }
            if let Some(script) = file.info_value(INFO_SCRIPT) {
                println!("Script: {}", script);
            }
            if let Some(locale) = file.info_value(INFO_LOCALE) {
                println!("Locale: {}", locale);
            }
            if let Some(desc) = file.info_value(INFO_DESC) {
                println!("Description: {}", desc);
            }

            println!("\nContents:");
            println!("=========");
            println!("Layouts: {}", file.layouts.len());
            for layout in &file.layouts {
                println!(
                    "  {} ({} states, {} keys)",
                    layout.id,
                    layout.states.len(),
                    layout.key_count()
                );
            }
            println!("Compose sequences: {}", file.sequences.len());

            match file.assemble() {
                Ok(_) => println!("\nPack validates."),
                Err(e) => {
                    eprintln!("\nPack failed validation: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to load pack: {}", e);
            std::process::exit(1);
        }
    }
}
