pub mod clause;
pub mod cli;
pub mod config;
pub mod extract;
pub mod formatter;
pub mod fs;
pub mod parser;
pub mod runner;
pub mod schema;
pub mod tree;
pub mod value;

#[cfg(test)]
pub mod testutil;

use std::io::Read;

use anyhow::Result;

use cli::Args;
use config::load_config;
use formatter::create_formatter;
use fs::discover_files;
use parser::DescriptionParser;
use runner::{has_recognized_sections, parse_files, parse_source};
use schema::jepson;

/// Run the parser. Returns the exit code: 0 = clean, 1 = at least one input
/// yielded no recognized sections.
pub fn run(args: Args) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;

    let mut vocabulary = jepson::default_vocabulary()?;
    vocabulary.retain_sections(|label| config.is_section_enabled(label));
    let parser = DescriptionParser::with_vocabulary(vocabulary);

    // --list-labels: print the recognized clause labels and exit
    if args.list_labels {
        for label in parser.vocabulary().labels() {
            println!("{label}");
        }
        return Ok(0);
    }

    // --stdin: parse a single description from stdin
    if let Some(ref display_path) = args.stdin {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let parsed = parse_source(&display_path.display().to_string(), &input, &parser);
        let recognized = has_recognized_sections(&parsed.tree);
        create_formatter(&args.format).print(&[parsed]);
        return Ok(if recognized { 0 } else { 1 });
    }

    let files = discover_files(&args.paths, &config)?;

    if args.debug {
        eprintln!("debug: {} files to parse", files.len());
        eprintln!("debug: {} vocabulary sections", parser.vocabulary().len());
    }

    let results = parse_files(&files, &parser, &args)?;
    let all_recognized = results.iter().all(|f| has_recognized_sections(&f.tree));
    create_formatter(&args.format).print(&results);

    Ok(if all_recognized { 0 } else { 1 })
}
