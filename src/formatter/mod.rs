pub mod json;
pub mod text;
pub mod tree;

use std::io::Write;

use crate::runner::ParsedFile;

pub trait Formatter {
    fn format_to(&self, files: &[ParsedFile], out: &mut dyn Write);

    fn print(&self, files: &[ParsedFile]) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(files, &mut lock);
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        "text" => Box::new(text::TextFormatter),
        // "tree" and any unknown value
        _ => Box::new(tree::TreeFormatter),
    }
}
