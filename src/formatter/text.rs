use std::io::Write;

use crate::formatter::Formatter;
use crate::runner::ParsedFile;

/// One line per extracted leaf value: `path: dotted.field.path: value`.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(&self, files: &[ParsedFile], out: &mut dyn Write) {
        let mut features = 0usize;
        for file in files {
            let path = file.path.display();
            for id in file.tree.preorder() {
                if let Some(value) = &file.tree.node(id).value {
                    features += 1;
                    let _ = writeln!(out, "{path}: {}: {value}", file.tree.path(id));
                }
            }
        }
        let file_word = if files.len() == 1 { "file" } else { "files" };
        let feature_word = if features == 1 { "feature" } else { "features" };
        let _ = writeln!(
            out,
            "\n{} {file_word} inspected, {features} {feature_word} extracted",
            files.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DescriptionParser;
    use crate::runner::parse_source;

    fn render(description: &str) -> String {
        let parser = DescriptionParser::new().unwrap();
        let files = vec![parse_source("rosa.txt", description, &parser)];
        let mut buf = Vec::new();
        TextFormatter.format_to(&files, &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn leaves_print_with_dotted_paths() {
        let out = render("Habit: shrub, 8--25 dm.");
        assert!(out.contains("rosa.txt: habit.height: 8--25 dm"), "{out}");
        assert!(out.contains("rosa.txt: habit.growth_form: shrub"), "{out}");
    }

    #[test]
    fn summary_line_counts() {
        let out = render("Habit: shrub, 8--25 dm.");
        assert!(
            out.ends_with("1 file inspected, 2 features extracted\n"),
            "{out}"
        );
    }

    #[test]
    fn empty_input_prints_summary_only() {
        let mut buf = Vec::new();
        TextFormatter.format_to(&[], &mut buf);
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("0 files inspected, 0 features extracted"));
    }
}
