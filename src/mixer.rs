//! Section mixer.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static TEMPLATE_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)|\\n").expect("template pattern is valid"));

/// Piece of a parsed mixer template
#[derive(Debug, Clone, PartialEq, Eq)]
enum Part<'a> {
    Text(&'a str),
    Newline,
    /// `$N`, line of section N
    Section(usize),
}

/// Result of splitting the input into sections
#[derive(Debug, Default)]
struct Scan<'t> {
    /// Lines outside any section, in input order
    outside: Vec<&'t str>,
    /// Closed sections in closing order
    sections: Vec<Vec<&'t str>>,
    /// Index into `outside` where the first section started
    insert_at: Option<usize>,
}

impl<'t> Scan<'t> {
    fn run(text: &'t str, start: &Regex, end: &Regex) -> Self {
        let mut scan = Scan::default();
        let mut current: Option<Vec<&'t str>> = None;

        for line in text.split('\n') {
            if let Some(section) = current.as_mut() {
                if end.is_match(line) {
                    scan.sections.extend(current.take());
                } else {
                    // Nested start lines are ordinary section lines
                    section.push(line);
                }
            } else if start.is_match(line) {
                current = Some(Vec::new());
                if scan.insert_at.is_none() {
                    scan.insert_at = Some(scan.outside.len());
                }
            } else {
                scan.outside.push(line);
            }
        }

        if let Some(unclosed) = current {
            tracing::debug!(lines = unclosed.len(), "discarding unterminated section");
        }

        scan
    }
}

fn parse_template(template: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let mut last = 0;

    for caps in TEMPLATE_PARTS.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            parts.push(Part::Text(&template[last..whole.start()]));
        }
        match caps.get(1) {
            // An index too large for usize can never name a section
            Some(index) => parts.push(Part::Section(index.as_str().parse().unwrap_or(usize::MAX))),
            None => parts.push(Part::Newline),
        }
        last = whole.end();
    }

    if last < template.len() {
        parts.push(Part::Text(&template[last..]));
    }
    parts
}

fn render_row(parts: &[Part], sections: &[Vec<&str>], row: usize) -> Result<String> {
    let mut line = String::new();
    for part in parts {
        match part {
            Part::Text(text) => line.push_str(text),
            Part::Newline => line.push('\n'),
            Part::Section(section) => {
                let value = sections
                    .get(*section)
                    .and_then(|lines| lines.get(row))
                    .ok_or(Error::MixerSubstitutionOutOfRange {
                        section: *section,
                        row,
                    })?;
                line.push_str(value);
            }
        }
    }
    Ok(line)
}

/// Mix the sections of `text`.
///
/// `start_pattern` and `end_pattern` are regular expressions tested against
/// each line. With fewer than two closed sections, or with any of the three
/// inputs empty, the text is returned unchanged.
pub fn mix(text: &str, start_pattern: &str, end_pattern: &str, template: &str) -> Result<String> {
    if start_pattern.is_empty() || end_pattern.is_empty() || template.is_empty() {
        return Ok(text.to_owned());
    }

    let start = Regex::new(start_pattern).map_err(|e| Error::invalid_pattern(start_pattern, e))?;
    let end = Regex::new(end_pattern).map_err(|e| Error::invalid_pattern(end_pattern, e))?;

    let Scan {
        mut outside,
        sections,
        insert_at,
    } = Scan::run(text, &start, &end);

    if sections.len() < 2 {
        tracing::debug!(sections = sections.len(), "not enough sections to mix");
        return Ok(text.to_owned());
    }

    let parts = parse_template(template);
    let rows = (0..sections[0].len())
        .map(|row| render_row(&parts, &sections, row))
        .collect::<Result<Vec<_>>>()?;
    let block = rows.join("\n");

    tracing::debug!(
        sections = sections.len(),
        rows = rows.len(),
        "mixed sections"
    );

    let at = insert_at.unwrap_or(outside.len());
    outside.insert(at, &block);
    Ok(outside.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "// section";
    const END: &str = "// end-section";

    #[test]
    fn test_mix_two_sections() {
        let text = "// section\nabc\ncde\n// end-section\n// section\n123\n345\n// end-section";
        let result = mix(text, START, END, "$0||$1").unwrap();
        assert_eq!(result, "abc||123\ncde||345");
    }

    #[test]
    fn test_mix_keeps_surrounding_lines() {
        let text = "header\n// section\na\nb\n// end-section\nmiddle\n// section\n1\n2\n// end-section\nfooter";
        let result = mix(text, START, END, "$0-$1").unwrap();
        assert_eq!(result, "header\na-1\nb-2\nmiddle\nfooter");
    }

    #[test]
    fn test_mix_template_newline() {
        let text = "S\nx\ny\nE\nS\n1\n2\nE";
        let result = mix(text, "^S$", "^E$", "$1:\\n  $0").unwrap();
        assert_eq!(result, "1:\n  x\n2:\n  y");
    }

    #[test]
    fn test_mix_reuses_and_reorders_sections() {
        let text = "S\na\nE\nS\nb\nE\nS\nc\nE";
        let result = mix(text, "^S", "^E", "$2$1$0$2").unwrap();
        assert_eq!(result, "cbac");
    }

    #[test]
    fn test_mix_single_section_is_identity() {
        let text = "keep\n// section\nonly\n// end-section\n  trailing  ";
        assert_eq!(mix(text, START, END, "$0").unwrap(), text);
    }

    #[test]
    fn test_mix_without_sections_is_identity() {
        let text = "nothing\nto\nmix\n";
        assert_eq!(mix(text, START, END, "$0-$1").unwrap(), text);
    }

    #[test]
    fn test_mix_discards_unterminated_section() {
        let text = "S\na\nE\nS\nb\nE\nS\ndangling";
        let result = mix(text, "^S$", "^E$", "$0$1").unwrap();
        assert_eq!(result, "ab");
    }

    #[test]
    fn test_mix_nested_start_is_section_line() {
        let text = "S\nS\nE\nS\nb\nE";
        let result = mix(text, "^S$", "^E$", "[$0][$1]").unwrap();
        assert_eq!(result, "[S][b]");
    }

    #[test]
    fn test_mix_insertion_point_of_first_section_at_top() {
        let text = "S\na\nE\nbetween\nS\nb\nE\nafter";
        let result = mix(text, "^S$", "^E$", "$0$1").unwrap();
        assert_eq!(result, "ab\nbetween\nafter");
    }

    #[test]
    fn test_mix_out_of_range_section() {
        let text = "S\na\nE\nS\nb\nE";
        let err = mix(text, "^S$", "^E$", "$0$2").unwrap_err();
        assert!(matches!(
            err,
            Error::MixerSubstitutionOutOfRange { section: 2, row: 0 }
        ));
    }

    #[test]
    fn test_mix_out_of_range_row() {
        let text = "S\na\nb\nE\nS\n1\nE";
        let err = mix(text, "^S$", "^E$", "$0$1").unwrap_err();
        assert!(matches!(
            err,
            Error::MixerSubstitutionOutOfRange { section: 1, row: 1 }
        ));
    }

    #[test]
    fn test_mix_invalid_pattern() {
        let err = mix("a", "(", "^E$", "$0").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn test_mix_empty_inputs_are_noop() {
        let text = "S\na\nE\nS\nb\nE";
        assert_eq!(mix(text, "", "^E$", "$0").unwrap(), text);
        assert_eq!(mix(text, "^S$", "", "$0").unwrap(), text);
        assert_eq!(mix(text, "^S$", "^E$", "").unwrap(), text);
    }

    #[test]
    fn test_parse_template() {
        assert_eq!(
            parse_template("a$10\\nb$"),
            vec![
                Part::Text("a"),
                Part::Section(10),
                Part::Newline,
                Part::Text("b$"),
            ]
        );
    }
}
