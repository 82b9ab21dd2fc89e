//! Text transforms behind the editor utilities.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, NoExpand, Regex};

use crate::error::{Error, Result};
use crate::processor::{Expander, expand, has_dynamic_values};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!(stringify!($name), " is valid")));
    };
}

pattern!(WORD_START, r"\b(_*\w)");
pattern!(UPPERCASE_LETTER, r"([A-Z])");
pattern!(ASSIGNMENT, r"\b(.+)(\s+)([=<>]=*|[!:]=+)(\s+)([^;]+)");
pattern!(FORWARD_SLASH, r"/");
pattern!(BACKSLASH, r"\\");
pattern!(DOUBLE_BACKSLASH, r"\\\\");
pattern!(NOT_BOOKMARK_CHAR, r"[^\w\- \x{80}-\x{10FFFF}]+");
pattern!(WHITESPACE_RUN, r"\s+");
pattern!(TRAILING_DASHES, r"-+$");
pattern!(FIRST_NUMBER, r"[0-9]+");

/// How a [`Substitution`] rewrites each match
#[derive(Debug, Clone, Copy)]
pub enum Replacement {
    /// Uppercase the first capture group
    UpperGroup,
    /// Lowercase the first capture group
    LowerGroup,
    /// Insert a space before the first capture group
    SpaceBeforeGroup,
    /// Replace with fixed text, no group expansion
    Literal(&'static str),
    /// Replace with a `${N}` template
    Template(&'static str),
}

/// Regex substitution over the whole selection
#[derive(Debug)]
pub struct Substitution {
    pattern: &'static LazyLock<Regex>,
    replacement: Replacement,
    /// Maximum number of matches replaced, 0 for all
    limit: usize,
}

impl Substitution {
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let re: &Regex = self.pattern;
        match self.replacement {
            Replacement::UpperGroup => {
                re.replacen(text, self.limit, |caps: &Captures| caps[1].to_uppercase())
            }
            Replacement::LowerGroup => {
                re.replacen(text, self.limit, |caps: &Captures| caps[1].to_lowercase())
            }
            Replacement::SpaceBeforeGroup => {
                re.replacen(text, self.limit, |caps: &Captures| format!(" {}", &caps[1]))
            }
            Replacement::Literal(with) => re.replacen(text, self.limit, NoExpand(with)),
            Replacement::Template(with) => re.replacen(text, self.limit, with),
        }
    }
}

/// `classNameFunc` -> `ClassNameFunc`
pub static CAPITALIZE: Substitution = Substitution {
    pattern: &WORD_START,
    replacement: Replacement::UpperGroup,
    limit: 0,
};

/// `ClassNameFunc` -> `classNameFunc`
pub static CAMEL_CASE: Substitution = Substitution {
    pattern: &WORD_START,
    replacement: Replacement::LowerGroup,
    limit: 0,
};

/// `doActionBefore` -> `do Action Before`
pub static SPACE_BY_UPPER: Substitution = Substitution {
    pattern: &UPPERCASE_LETTER,
    replacement: Replacement::SpaceBeforeGroup,
    limit: 0,
};

/// `x == y[x] + 5` -> `y[x] + 5 == x`
pub static REVERSE_ASSIGNMENT: Substitution = Substitution {
    pattern: &ASSIGNMENT,
    replacement: Replacement::Template("${5}${2}${3}${4}${1}"),
    limit: 1,
};

pub static UNIX_TO_WIN_SLASH: Substitution = Substitution {
    pattern: &FORWARD_SLASH,
    replacement: Replacement::Literal("\\"),
    limit: 0,
};

pub static WIN_TO_UNIX_SLASH: Substitution = Substitution {
    pattern: &BACKSLASH,
    replacement: Replacement::Literal("/"),
    limit: 0,
};

pub static SINGLE_TO_DOUBLE_SLASH: Substitution = Substitution {
    pattern: &BACKSLASH,
    replacement: Replacement::Literal("\\\\"),
    limit: 0,
};

pub static DOUBLE_TO_SINGLE_SLASH: Substitution = Substitution {
    pattern: &DOUBLE_BACKSLASH,
    replacement: Replacement::Literal("\\"),
    limit: 0,
};

pub fn url_encode(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

pub fn url_decode(text: &str) -> Result<String> {
    urlencoding::decode(text)
        .map(Cow::into_owned)
        .map_err(|e| Error::InvalidEncoding(e.to_string()))
}

/// Markdown header text to an html bookmark: `Is this the header 你好?` ->
/// `is-this-the-header-你好`
pub fn header_to_bookmark(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let spaced = NOT_BOOKMARK_CHAR.replace_all(&lowered, " ");
    let dashed = WHITESPACE_RUN.replace_all(&spaced, "-");
    TRAILING_DASHES.replace(&dashed, "").into_owned()
}

/// Drop lines equal to the line before them
pub fn remove_duplicated_lines(mut lines: Vec<String>) -> Vec<String> {
    lines.dedup();
    lines
}

pub fn remove_empty_lines(mut lines: Vec<String>) -> Vec<String> {
    lines.retain(|line| !line.trim().is_empty());
    lines
}

/// Join lines with an expression.
///
/// A static expression is expanded once and used as the separator. A dynamic
/// one is expanded for every line, with that line as the selection and the
/// counter starting at `selection_number + index`, and appended to the line;
/// the results are then concatenated.
pub fn join_lines(
    lines: Vec<String>,
    expression: &str,
    selection_number: u64,
    selection: &str,
) -> Vec<String> {
    if has_dynamic_values(expression) {
        let joined = lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let counter = selection_number.saturating_add(index as u64);
                let suffix = Expander::new(counter, line).expand(expression);
                format!("{line}{suffix}")
            })
            .collect::<String>();
        vec![joined]
    } else {
        let separator = expand(expression, selection_number, selection);
        vec![lines.join(&separator)]
    }
}

/// Split every line on the expanded expression
pub fn split_lines(
    lines: Vec<String>,
    expression: &str,
    selection_number: u64,
    selection: &str,
) -> Vec<String> {
    let separator = expand(expression, selection_number, selection);
    if separator.is_empty() {
        return lines;
    }
    lines
        .iter()
        .flat_map(|line| line.split(separator.as_str()))
        .map(str::to_owned)
        .collect()
}

/// Stable sort on the first number in each line; lines without one sort as 0
pub fn sort_numerically_ascending(mut lines: Vec<String>) -> Vec<String> {
    lines.sort_by_cached_key(|line| {
        FIRST_NUMBER
            .find(line)
            .map(|m| m.as_str().parse::<u128>().unwrap_or(u128::MAX))
            .unwrap_or(0)
    });
    lines
}

pub fn indent_one_space(line: &str) -> String {
    format!(" {line}")
}

pub fn outdent_one_space(line: &str) -> String {
    line.strip_prefix(' ').unwrap_or(line).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(str::to_owned).collect()
    }

    #[rstest]
    #[case("helloWorld", "HelloWorld")]
    #[case("classNameFunc", "ClassNameFunc")]
    #[case("my_var other", "My_var Other")]
    #[case("_private thing", "_Private Thing")]
    #[case("naïve élan", "Naïve Élan")]
    fn test_capitalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(CAPITALIZE.apply(input), expected);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(CAMEL_CASE.apply("ClassNameFunc"), "classNameFunc");
        assert_eq!(CAMEL_CASE.apply("Foo Bar"), "foo bar");
    }

    #[test]
    fn test_space_by_upper() {
        assert_eq!(SPACE_BY_UPPER.apply("doActionBefore"), "do Action Before");
    }

    #[test]
    fn test_reverse_assignment() {
        assert_eq!(REVERSE_ASSIGNMENT.apply("x == y[x] + 5"), "y[x] + 5 == x");
        assert_eq!(REVERSE_ASSIGNMENT.apply("a = b;"), "b = a;");
        assert_eq!(REVERSE_ASSIGNMENT.apply("left != right"), "right != left");
    }

    #[test]
    fn test_slashes() {
        assert_eq!(UNIX_TO_WIN_SLASH.apply("chocolate/candy"), "chocolate\\candy");
        assert_eq!(WIN_TO_UNIX_SLASH.apply("chocolate\\candy"), "chocolate/candy");
        assert_eq!(SINGLE_TO_DOUBLE_SLASH.apply("find\\nagain"), "find\\\\nagain");
        assert_eq!(DOUBLE_TO_SINGLE_SLASH.apply("find\\\\nagain"), "find\\nagain");
    }

    #[test]
    fn test_url_round_trip() {
        assert_eq!(url_encode("https://github.com"), "https%3A%2F%2Fgithub.com");
        assert_eq!(url_decode("https%3A%2F%2Fgithub.com").unwrap(), "https://github.com");
        assert_eq!(url_decode("a+b").unwrap(), "a+b");
    }

    #[test]
    fn test_url_decode_invalid_utf8() {
        assert!(matches!(url_decode("%FF%FE"), Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn test_header_to_bookmark() {
        assert_eq!(
            header_to_bookmark("Is this the header 你好?"),
            "is-this-the-header-你好"
        );
        assert_eq!(header_to_bookmark("  Setup & Install!  "), "setup-install");
    }

    #[test]
    fn test_remove_duplicated_lines() {
        assert_eq!(
            remove_duplicated_lines(lines("first\nsecond\nsecond\nfirst")),
            lines("first\nsecond\nfirst")
        );
    }

    #[test]
    fn test_remove_empty_lines() {
        assert_eq!(
            remove_empty_lines(lines("first\n\n   \nsecond")),
            lines("first\nsecond")
        );
    }

    #[test]
    fn test_join_lines_static() {
        assert_eq!(
            join_lines(lines("red\ngreen\nblue"), ",\\t", 0, "red\ngreen\nblue"),
            vec!["red,\tgreen,\tblue".to_owned()]
        );
    }

    #[test]
    fn test_join_lines_dynamic() {
        assert_eq!(
            join_lines(lines("red\ngreen"), "(x\\c{X0A}),", 0, "red\ngreen"),
            vec!["red(x0A),green(x0B),".to_owned()]
        );
        assert_eq!(
            join_lines(lines("a\nb"), "=\\e{upper};", 0, "a\nb"),
            vec!["a=A;b=B;".to_owned()]
        );
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_lines(lines("red,green\nblue"), ",", 0, ""),
            lines("red\ngreen\nblue")
        );
        assert_eq!(split_lines(lines("a\\tb"), "\\t", 0, ""), lines("a\\tb"));
        assert_eq!(split_lines(lines("a\tb"), "\\t", 0, ""), lines("a\nb"));
    }

    #[test]
    fn test_sort_numerically_ascending() {
        assert_eq!(
            sort_numerically_ascending(lines("10. red\n2. green\nnone\n2. again")),
            lines("none\n2. green\n2. again\n10. red")
        );
    }

    #[test]
    fn test_sort_ignores_non_ascii_digits() {
        assert_eq!(
            sort_numerically_ascending(lines("5 b\n\u{663} a\n7 c")),
            lines("\u{663} a\n5 b\n7 c")
        );
    }

    #[test]
    fn test_indent_outdent() {
        assert_eq!(indent_one_space("x"), " x");
        assert_eq!(outdent_one_space("  x"), " x");
        assert_eq!(outdent_one_space("x"), "x");
        assert_eq!(outdent_one_space(""), "");
    }
}
