//! Named text macros for `\e{name}`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

static REGEX_METACHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\\.()\[\]*+^$])").expect("metachar pattern is valid"));

static REPLACEMENT_REFS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\$\d)").expect("replacement reference pattern is valid"));

/// A text macro that `\e{name}` can apply to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMacro {
    Upper,
    Lower,
    Capitalize,
    Length,
    Regnize,
    IsoDate,
    IsoTimeDate,
    Uuid,
}

impl TextMacro {
    pub const ALL: [TextMacro; 8] = [
        TextMacro::Upper,
        TextMacro::Lower,
        TextMacro::Capitalize,
        TextMacro::Length,
        TextMacro::Regnize,
        TextMacro::IsoDate,
        TextMacro::IsoTimeDate,
        TextMacro::Uuid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextMacro::Upper => "upper",
            TextMacro::Lower => "lower",
            TextMacro::Capitalize => "capitalize",
            TextMacro::Length => "length",
            TextMacro::Regnize => "regnize",
            TextMacro::IsoDate => "isodate",
            TextMacro::IsoTimeDate => "isotimedate",
            TextMacro::Uuid => "uuid",
        }
    }

    /// Apply the macro to `text`.
    /// Generators (dates, uuid) ignore their input.
    pub fn apply(self, text: &str) -> String {
        match self {
            TextMacro::Upper => text.to_uppercase(),
            TextMacro::Lower => text.to_lowercase(),
            TextMacro::Capitalize => capitalize_first(text),
            TextMacro::Length => text.chars().count().to_string(),
            TextMacro::Regnize => regnize(text, true),
            TextMacro::IsoDate => iso_date(),
            TextMacro::IsoTimeDate => iso_time_date(),
            TextMacro::Uuid => uuid_v4(),
        }
    }
}

impl FromStr for TextMacro {
    type Err = UnknownMacro;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextMacro::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMacro(s.to_owned()))
    }
}

impl fmt::Display for TextMacro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown text macro `{0}`")]
pub struct UnknownMacro(pub String);

/// Apply the macro called `name` to `text`.
/// Unknown names leave the text unchanged.
pub fn apply_macro(name: &str, text: &str) -> String {
    match name.parse::<TextMacro>() {
        Ok(text_macro) => text_macro.apply(text),
        Err(UnknownMacro(name)) => {
            tracing::trace!(%name, "unknown text macro, passing selection through");
            text.to_owned()
        }
    }
}

/// Escape regular expression metacharacters.
///
/// With `is_find` every one of `\ . ( ) [ ] * + ^ $` gets a preceding
/// backslash. Without it only `$` followed by a digit is escaped, which is
/// what a replacement template needs.
pub fn regnize(text: &str, is_find: bool) -> String {
    let re = if is_find {
        &REGEX_METACHARS
    } else {
        &REPLACEMENT_REFS
    };
    re.replace_all(text, r"\$1").into_owned()
}

/// Local calendar date, `YYYY-MM-DD`
pub fn iso_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Local date and time, `YYYY-MM-DD HH:MM:SS`
pub fn iso_time_date() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Random version 4 uuid, hyphenated lowercase
pub fn uuid_v4() -> String {
    uuid::Uuid::new_v4().hyphenated().to_string()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
