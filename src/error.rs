use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("mixer placeholder ${section} has no line {row}")]
    MixerSubstitutionOutOfRange { section: usize, row: usize },
    #[error("decoded text is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        Error::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        }
    }
}
