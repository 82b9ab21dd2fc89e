use serde::Deserialize;

use crate::error::Result;

/// Settings for a utility session
///
/// ```toml
/// first_selection_number = 1
///
/// [mixer]
/// start_pattern = "// section"
/// end_pattern = "// end-section"
/// template = "$0 = $1"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Counter value `\c` produces for the first selection
    pub first_selection_number: u64,
    pub mixer: MixerDefaults,
}

/// Values the mixer prompts are prefilled with
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixerDefaults {
    pub start_pattern: Option<String>,
    pub end_pattern: Option<String>,
    pub template: Option<String>,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.first_selection_number, 0);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
first_selection_number = 1

[mixer]
start_pattern = "// section"
end_pattern = "// end-section"
template = "$0 = $1"
"#,
        )
        .unwrap();

        assert_eq!(config.first_selection_number, 1);
        assert_eq!(config.mixer.start_pattern.as_deref(), Some("// section"));
        assert_eq!(config.mixer.end_pattern.as_deref(), Some("// end-section"));
        assert_eq!(config.mixer.template.as_deref(), Some("$0 = $1"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("first_selection = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
