use crate::utils::error::{ConvertError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Checks a configured tag name. Keys coming from the data itself are
/// written as-is and never pass through here.
pub fn validate_tag_name(field_name: &str, tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tag.to_string(),
            reason: "Tag name cannot be empty".to_string(),
        });
    }

    if let Some(bad) = tag
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '&' | '"' | '\''))
    {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: tag.to_string(),
            reason: format!("Tag name cannot contain {:?}", bad),
        });
    }

    Ok(())
}

#[cfg(feature = "cli")]
impl Validate for crate::config::CliConfig {
    fn validate(&self) -> Result<()> {
        use crate::core::ConfigProvider;

        validate_path("input", self.input_path())?;
        if let Some(output) = self.output_path() {
            validate_path("output", output)?;
        }
        validate_tag_name("root_tag", self.root_tag())?;
        validate_tag_name("item_tag", self.item_tag())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "people.txt").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_tag_name() {
        assert!(validate_tag_name("root_tag", "people").is_ok());
        assert!(validate_tag_name("root_tag", "family-member").is_ok());
        assert!(validate_tag_name("root_tag", "").is_err());
        assert!(validate_tag_name("root_tag", "two words").is_err());
        assert!(validate_tag_name("root_tag", "a>b").is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_config_validation() {
        use clap::Parser;

        let config = crate::config::CliConfig::try_parse_from(["people-xml", "in.txt"]).unwrap();
        assert!(config.validate().is_ok());

        let config =
            crate::config::CliConfig::try_parse_from(["people-xml", "in.txt", "--item-tag", ""])
                .unwrap();
        assert!(config.validate().is_err());
    }
}
