pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_ROOT_TAG: &str = "people";
pub const DEFAULT_ITEM_TAG: &str = "person";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "people-xml")]
#[command(about = "Convert pipe-delimited people records into XML")]
pub struct CliConfig {
    /// Input file with P/F/T/A lines
    pub input: String,

    /// Write the document to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Tag wrapping the whole document
    #[arg(long)]
    pub root_tag: Option<String>,

    /// Tag wrapping each person
    #[arg(long)]
    pub item_tag: Option<String>,

    /// TOML file supplying defaults for options not given here
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fills options left unset on the command line from a config file.
    pub fn apply_file_config(&mut self, file: &toml_config::TomlConfig) {
        if let Some(output) = &file.output {
            if self.output.is_none() {
                self.output = output.path.clone();
            }
            if self.format.is_none() {
                self.format = output.format;
            }
        }
        if let Some(markup) = &file.markup {
            if self.root_tag.is_none() {
                self.root_tag = markup.root_tag.clone();
            }
            if self.item_tag.is_none() {
                self.item_tag = markup.item_tag.clone();
            }
        }
        if file.logging.as_ref().and_then(|l| l.json).unwrap_or(false) {
            self.log_json = true;
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn root_tag(&self) -> &str {
        self.root_tag.as_deref().unwrap_or(DEFAULT_ROOT_TAG)
    }

    fn item_tag(&self) -> &str {
        self.item_tag.as_deref().unwrap_or(DEFAULT_ITEM_TAG)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_positional_argument() {
        let config = CliConfig::try_parse_from(["people-xml", "input.txt"]).unwrap();
        assert_eq!(config.input_path(), "input.txt");
        assert_eq!(config.output_path(), None);
        assert_eq!(config.output_format(), OutputFormat::Xml);
        assert_eq!(config.root_tag(), "people");
        assert_eq!(config.item_tag(), "person");
    }

    #[test]
    fn test_input_is_required() {
        assert!(CliConfig::try_parse_from(["people-xml"]).is_err());
        assert!(CliConfig::try_parse_from(["people-xml", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let mut config = CliConfig::try_parse_from([
            "people-xml",
            "input.txt",
            "--format",
            "json",
            "--root-tag",
            "directory",
        ])
        .unwrap();

        let file = toml_config::TomlConfig::from_toml_str(
            r#"
[output]
path = "out.xml"
format = "xml"

[markup]
root_tag = "ignored"
item_tag = "entry"
"#,
        )
        .unwrap();
        config.apply_file_config(&file);

        assert_eq!(config.output_path(), Some("out.xml"));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.root_tag(), "directory");
        assert_eq!(config.item_tag(), "entry");
    }
}
