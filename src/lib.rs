pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{
    engine::ConvertEngine,
    markup::{render_document, serialize, Map, Node},
    parser::parse,
    pipeline::{convert, ConvertPipeline},
};
pub use crate::domain::model::{
    Address, Contact, Conversion, FamilyMember, OutputFormat, Person, Phone, RecordKind,
};
pub use crate::utils::error::{ConvertError, ParseError, ParseErrorKind, Result, SerializeError};
