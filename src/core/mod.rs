pub mod engine;
pub mod markup;
pub mod parser;
pub mod pipeline;

pub use crate::domain::model::{Conversion, Person};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
