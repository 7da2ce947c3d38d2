use crate::core::markup::render_document;
use crate::core::parser::parse;
use crate::core::{ConfigProvider, Conversion, Pipeline, Storage};
use crate::domain::model::{OutputFormat, Person};
use crate::utils::error::Result;

pub struct ConvertPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Parses `text` and renders it in `format`. Pure; no I/O.
pub fn convert(
    text: &str,
    format: OutputFormat,
    root_tag: &str,
    item_tag: &str,
) -> Result<Conversion> {
    let people = parse(text)?;
    let document = render(&people, format, root_tag, item_tag)?;
    Ok(Conversion {
        people,
        document,
        format,
    })
}

fn render(
    people: &[Person],
    format: OutputFormat,
    root_tag: &str,
    item_tag: &str,
) -> Result<String> {
    match format {
        OutputFormat::Xml => render_document(people, root_tag, item_tag),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(people)?),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    async fn extract(&self) -> Result<String> {
        let path = self.config.input_path();
        tracing::debug!("Reading input from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        let text = String::from_utf8(bytes)?;

        tracing::debug!("Read {} bytes", text.len());
        Ok(text)
    }

    async fn transform(&self, text: String) -> Result<Conversion> {
        let conversion = convert(
            &text,
            self.config.output_format(),
            self.config.root_tag(),
            self.config.item_tag(),
        )?;

        tracing::debug!(
            "Parsed {} people with {} family members",
            conversion.people.len(),
            conversion
                .people
                .iter()
                .map(|p| p.family.len())
                .sum::<usize>()
        );
        Ok(conversion)
    }

    async fn load(&self, result: Conversion) -> Result<String> {
        if let Some(path) = self.config.output_path() {
            tracing::debug!(
                "Writing {} document ({} bytes) to {}",
                result.format.extension(),
                result.document.len(),
                path
            );
            self.storage
                .write_file(path, result.document.as_bytes())
                .await?;
        }
        Ok(result.document)
    }
}
