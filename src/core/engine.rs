use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ConvertEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ConvertEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order and returns the rendered
    /// document. The first failing stage aborts the run.
    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting conversion");

        tracing::debug!("Extracting input...");
        let text = self.pipeline.extract().await?;
        tracing::info!("Extracted {} lines", text.split('\n').count());

        tracing::debug!("Transforming records...");
        let conversion = self.pipeline.transform(text).await?;
        tracing::info!("Converted {} people", conversion.people.len());

        tracing::debug!("Loading document...");
        let document = self.pipeline.load(conversion).await?;
        tracing::info!("Conversion finished in {:?}", started.elapsed());

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Conversion, OutputFormat};
    use crate::utils::error::{ConvertError, ParseError, ParseErrorKind};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPipeline {
        input: &'static str,
        loaded: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<String> {
            Ok(self.input.to_string())
        }

        async fn transform(&self, text: String) -> Result<Conversion> {
            if text.is_empty() {
                return Err(ParseError {
                    line: 1,
                    kind: ParseErrorKind::EmptyLine,
                }
                .into());
            }
            Ok(Conversion {
                people: Vec::new(),
                document: format!("<doc>{}</doc>", text),
                format: OutputFormat::Xml,
            })
        }

        async fn load(&self, result: Conversion) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok(result.document)
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_stages() {
        let engine = ConvertEngine::new(StubPipeline {
            input: "abc",
            loaded: AtomicBool::new(false),
        });

        assert_eq!(engine.run().await.unwrap(), "<doc>abc</doc>");
        assert!(engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_stops_at_failing_stage() {
        let engine = ConvertEngine::new(StubPipeline {
            input: "",
            loaded: AtomicBool::new(false),
        });

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
