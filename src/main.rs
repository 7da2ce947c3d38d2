use clap::Parser;
use people_xml::utils::{logger, validation::Validate};
use people_xml::{CliConfig, ConvertEngine, ConvertPipeline, LocalStorage, TomlConfig};
use std::io::Write;

fn fail(e: &people_xml::ConvertError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    let file_config = match config.config.as_deref().map(TomlConfig::from_file) {
        Some(Ok(file)) => Some(file),
        Some(Err(e)) => {
            eprintln!("❌ Failed to load config file: {}", e);
            std::process::exit(e.exit_code());
        }
        None => None,
    };
    if let Some(file) = &file_config {
        config.apply_file_config(file);
    }

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Some(file) = &file_config {
        if let Err(e) = file.validate() {
            fail(&e);
        }
    }
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let to_stdout = config.output.is_none();
    let pipeline = ConvertPipeline::new(LocalStorage::current_dir(), config);
    let engine = ConvertEngine::new(pipeline);

    match engine.run().await {
        Ok(document) => {
            if to_stdout {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
            }
            tracing::info!("✅ Conversion completed successfully");
        }
        Err(e) => fail(&e),
    }

    Ok(())
}
