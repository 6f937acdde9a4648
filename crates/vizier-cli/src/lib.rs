//! CLI logic for the Vizier diagram tool.
//!
//! Reads a JSON diagram description, renders it through the engine and
//! writes the exported artifact (PNG by default, SVG text on request).

mod args;
mod input;

pub use args::{Args, ExportStrategy, OutputFormat};

use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use miette::Diagnostic;
use thiserror::Error;

use vizier::export::svg::SerializeOptions;
use vizier::{ContainerRegistry, Dispatcher, EngineConfig, Exporter, Strategy, VizierError};

/// Container id the CLI renders into.
const CONTAINER_ID: &str = "vizier-canvas";

/// Errors surfaced to the terminal.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not a valid diagram description: {0}")]
    #[diagnostic(help("the input must be a JSON object with a `type` tag and matching payload"))]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] VizierError),

    #[error(transparent)]
    Export(#[from] vizier::export::Error),
}

/// Run the Vizier CLI application.
///
/// Renders the input description and writes the export artifact.
///
/// # Errors
///
/// Returns [`CliError`] for file I/O failures, undecodable input, render
/// failures and export failures.
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        format:? = args.format;
        "Processing description",
    );

    let source = fs::read_to_string(&args.input)?;
    let description = input::decode(&source)?;

    let config = EngineConfig::default();
    let registry = ContainerRegistry::new();
    registry.register(CONTAINER_ID);

    let mut dispatcher = Dispatcher::new(registry.clone(), CONTAINER_ID, config.clone());
    dispatcher.render(&description)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(args.format));

    match args.format {
        OutputFormat::Svg => {
            let container = registry
                .resolve(CONTAINER_ID)
                .expect("container was registered above");
            let borrowed = container.borrow();
            let scene = borrowed.scene().expect("render succeeded above");
            let options = SerializeOptions {
                background: Some(config.palette().surface()),
                include_transient: false,
            };
            let document =
                vizier::export::svg::scene_to_document(scene, borrowed.content_size(), &options);
            fs::write(&output, document.to_string())?;
        }
        OutputFormat::Png => {
            let exporter = Exporter::new(registry, config);
            let payload = match args.strategy {
                ExportStrategy::Smart => exporter.smart_export(CONTAINER_ID)?,
                ExportStrategy::Vector => {
                    exporter.export(CONTAINER_ID, Strategy::VectorSerialize)?
                }
                ExportStrategy::Raster => exporter.export(CONTAINER_ID, Strategy::DirectRaster)?,
                ExportStrategy::Clone => exporter.export(CONTAINER_ID, Strategy::IsolatedClone)?,
            };
            fs::write(&output, payload.bytes())?;
        }
    }

    info!(output_file = output; "Export written");
    Ok(())
}

/// The conventional timestamped artifact name.
fn default_output_name(format: OutputFormat) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    format!("visualization-{timestamp}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_name_embeds_extension() {
        let png = default_output_name(OutputFormat::Png);
        assert!(png.starts_with("visualization-"));
        assert!(png.ends_with(".png"));
        assert!(default_output_name(OutputFormat::Svg).ends_with(".svg"));
    }
}
