//! QR Plate command-line tool
//!
//! Encodes content as a QR symbol, builds the plate and writes it as STL.
//! Content comes from the command line or from a picture of an existing code.
//!
//! # Usage
//!
//! ```bash
//! # Relief plate for a URL
//! qr-plate "https://example.com" -o plate.stl
//!
//! # Inlay with a mounting hole and back text
//! qr-plate "hello" --mode inlay --hole --back-text "Wi-Fi"
//!
//! # Re-make an existing code from a photo
//! qr-plate --image menu.png -o menu.stl
//!
//! # Parameters from a file, thickness overridden
//! qr-plate "hello" --params plate.toml --thickness 4
//! ```

mod cli;
mod decode;
mod source;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qr_plate::{build, Exporter, ModuleMatrix, StlExporter, StlFormat, SymbolSource};

use crate::cli::Cli;
use crate::decode::read_qr_image;
use crate::source::QrCodeSource;

/// Printed to stdout once the STL is written.
///
/// `qr_content` is `null` when the grid was read from a matrix file.
#[derive(Debug, Serialize)]
struct Summary {
    qr_content: Option<String>,
    stl_path: String,
    features: usize,
    triangles: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let params = cli.layout_parameters()?;
    let (content, matrix) = read_matrix(&cli)?;
    info!(size = matrix.size(), dark = matrix.set_count(), "module matrix ready");

    let solid = build(&matrix, &params).context("Failed to build plate")?;
    let summary_counts = (solid.feature_count(), solid.triangle_count());

    let path = cli.output_path();
    let format = if cli.ascii { StlFormat::Ascii } else { StlFormat::Binary };
    StlExporter::new(format)
        .export(solid, &path)
        .context("Failed to write STL")?;

    let summary = Summary {
        qr_content: content,
        stl_path: path.display().to_string(),
        features: summary_counts.0,
        triangles: summary_counts.1,
    };
    println!("{}", serde_json::to_string(&summary)?);

    Ok(())
}

/// The encoded content, when there is one, and the module grid.
fn read_matrix(cli: &Cli) -> anyhow::Result<(Option<String>, ModuleMatrix)> {
    if let Some(path) = &cli.matrix {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read matrix file: {}", path.display()))?;
        let matrix = ModuleMatrix::from_text(&text)
            .with_context(|| format!("Invalid matrix in {}", path.display()))?;
        return Ok((None, matrix));
    }

    let content = match &cli.image {
        Some(path) => {
            let content = read_qr_image(path)?;
            info!(image = %path.display(), %content, "decoded QR image");
            content
        }
        None => cli.text.clone().unwrap_or_default(),
    };

    let matrix = QrCodeSource::default()
        .module_matrix(&content)
        .context("Failed to encode QR content")?;
    Ok((Some(content), matrix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn matrix_file_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#.#\n.#.\n#.#").unwrap();
        let cli = Cli::try_parse_from(["qr-plate", "--matrix", file.path().to_str().unwrap()]).unwrap();

        let (content, matrix) = read_matrix(&cli).unwrap();
        assert_eq!(content, None);
        assert_eq!(matrix.size(), 3);
        assert_eq!(matrix.set_count(), 5);
    }

    #[test]
    fn text_input_is_encoded() {
        let cli = Cli::try_parse_from(["qr-plate", "hello"]).unwrap();
        let (content, matrix) = read_matrix(&cli).unwrap();
        assert_eq!(content.as_deref(), Some("hello"));
        assert_eq!(matrix.size(), 21);
    }

    #[test]
    fn image_input_is_decoded_and_re_encoded() {
        let png = crate::decode::tests::write_qr_png("hello");
        let cli = Cli::try_parse_from(["qr-plate", "--image", png.path().to_str().unwrap()]).unwrap();

        let (content, matrix) = read_matrix(&cli).unwrap();
        assert_eq!(content.as_deref(), Some("hello"));

        let (_, from_text) = read_matrix(&Cli::try_parse_from(["qr-plate", "hello"]).unwrap()).unwrap();
        assert_eq!(matrix, from_text);
    }

    #[test]
    fn unreadable_image_is_an_error() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        image::GrayImage::from_pixel(64, 64, image::Luma([255])).save(file.path()).unwrap();
        let cli = Cli::try_parse_from(["qr-plate", "--image", file.path().to_str().unwrap()]).unwrap();

        let err = read_matrix(&cli).unwrap_err();
        assert!(err.to_string().contains("Unable to read a QR code"));
    }

    #[test]
    fn summary_json_fields() {
        let summary = Summary {
            qr_content: Some("hello".into()),
            stl_path: "plate.stl".into(),
            features: 3,
            triangles: 36,
        };
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["qr_content"], "hello");
        assert_eq!(json["stl_path"], "plate.stl");
        assert_eq!(json["features"], 3);
    }

    #[test]
    fn summary_without_content_is_null() {
        let summary = Summary {
            qr_content: None,
            stl_path: "plate.stl".into(),
            features: 5,
            triangles: 60,
        };
        let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
        assert!(json["qr_content"].is_null());
    }
}
