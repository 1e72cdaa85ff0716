//! Command-line arguments and how they map onto [`LayoutParameters`].

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::{ArgGroup, Parser};
use qr_plate::{FeatureMode, LayoutParameters};

/// Turn a QR code into a 3D printable plate (STL)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "image", "matrix"])))]
pub struct Cli {
    /// Content to encode as a QR symbol
    pub text: Option<String>,

    /// Decode the content from a picture of a QR code (PNG or JPEG)
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,

    /// Read the module grid from a text file instead (`#`/`1` dark, `.`/`0` light)
    #[arg(long, value_name = "FILE")]
    pub matrix: Option<PathBuf>,

    /// Output STL path [default: qr-plate-<timestamp>.stl]
    #[arg(short, long, value_name = "OUT.stl")]
    pub output: Option<PathBuf>,

    /// TOML file with layout parameters; flags override its values
    #[arg(long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Plate thickness in mm
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Pillar height or pocket depth in mm
    #[arg(long)]
    pub feature_height: Option<f64>,

    /// relief (raised modules) or inlay (recessed modules)
    #[arg(long)]
    pub mode: Option<FeatureMode>,

    /// Add a mounting hole above the pattern
    #[arg(long)]
    pub hole: bool,

    /// Mounting hole radius in mm
    #[arg(long)]
    pub hole_radius: Option<f64>,

    /// Text engraved on the back of the plate
    #[arg(long)]
    pub back_text: Option<String>,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    pub ascii: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parameters from `--params`, or defaults, with flags applied on top.
    pub fn layout_parameters(&self) -> anyhow::Result<LayoutParameters> {
        let mut params = match &self.params {
            Some(path) => load_parameters(path)?,
            None => LayoutParameters::default(),
        };

        if let Some(thickness) = self.thickness {
            params.plate_thickness = thickness;
        }
        if let Some(height) = self.feature_height {
            params.feature_height = height;
        }
        if let Some(mode) = self.mode {
            params.feature_mode = mode;
        }
        if self.hole {
            params.hole_enabled = true;
        }
        if let Some(radius) = self.hole_radius {
            params.hole_radius = radius;
        }
        if let Some(text) = &self.back_text {
            params.back_text = Some(text.clone());
        }

        Ok(params)
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(default_output_path)
    }
}

fn load_parameters(path: &Path) -> anyhow::Result<LayoutParameters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameters file: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid parameters in {}", path.display()))
}

/// A fresh file name in the current directory.
fn default_output_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    PathBuf::from(format!("qr-plate-{nanos}.stl"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("qr-plate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn requires_an_input() {
        assert!(Cli::try_parse_from(["qr-plate"]).is_err());
        assert!(Cli::try_parse_from(["qr-plate", "hi", "--matrix", "grid.txt"]).is_err());
        assert!(Cli::try_parse_from(["qr-plate", "--image", "qr.png", "--matrix", "grid.txt"]).is_err());
        assert!(Cli::try_parse_from(["qr-plate", "--image", "qr.png"]).is_ok());
    }

    #[test]
    fn flags_map_to_parameters() {
        let cli = parse(&["hello", "--mode", "inlay", "--hole", "--thickness", "4", "--back-text", "Hi"]);
        let params = cli.layout_parameters().unwrap();

        assert_eq!(params.feature_mode, FeatureMode::Inlay);
        assert!(params.hole_enabled);
        assert_eq!(params.plate_thickness, 4.0);
        assert_eq!(params.back_text.as_deref(), Some("Hi"));
        assert_eq!(params.feature_height, 1.0);
    }

    #[test]
    fn flags_override_params_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "plate_thickness = 5.0\nfeature_height = 2.0\nhole_enabled = true").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["hello", "--params", path, "--feature-height", "1.5"]);
        let params = cli.layout_parameters().unwrap();

        assert_eq!(params.plate_thickness, 5.0);
        assert_eq!(params.feature_height, 1.5);
        assert!(params.hole_enabled);
    }

    #[test]
    fn bad_params_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "plate_thickness = \"thick\"").unwrap();
        let path = file.path().to_str().unwrap();

        let err = parse(&["hello", "--params", path]).layout_parameters().unwrap_err();
        assert!(err.to_string().contains("Invalid parameters"));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(parse(&["x"]).log_level(), "warn");
        assert_eq!(parse(&["x", "-v"]).log_level(), "info");
        assert_eq!(parse(&["x", "-vvv"]).log_level(), "debug");
    }

    #[test]
    fn default_output_is_stl() {
        let path = parse(&["x"]).output_path();
        let name = path.to_str().unwrap();
        assert!(name.starts_with("qr-plate-") && name.ends_with(".stl"));
    }
}
