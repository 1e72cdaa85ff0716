//! QR encoding through the `qrcode` crate.

use qr_plate::{GeometryError, ModuleMatrix, SymbolSource};
use qrcode::{Color, EcLevel, QrCode};

/// Encodes content as the smallest QR symbol that fits, without a quiet zone.
#[derive(Debug, Clone, Copy)]
pub struct QrCodeSource {
    pub ec_level: EcLevel,
}

impl Default for QrCodeSource {
    fn default() -> Self {
        Self { ec_level: EcLevel::M }
    }
}

impl SymbolSource for QrCodeSource {
    fn module_matrix(&self, content: &str) -> Result<ModuleMatrix, GeometryError> {
        if content.is_empty() {
            return Err(GeometryError::invalid_matrix("no content to encode"));
        }

        let code = QrCode::with_error_correction_level(content.as_bytes(), self.ec_level)
            .map_err(|e| GeometryError::invalid_matrix(format!("cannot encode content: {e}")))?;

        let width = code.width();
        let rows = code
            .to_colors()
            .chunks(width)
            .map(|row| row.iter().map(|&color| color == Color::Dark).collect())
            .collect();

        ModuleMatrix::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_version_one() {
        let matrix = QrCodeSource::default().module_matrix("hello").unwrap();
        assert_eq!(matrix.size(), 21);
        // Finder pattern corner
        assert!(matrix.is_set(0, 0));
        assert!(matrix.is_set(0, 6));
        assert!(!matrix.is_set(1, 1));
    }

    #[test]
    fn longer_text_grows_the_symbol() {
        let url = "https://example.com/a/rather/long/path/that/needs/a/bigger/symbol";
        let matrix = QrCodeSource::default().module_matrix(url).unwrap();
        assert!(matrix.size() > 21);
        assert_eq!((matrix.size() - 17) % 4, 0);
    }

    #[test]
    fn empty_content_rejected() {
        assert!(QrCodeSource::default().module_matrix("").is_err());
    }
}
