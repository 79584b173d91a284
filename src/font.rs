//! # Font Loading and Measurement
//!
//! The certificate draws every text block in one typeface family at two
//! weights, both supplied as TrueType files. Unlike images, fonts are
//! mandatory: without real glyph metrics there is no way to center a line
//! or wrap the body paragraph, so a weight that fails to load aborts the
//! whole generation before any drawing happens.
//!
//! Parsed metrics are captured once at load time (via ttf-parser) so the
//! later pipeline stages never re-parse the face.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::Error;
use crate::geometry;

/// Which of the two mandatory weights a font file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Regular,
    Bold,
}

impl FontRole {
    /// The PDF BaseFont name for this weight.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            FontRole::Regular => "Laurea-Regular",
            FontRole::Bold => "Laurea-Bold",
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontRole::Regular => write!(f, "regular"),
            FontRole::Bold => write!(f, "bold"),
        }
    }
}

/// A parsed TrueType face: the raw bytes for embedding plus the metrics
/// layout and serialization need.
#[derive(Debug, Clone)]
pub struct FontFace {
    pub role: FontRole,
    pub data: Vec<u8>,
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    /// Cap height when the face reports one; the ascender otherwise.
    pub cap_height: i16,
    /// (x_min, y_min, x_max, y_max) in font units.
    pub bbox: (i16, i16, i16, i16),
    advance_widths: HashMap<char, u16>,
    glyph_ids: HashMap<char, u16>,
    default_advance: u16,
}

impl FontFace {
    /// Read and parse a weight from disk. Any failure — unreadable file,
    /// unparsable table data — is a `MissingFontAsset` for that role.
    pub fn from_file(path: &Path, role: FontRole) -> Result<Self, Error> {
        let data = std::fs::read(path).map_err(|e| Error::MissingFontAsset {
            role,
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(data, role).map_err(|reason| Error::MissingFontAsset {
            role,
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse a face from raw TTF bytes and capture its metrics.
    pub fn from_bytes(data: Vec<u8>, role: FontRole) -> Result<Self, String> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| e.to_string())?;

        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();
        let cap_height = face.capital_height().unwrap_or(ascender);
        let gbb = face.global_bounding_box();
        let bbox = (gbb.x_min, gbb.y_min, gbb.x_max, gbb.y_max);

        let mut advance_widths = HashMap::new();
        let mut glyph_ids = HashMap::new();
        let mut default_advance = 0u16;

        // Sample the BMP once to build width and glyph ID maps.
        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    glyph_ids.insert(ch, glyph_id.0);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(FontFace {
            role,
            data,
            units_per_em,
            ascender,
            descender,
            cap_height,
            bbox,
            advance_widths,
            glyph_ids,
            default_advance,
        })
    }

    /// Glyph ID for a character, 0 (.notdef) when the face has no glyph.
    pub fn glyph_id(&self, ch: char) -> u16 {
        self.glyph_ids.get(&ch).copied().unwrap_or(0)
    }

    /// Advance of a character in font units.
    pub fn advance_units(&self, ch: char) -> u16 {
        self.advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance)
    }

    /// Advance of a character in points at the given size.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        (self.advance_units(ch) as f64 / self.units_per_em as f64) * font_size
    }

    /// Width of a string in points at the given size.
    pub fn measure(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }

    /// Width of a string in millimetres at the given size.
    pub fn measure_mm(&self, text: &str, font_size: f64) -> f64 {
        geometry::pt_to_mm(self.measure(text, font_size))
    }
}

/// The resolved pair of mandatory weights.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontSet {
    pub fn face(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = FontFace::from_bytes(vec![0u8; 16], FontRole::Regular);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_missing_font_asset() {
        let err = FontFace::from_file(Path::new("/nonexistent/regular.ttf"), FontRole::Regular)
            .unwrap_err();
        match err {
            Error::MissingFontAsset { role, .. } => assert_eq!(role, FontRole::Regular),
            other => panic!("expected MissingFontAsset, got {:?}", other),
        }
    }

    #[test]
    fn test_role_pdf_names_differ() {
        assert_ne!(FontRole::Regular.pdf_name(), FontRole::Bold.pdf_name());
    }
}
