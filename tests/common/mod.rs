//! Shared fixtures for the integration tests.
//!
//! Font files are built in memory: a minimal TrueType face with head,
//! hhea, maxp, hmtx and a format-4 cmap covering printable ASCII plus
//! U+2605 (the ornament glyph). That is everything metrics parsing needs,
//! and it keeps binary blobs out of the repository the same way the image
//! fixtures are encoded on the fly.

use std::fs;
use std::path::Path;

use laurea::AssetPaths;
use tempfile::TempDir;

/// Glyph coverage of the test face: .notdef, U+0020..=U+007E, U+2605.
const NUM_GLYPHS: u16 = 97;
const UNITS_PER_EM: u16 = 1000;

fn be16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn bei16(buf: &mut Vec<u8>, v: i16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn be32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

fn head_table() -> Vec<u8> {
    let mut t = Vec::new();
    be32(&mut t, 0x0001_0000); // version
    be32(&mut t, 0x0001_0000); // fontRevision
    be32(&mut t, 0); // checkSumAdjustment
    be32(&mut t, 0x5F0F_3CF5); // magicNumber
    be16(&mut t, 0); // flags
    be16(&mut t, UNITS_PER_EM);
    t.extend_from_slice(&[0u8; 8]); // created
    t.extend_from_slice(&[0u8; 8]); // modified
    bei16(&mut t, 0); // xMin
    bei16(&mut t, -200); // yMin
    bei16(&mut t, 600); // xMax
    bei16(&mut t, 800); // yMax
    be16(&mut t, 0); // macStyle
    be16(&mut t, 8); // lowestRecPPEM
    bei16(&mut t, 2); // fontDirectionHint
    bei16(&mut t, 0); // indexToLocFormat
    bei16(&mut t, 0); // glyphDataFormat
    t
}

fn hhea_table(advance: u16) -> Vec<u8> {
    let mut t = Vec::new();
    be32(&mut t, 0x0001_0000); // version
    bei16(&mut t, 800); // ascender
    bei16(&mut t, -200); // descender
    bei16(&mut t, 0); // lineGap
    be16(&mut t, advance); // advanceWidthMax
    bei16(&mut t, 0); // minLeftSideBearing
    bei16(&mut t, 0); // minRightSideBearing
    bei16(&mut t, advance as i16); // xMaxExtent
    bei16(&mut t, 1); // caretSlopeRise
    bei16(&mut t, 0); // caretSlopeRun
    bei16(&mut t, 0); // caretOffset
    for _ in 0..4 {
        bei16(&mut t, 0); // reserved
    }
    bei16(&mut t, 0); // metricDataFormat
    be16(&mut t, NUM_GLYPHS); // numberOfHMetrics
    t
}

fn maxp_table() -> Vec<u8> {
    let mut t = Vec::new();
    be32(&mut t, 0x0000_5000); // version 0.5: no glyf data required
    be16(&mut t, NUM_GLYPHS);
    t
}

fn hmtx_table(advance: u16) -> Vec<u8> {
    let mut t = Vec::new();
    for _ in 0..NUM_GLYPHS {
        be16(&mut t, advance);
        bei16(&mut t, 0); // left side bearing
    }
    t
}

/// Format-4 cmap: [0x20..=0x7E] -> gids 1..=95, 0x2605 -> gid 96.
fn cmap_table() -> Vec<u8> {
    let mut t = Vec::new();
    be16(&mut t, 0); // version
    be16(&mut t, 1); // numTables
    be16(&mut t, 3); // platformID: Windows
    be16(&mut t, 1); // encodingID: Unicode BMP
    be32(&mut t, 12); // subtable offset

    let end_codes: [u16; 3] = [0x007E, 0x2605, 0xFFFF];
    let start_codes: [u16; 3] = [0x0020, 0x2605, 0xFFFF];
    // idDelta maps start -> gid modulo 65536
    let id_deltas: [u16; 3] = [0xFFE1, 0xDA5B, 0x0001];

    be16(&mut t, 4); // format
    be16(&mut t, 40); // subtable length
    be16(&mut t, 0); // language
    be16(&mut t, 6); // segCountX2
    be16(&mut t, 4); // searchRange
    be16(&mut t, 1); // entrySelector
    be16(&mut t, 2); // rangeShift
    for c in end_codes {
        be16(&mut t, c);
    }
    be16(&mut t, 0); // reservedPad
    for c in start_codes {
        be16(&mut t, c);
    }
    for d in id_deltas {
        be16(&mut t, d);
    }
    for _ in 0..3 {
        be16(&mut t, 0); // idRangeOffset
    }
    t
}

/// Assemble a parseable TTF from the five tables. `advance` is the
/// uniform glyph advance in font units, so two fixture weights can have
/// distinguishable metrics.
pub fn test_font(advance: u16) -> Vec<u8> {
    // Table directory must be sorted by tag.
    let tables: [(&[u8; 4], Vec<u8>); 5] = [
        (b"cmap", cmap_table()),
        (b"head", head_table()),
        (b"hhea", hhea_table(advance)),
        (b"hmtx", hmtx_table(advance)),
        (b"maxp", maxp_table()),
    ];

    let num_tables = tables.len() as u16;
    let mut font = Vec::new();
    be32(&mut font, 0x0001_0000); // sfnt version
    be16(&mut font, num_tables);
    be16(&mut font, 64); // searchRange
    be16(&mut font, 2); // entrySelector
    be16(&mut font, 16); // rangeShift

    let mut offset = 12 + 16 * tables.len();
    let mut records = Vec::new();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        records.extend_from_slice(*tag);
        be32(&mut records, 0); // checksum, not validated by the parser
        be32(&mut records, offset as u32);
        be32(&mut records, data.len() as u32);
        body.extend_from_slice(data);
        let padded = (data.len() + 3) & !3;
        body.extend_from_slice(&vec![0u8; padded - data.len()]);
        offset += padded;
    }

    font.extend_from_slice(&records);
    font.extend_from_slice(&body);
    font
}

/// An opaque RGB PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(width, height, |_, _| image::Rgba([200, 180, 40, 255]));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(encoder, img.as_raw(), width, height, image::ColorType::Rgba8)
        .unwrap();
    buf
}

/// A small JPEG.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |_, _| image::Rgb([10, 60, 120]));
    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
    image::ImageEncoder::write_image(encoder, img.as_raw(), width, height, image::ColorType::Rgb8)
        .unwrap();
    buf
}

/// A temp asset directory with both mandatory fonts in place.
pub struct Fixture {
    pub dir: TempDir,
    pub paths: AssetPaths,
}

impl Fixture {
    /// Fonts only: regular at 500 units, bold at 560.
    pub fn fonts_only() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("regular.ttf"), test_font(500)).unwrap();
        fs::write(dir.path().join("bold.ttf"), test_font(560)).unwrap();
        let paths = AssetPaths::from_dir(dir.path());
        Self { dir, paths }
    }

    /// Fonts plus all three images.
    pub fn with_all_images() -> Self {
        let mut fixture = Self::fonts_only();
        fixture.add_image("background.png", &png_bytes(8, 6));
        fixture.add_image("logo.png", &png_bytes(6, 4));
        fixture.add_image("signature.png", &png_bytes(8, 3));
        fixture.paths = AssetPaths::from_dir(fixture.dir.path());
        fixture
    }

    pub fn add_image(&mut self, name: &str, bytes: &[u8]) {
        fs::write(self.dir.path().join(name), bytes).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
