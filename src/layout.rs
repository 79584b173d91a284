//! # Draw Plan
//!
//! Composes the certificate as an explicit, ordered list of draw
//! instructions. The order is back-to-front and is part of the contract:
//! the background paints first, then the border, then the ornament rows,
//! images, and text blocks, so no later instruction may occlude text
//! placed before it.
//!
//! The instruction list is pure data. Text instructions carry absolute
//! baseline coordinates computed here from real font metrics, which makes
//! two plans for the same request directly comparable for equality.

use crate::assets::AssetSet;
use crate::font::{FontFace, FontRole};
use crate::geometry as geo;
use crate::image_loader::LoadedImage;
use crate::model::CertificateRequest;

/// Fixed wording of the certificate.
pub const TITLE_TEXT: &str = "Certificate of Achievement";
pub const CAPTION_TEXT: &str = "This certificate is proudly awarded to";
pub const BODY_TEXT: &str = "In recognition of your unwavering commitment, hard work, and \
                             resilience. May you continue to grow and achieve greatness.";
pub const DATE_PREFIX: &str = "Date: ";
pub const SIGNER_NAME: &str = "Sir Zia Khan";

/// The ornament rows repeat this motif a fixed number of times.
pub const ORNAMENT_MOTIF: &str = "\u{2605} ";
pub const ORNAMENT_REPEAT: usize = 40;

/// One drawing instruction. Coordinates are millimetres from the top-left
/// of the page; text `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: LoadedImage,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: f64,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        role: FontRole,
        size: f64,
    },
}

/// Build the full draw plan for one certificate.
pub fn compose(request: &CertificateRequest, assets: &AssetSet) -> Vec<DrawOp> {
    let regular = &assets.fonts.regular;
    let bold = &assets.fonts.bold;
    let mut ops = Vec::new();

    // Backdrop, beneath everything else.
    if let Some(bg) = &assets.background {
        ops.push(DrawOp::Image {
            x: geo::BORDER_X,
            y: geo::BORDER_Y,
            width: geo::BORDER_WIDTH,
            height: geo::BORDER_HEIGHT,
            image: bg.clone(),
        });
    }

    ops.push(DrawOp::Rect {
        x: geo::BORDER_X,
        y: geo::BORDER_Y,
        width: geo::BORDER_WIDTH,
        height: geo::BORDER_HEIGHT,
        stroke: geo::BORDER_STROKE,
    });

    let ornament: String = ORNAMENT_MOTIF.repeat(ORNAMENT_REPEAT);
    ops.push(centered(
        &ornament,
        regular,
        geo::ORNAMENT_SIZE,
        geo::cell_baseline(geo::ORNAMENT_TOP_Y, geo::ORNAMENT_ROW_HEIGHT, geo::ORNAMENT_SIZE),
        geo::TEXT_X,
        geo::TEXT_WIDTH,
    ));

    // Logo overlaps the ornament row region by design. When unconfigured
    // the gap is left visible.
    if let Some(logo) = &assets.logo {
        ops.push(DrawOp::Image {
            x: geo::LOGO_X,
            y: geo::LOGO_Y,
            width: geo::LOGO_WIDTH,
            height: geo::LOGO_WIDTH / logo.aspect(),
            image: logo.clone(),
        });
    }

    ops.push(centered(
        TITLE_TEXT,
        bold,
        geo::TITLE_SIZE,
        geo::cell_baseline(geo::TITLE_Y, geo::TITLE_HEIGHT, geo::TITLE_SIZE),
        geo::TEXT_X,
        geo::TEXT_WIDTH,
    ));

    ops.push(centered(
        CAPTION_TEXT,
        regular,
        geo::CAPTION_SIZE,
        geo::cell_baseline(geo::CAPTION_Y, geo::CAPTION_HEIGHT, geo::CAPTION_SIZE),
        geo::TEXT_X,
        geo::TEXT_WIDTH,
    ));

    let name_size = fit_size(geo::NAME_SIZE, geo::NAME_MIN_SIZE, geo::TEXT_WIDTH, |size| {
        bold.measure_mm(&request.recipient_name, size)
    });
    ops.push(centered(
        &request.recipient_name,
        bold,
        name_size,
        geo::cell_baseline(geo::NAME_Y, geo::NAME_HEIGHT, name_size),
        geo::TEXT_X,
        geo::TEXT_WIDTH,
    ));

    for (i, line) in wrap(BODY_TEXT, geo::TEXT_WIDTH, |s| {
        regular.measure_mm(s, geo::BODY_SIZE)
    })
    .iter()
    .enumerate()
    {
        let cell_y = geo::BODY_Y + i as f64 * geo::BODY_LINE_HEIGHT;
        ops.push(centered(
            line,
            regular,
            geo::BODY_SIZE,
            geo::cell_baseline(cell_y, geo::BODY_LINE_HEIGHT, geo::BODY_SIZE),
            geo::TEXT_X,
            geo::TEXT_WIDTH,
        ));
    }

    let date_text = format!("{}{}", DATE_PREFIX, request.formatted_date());
    ops.push(centered(
        &date_text,
        regular,
        geo::DATE_SIZE,
        geo::cell_baseline(geo::DATE_Y, geo::DATE_HEIGHT, geo::DATE_SIZE),
        geo::TEXT_X,
        geo::TEXT_WIDTH,
    ));

    ops.push(DrawOp::Line {
        x1: geo::SIGNATURE_X,
        y1: geo::SIGNATURE_LINE_Y,
        x2: geo::SIGNATURE_X + geo::SIGNATURE_WIDTH,
        y2: geo::SIGNATURE_LINE_Y,
        stroke: geo::HAIRLINE,
    });

    if let Some(signature) = &assets.signature {
        ops.push(DrawOp::Image {
            x: geo::SIGNATURE_X,
            y: geo::SIGNATURE_IMAGE_Y,
            width: geo::SIGNATURE_IMAGE_WIDTH,
            height: geo::SIGNATURE_IMAGE_WIDTH / signature.aspect(),
            image: signature.clone(),
        });
    }

    ops.push(centered(
        SIGNER_NAME,
        regular,
        geo::SIGNATURE_CAPTION_SIZE,
        geo::cell_baseline(
            geo::SIGNATURE_CAPTION_Y,
            geo::SIGNATURE_CAPTION_HEIGHT,
            geo::SIGNATURE_CAPTION_SIZE,
        ),
        geo::SIGNATURE_X,
        geo::SIGNATURE_WIDTH,
    ));

    ops.push(centered(
        &ornament,
        regular,
        geo::ORNAMENT_SIZE,
        geo::cell_baseline(geo::ORNAMENT_BOTTOM_Y, geo::ORNAMENT_ROW_HEIGHT, geo::ORNAMENT_SIZE),
        geo::TEXT_X,
        geo::TEXT_WIDTH,
    ));

    ops
}

/// A text instruction horizontally centered within a column.
fn centered(
    content: &str,
    face: &FontFace,
    size: f64,
    baseline: f64,
    column_x: f64,
    column_width: f64,
) -> DrawOp {
    let text_width = face.measure_mm(content, size);
    DrawOp::Text {
        x: column_x + (column_width - text_width) / 2.0,
        y: baseline,
        content: content.to_string(),
        role: face.role,
        size,
    }
}

/// Largest size not exceeding `max` at which the measured width fits
/// `width_mm`, stepping down half a point at a time. The text itself is
/// never truncated; below `min` the line is allowed to overflow.
fn fit_size(max: f64, min: f64, width_mm: f64, measure_at: impl Fn(f64) -> f64) -> f64 {
    let mut size = max;
    while size > min && measure_at(size) > width_mm {
        size -= 0.5;
    }
    size
}

/// Greedy word wrap against measured widths. A single word wider than the
/// column gets its own line rather than being broken mid-word.
fn wrap(text: &str, width_mm: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if !current.is_empty() && measure(&candidate) > width_mm {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
