//! # Page Geometry
//!
//! The fixed coordinate table for the certificate page. Every element of
//! the certificate draws at a constant anchor taken from here; nothing is
//! computed from content except the recipient-name font size and the body
//! word wrap, and neither of those moves an anchor.
//!
//! All lengths are millimetres measured from the top-left corner of an A4
//! landscape page. Font sizes are points. The PDF serializer converts to
//! point coordinates (bottom-left origin) at write time, so everything
//! upstream speaks one unit.

/// A4 landscape page, mm.
pub const PAGE_WIDTH: f64 = 297.0;
pub const PAGE_HEIGHT: f64 = 210.0;

/// Inset of the outer border (and the background image) from each page edge.
pub const MARGIN: f64 = 5.0;

/// Outer border rectangle.
pub const BORDER_X: f64 = MARGIN;
pub const BORDER_Y: f64 = MARGIN;
pub const BORDER_WIDTH: f64 = PAGE_WIDTH - 2.0 * MARGIN;
pub const BORDER_HEIGHT: f64 = PAGE_HEIGHT - 2.0 * MARGIN;

/// Stroke widths, mm. The outer border must read visibly heavier than any
/// inner stroke.
pub const BORDER_STROKE: f64 = 1.5;
pub const HAIRLINE: f64 = 0.2;

/// The centered text column: page width minus a 10 mm gutter on each side.
/// Its center coincides with the page center (148.5 mm).
pub const TEXT_X: f64 = 10.0;
pub const TEXT_WIDTH: f64 = PAGE_WIDTH - 2.0 * TEXT_X;

/// Decorative glyph rows at the top and bottom of the page.
pub const ORNAMENT_TOP_Y: f64 = 10.0;
pub const ORNAMENT_BOTTOM_Y: f64 = PAGE_HEIGHT - 20.0;
pub const ORNAMENT_ROW_HEIGHT: f64 = 10.0;
pub const ORNAMENT_SIZE: f64 = 14.0;

/// Logo anchor, upper-left, overlapping the top ornament row region.
pub const LOGO_X: f64 = 10.0;
pub const LOGO_Y: f64 = 10.0;
pub const LOGO_WIDTH: f64 = 30.0;

/// Text block anchors, top to bottom. Each `*_Y` is the top of the block's
/// cell; baselines derive from [`cell_baseline`].
pub const TITLE_Y: f64 = 35.0;
pub const TITLE_HEIGHT: f64 = 12.0;
pub const TITLE_SIZE: f64 = 28.0;

pub const CAPTION_Y: f64 = 55.0;
pub const CAPTION_HEIGHT: f64 = 10.0;
pub const CAPTION_SIZE: f64 = 18.0;

pub const NAME_Y: f64 = 70.0;
pub const NAME_HEIGHT: f64 = 12.0;
pub const NAME_SIZE: f64 = 24.0;
/// Floor for the auto-shrunk recipient name.
pub const NAME_MIN_SIZE: f64 = 6.0;

pub const BODY_Y: f64 = 90.0;
pub const BODY_LINE_HEIGHT: f64 = 8.0;
pub const BODY_SIZE: f64 = 14.0;

pub const DATE_Y: f64 = 111.0;
pub const DATE_HEIGHT: f64 = 10.0;
pub const DATE_SIZE: f64 = 14.0;

/// Signature column, anchored in the lower-right quadrant. The caption is
/// centered within this column, not the page.
pub const SIGNATURE_X: f64 = 210.0;
pub const SIGNATURE_WIDTH: f64 = 60.0;
pub const SIGNATURE_LINE_Y: f64 = 165.0;
pub const SIGNATURE_IMAGE_Y: f64 = 135.0;
pub const SIGNATURE_IMAGE_WIDTH: f64 = 40.0;
pub const SIGNATURE_CAPTION_Y: f64 = SIGNATURE_LINE_Y + 2.0;
pub const SIGNATURE_CAPTION_HEIGHT: f64 = 10.0;
pub const SIGNATURE_CAPTION_SIZE: f64 = 12.0;

const MM_PER_PT: f64 = 25.4 / 72.0;

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_PT
}

/// Convert a point length (font sizes) to millimetres.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_PT
}

/// Baseline of a line of text vertically centered in a cell, matching the
/// optical centering of classic cell-based layout: half the cell plus a
/// bit under half the type size.
pub fn cell_baseline(cell_y: f64, cell_height: f64, font_size_pt: f64) -> f64 {
    cell_y + cell_height / 2.0 + 0.3 * pt_to_mm(font_size_pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_landscape_a4() {
        assert!(PAGE_WIDTH > PAGE_HEIGHT);
        assert!((mm_to_pt(PAGE_WIDTH) - 841.89).abs() < 0.01);
        assert!((mm_to_pt(PAGE_HEIGHT) - 595.28).abs() < 0.01);
    }

    #[test]
    fn test_border_thicker_than_inner_strokes() {
        assert!(BORDER_STROKE > HAIRLINE * 2.0);
    }

    #[test]
    fn test_anchors_inside_border() {
        let inside_y = |y: f64| y > BORDER_Y && y < BORDER_Y + BORDER_HEIGHT;
        for y in [
            ORNAMENT_TOP_Y,
            LOGO_Y,
            TITLE_Y,
            CAPTION_Y,
            NAME_Y,
            BODY_Y,
            DATE_Y,
            SIGNATURE_IMAGE_Y,
            SIGNATURE_LINE_Y,
            SIGNATURE_CAPTION_Y,
            ORNAMENT_BOTTOM_Y,
        ] {
            assert!(inside_y(y), "anchor y={} lies outside the border", y);
        }
        assert!(TEXT_X > BORDER_X);
        assert!(TEXT_X + TEXT_WIDTH < BORDER_X + BORDER_WIDTH);
        assert!(SIGNATURE_X + SIGNATURE_WIDTH < BORDER_X + BORDER_WIDTH);
    }

    #[test]
    fn test_vertical_block_order() {
        // Top to bottom: ornament, title, caption, name, body, date,
        // signature, ornament. The logo shares the ornament region by design.
        let order = [
            ORNAMENT_TOP_Y,
            TITLE_Y,
            CAPTION_Y,
            NAME_Y,
            BODY_Y,
            DATE_Y,
            SIGNATURE_LINE_Y,
            ORNAMENT_BOTTOM_Y,
        ];
        for pair in order.windows(2) {
            assert!(pair[0] < pair[1], "blocks out of order: {} >= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_signature_in_lower_right_quadrant() {
        assert!(SIGNATURE_X >= PAGE_WIDTH / 2.0);
        assert!(SIGNATURE_LINE_Y >= PAGE_HEIGHT / 2.0);
        assert!(SIGNATURE_IMAGE_Y >= PAGE_HEIGHT / 2.0);
    }

    #[test]
    fn test_date_anchor_clears_two_body_lines() {
        assert!(DATE_Y >= BODY_Y + 2.0 * BODY_LINE_HEIGHT);
    }

    #[test]
    fn test_unit_conversion_round_trips() {
        assert!((pt_to_mm(mm_to_pt(123.4)) - 123.4).abs() < 1e-9);
        // 72 pt is an inch
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-9);
    }
}
