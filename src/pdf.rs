//! # PDF Serializer
//!
//! Takes the composed draw plan and writes a valid single-page PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. We write the raw bytes ourselves
//! because it gives us full control over the output and keeps the engine
//! self-contained. The PDF spec is verbose but the subset needed for one
//! fixed page — rectangles, lines, text, images — is manageable.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, page, content stream, images)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! ## Font Embedding
//!
//! Both certificate weights are TrueType faces embedded as CIDFontType2
//! with Identity-H encoding, producing 5 PDF objects per weight: FontFile2,
//! FontDescriptor, CIDFont, ToUnicode CMap, and the root Type0 dictionary.
//! The full font file is embedded; content-stream text is written as
//! 4-digit hex glyph IDs, which is what lets the ornament rows use glyphs
//! WinAnsi could never express.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{FontFace, FontRole, FontSet};
use crate::geometry::{mm_to_pt, PAGE_HEIGHT, PAGE_WIDTH};
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};
use crate::layout::DrawOp;

const PRODUCER: &str = concat!("laurea ", env!("CARGO_PKG_VERSION"));

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Type0 object IDs in /F0 (regular), /F1 (bold) order.
    font_objects: Vec<(FontRole, usize)>,
    /// XObject IDs for images, indexed as /Im0, /Im1, ... in draw order.
    image_objects: Vec<usize>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize the draw plan to a complete PDF byte vector.
    pub fn write(&self, ops: &[DrawOp], fonts: &FontSet) -> Vec<u8> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
            image_objects: Vec::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, images, content stream, page, info
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });
        builder.objects.push(PdfObject { data: vec![] });

        self.register_fonts(&mut builder, ops, fonts);
        self.register_images(&mut builder, ops);

        let content = self.build_content_stream(ops, fonts);
        let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

        let content_obj_id = builder.objects.len();
        let mut content_data: Vec<u8> = Vec::new();
        let _ = write!(
            content_data,
            "<< /Length {} /Filter /FlateDecode >>\nstream\n",
            compressed.len()
        );
        content_data.extend_from_slice(&compressed);
        content_data.extend_from_slice(b"\nendstream");
        builder.objects.push(PdfObject { data: content_data });

        let page_obj_id = builder.objects.len();
        let font_resources = builder
            .font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ");
        let xobject_resources = builder
            .image_objects
            .iter()
            .enumerate()
            .map(|(i, obj_id)| format!("/Im{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ");
        let resources = if xobject_resources.is_empty() {
            format!("/Font << {} >>", font_resources)
        } else {
            format!(
                "/Font << {} >> /XObject << {} >>",
                font_resources, xobject_resources
            )
        };
        let page_dict = format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Contents {} 0 R /Resources << {} >> >>",
            mm_to_pt(PAGE_WIDTH),
            mm_to_pt(PAGE_HEIGHT),
            content_obj_id,
            resources
        );
        builder.objects.push(PdfObject {
            data: page_dict.into_bytes(),
        });

        // Catalog (object 1) and the one-page tree (object 2)
        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{} 0 R] /Count 1 >>",
            page_obj_id
        )
        .into_bytes();

        let info_obj_id = builder.objects.len();
        let info = format!(
            "<< /Title ({}) /Producer ({}) /Creator (laurea) >>",
            Self::escape_pdf_string(crate::layout::TITLE_TEXT),
            Self::escape_pdf_string(PRODUCER),
        );
        builder.objects.push(PdfObject {
            data: info.into_bytes(),
        });

        self.serialize(&builder, info_obj_id)
    }

    /// Build the PDF content stream for the page, one operator run per
    /// draw instruction, in plan order.
    fn build_content_stream(&self, ops: &[DrawOp], fonts: &FontSet) -> String {
        let mut stream = String::new();
        let page_h = mm_to_pt(PAGE_HEIGHT);
        let mut image_counter = 0usize;

        for op in ops {
            match op {
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    stroke,
                } => {
                    let _ = write!(
                        stream,
                        "q\n0 0 0 RG\n{:.2} w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ\n",
                        mm_to_pt(*stroke),
                        mm_to_pt(*x),
                        page_h - mm_to_pt(y + height),
                        mm_to_pt(*width),
                        mm_to_pt(*height),
                    );
                }

                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                } => {
                    let _ = write!(
                        stream,
                        "q\n0 0 0 RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        mm_to_pt(*stroke),
                        mm_to_pt(*x1),
                        page_h - mm_to_pt(*y1),
                        mm_to_pt(*x2),
                        page_h - mm_to_pt(*y2),
                    );
                }

                DrawOp::Image { x, y, width, height, .. } => {
                    let idx = image_counter;
                    image_counter += 1;
                    let _ = write!(
                        stream,
                        "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                        mm_to_pt(*width),
                        mm_to_pt(*height),
                        mm_to_pt(*x),
                        page_h - mm_to_pt(y + height),
                        idx,
                    );
                }

                DrawOp::Text {
                    x,
                    y,
                    content,
                    role,
                    size,
                } => {
                    if content.is_empty() {
                        continue;
                    }
                    let face = fonts.face(*role);
                    let font_name = match role {
                        FontRole::Regular => "F0",
                        FontRole::Bold => "F1",
                    };
                    let _ = write!(
                        stream,
                        "BT\n0 0 0 rg\n/{} {:.1} Tf\n{:.2} {:.2} Td\n<{}> Tj\nET\n",
                        font_name,
                        size,
                        mm_to_pt(*x),
                        page_h - mm_to_pt(*y),
                        Self::encode_glyph_hex(content, face),
                    );
                }
            }
        }

        stream
    }

    /// Encode text as a hex string of 4-digit glyph IDs (Identity-H).
    fn encode_glyph_hex(text: &str, face: &FontFace) -> String {
        let mut hex = String::with_capacity(text.chars().count() * 4);
        for ch in text.chars() {
            let _ = write!(hex, "{:04X}", face.glyph_id(ch));
        }
        hex
    }

    /// Register both weights. Each gets the full 5-object CIDFontType2
    /// embedding; /W and ToUnicode cover the characters the plan uses.
    fn register_fonts(&self, builder: &mut PdfBuilder, ops: &[DrawOp], fonts: &FontSet) {
        let mut used: HashMap<FontRole, BTreeSet<char>> = HashMap::new();
        for op in ops {
            if let DrawOp::Text { content, role, .. } = op {
                used.entry(*role).or_default().extend(content.chars());
            }
        }

        for role in [FontRole::Regular, FontRole::Bold] {
            let chars = used.remove(&role).unwrap_or_default();
            let type0_id = Self::write_font_objects(builder, fonts.face(role), &chars);
            builder.font_objects.push((role, type0_id));
        }
    }

    /// Write the 5 font PDF objects for one weight.
    /// Returns the object ID of the Type0 root font dictionary.
    fn write_font_objects(
        builder: &mut PdfBuilder,
        face: &FontFace,
        used_chars: &BTreeSet<char>,
    ) -> usize {
        let scale = 1000.0 / face.units_per_em as f64;
        let pdf_font_name = face.role.pdf_name();

        // 1. FontFile2 stream — the complete compressed TTF
        let compressed_ttf = compress_to_vec_zlib(&face.data, 6);
        let fontfile2_id = builder.objects.len();
        let mut fontfile2_data: Vec<u8> = Vec::new();
        let _ = write!(
            fontfile2_data,
            "<< /Length {} /Length1 {} /Filter /FlateDecode >>\nstream\n",
            compressed_ttf.len(),
            face.data.len()
        );
        fontfile2_data.extend_from_slice(&compressed_ttf);
        fontfile2_data.extend_from_slice(b"\nendstream");
        builder.objects.push(PdfObject {
            data: fontfile2_data,
        });

        // 2. FontDescriptor
        let font_descriptor_id = builder.objects.len();
        let (x_min, y_min, x_max, y_max) = face.bbox;
        let stem_v = match face.role {
            FontRole::Regular => 80,
            FontRole::Bold => 120,
        };
        let font_descriptor_dict = format!(
            "<< /Type /FontDescriptor /FontName /{} /Flags 4 \
             /FontBBox [{} {} {} {}] /ItalicAngle 0 \
             /Ascent {} /Descent {} /CapHeight {} /StemV {} \
             /FontFile2 {} 0 R >>",
            pdf_font_name,
            (x_min as f64 * scale) as i32,
            (y_min as f64 * scale) as i32,
            (x_max as f64 * scale) as i32,
            (y_max as f64 * scale) as i32,
            (face.ascender as f64 * scale) as i32,
            (face.descender as f64 * scale) as i32,
            (face.cap_height as f64 * scale) as i32,
            stem_v,
            fontfile2_id,
        );
        builder.objects.push(PdfObject {
            data: font_descriptor_dict.into_bytes(),
        });

        // 3. CIDFont dictionary (DescendantFont)
        let cidfont_id = builder.objects.len();
        let default_width = (face.advance_units(' ') as f64 * scale) as u32;
        let cidfont_dict = format!(
            "<< /Type /Font /Subtype /CIDFontType2 /BaseFont /{} \
             /CIDSystemInfo << /Registry (Adobe) /Ordering (Identity) /Supplement 0 >> \
             /FontDescriptor {} 0 R /DW {} /W {} \
             /CIDToGIDMap /Identity >>",
            pdf_font_name,
            font_descriptor_id,
            default_width,
            Self::build_w_array(face, used_chars),
        );
        builder.objects.push(PdfObject {
            data: cidfont_dict.into_bytes(),
        });

        // 4. ToUnicode CMap
        let tounicode_id = builder.objects.len();
        let cmap_content = Self::build_tounicode_cmap(face, used_chars, pdf_font_name);
        let compressed_cmap = compress_to_vec_zlib(cmap_content.as_bytes(), 6);
        let mut tounicode_data: Vec<u8> = Vec::new();
        let _ = write!(
            tounicode_data,
            "<< /Length {} /Filter /FlateDecode >>\nstream\n",
            compressed_cmap.len()
        );
        tounicode_data.extend_from_slice(&compressed_cmap);
        tounicode_data.extend_from_slice(b"\nendstream");
        builder.objects.push(PdfObject {
            data: tounicode_data,
        });

        // 5. Type0 font dictionary (the root, referenced by /Resources)
        let type0_id = builder.objects.len();
        let type0_dict = format!(
            "<< /Type /Font /Subtype /Type0 /BaseFont /{} \
             /Encoding /Identity-H \
             /DescendantFonts [{} 0 R] \
             /ToUnicode {} 0 R >>",
            pdf_font_name, cidfont_id, tounicode_id,
        );
        builder.objects.push(PdfObject {
            data: type0_dict.into_bytes(),
        });

        type0_id
    }

    /// Build the /W array for per-glyph widths in CIDFont.
    /// Format: [gid [width] gid [width] ...]
    fn build_w_array(face: &FontFace, used_chars: &BTreeSet<char>) -> String {
        let scale = 1000.0 / face.units_per_em as f64;

        let mut entries: Vec<(u16, u32)> = used_chars
            .iter()
            .map(|&ch| {
                let gid = face.glyph_id(ch);
                let width = (face.advance_units(ch) as f64 * scale) as u32;
                (gid, width)
            })
            .collect();
        entries.sort_by_key(|(gid, _)| *gid);
        entries.dedup_by_key(|(gid, _)| *gid);

        let mut result = String::from("[");
        for (gid, width) in &entries {
            let _ = write!(result, " {} [{}]", gid, width);
        }
        result.push_str(" ]");
        result
    }

    /// Build a ToUnicode CMap for text extraction/copy-paste support.
    fn build_tounicode_cmap(
        face: &FontFace,
        used_chars: &BTreeSet<char>,
        font_name: &str,
    ) -> String {
        let mut gid_to_unicode: Vec<(u16, u32)> = used_chars
            .iter()
            .map(|&ch| (face.glyph_id(ch), ch as u32))
            .collect();
        gid_to_unicode.sort_by_key(|(gid, _)| *gid);
        gid_to_unicode.dedup_by_key(|(gid, _)| *gid);

        let mut cmap = String::new();
        let _ = write!(cmap, "/CIDInit /ProcSet findresource begin\n");
        let _ = write!(cmap, "12 dict begin\n");
        let _ = write!(cmap, "begincmap\n");
        let _ = write!(cmap, "/CIDSystemInfo\n");
        let _ = write!(cmap, "<< /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        let _ = write!(cmap, "/CMapName /{}-UTF16 def\n", font_name);
        let _ = write!(cmap, "/CMapType 2 def\n");
        let _ = write!(cmap, "1 begincodespacerange\n");
        let _ = write!(cmap, "<0000> <FFFF>\n");
        let _ = write!(cmap, "endcodespacerange\n");

        // PDF spec limits beginbfchar to 100 entries per block
        for chunk in gid_to_unicode.chunks(100) {
            let _ = write!(cmap, "{} beginbfchar\n", chunk.len());
            for &(gid, unicode) in chunk {
                let _ = write!(cmap, "<{:04X}> <{:04X}>\n", gid, unicode);
            }
            let _ = write!(cmap, "endbfchar\n");
        }

        let _ = write!(cmap, "endcmap\n");
        let _ = write!(cmap, "CMapName currentdict /CMap defineresource pop\n");
        let _ = write!(cmap, "end\n");
        let _ = write!(cmap, "end\n");

        cmap
    }

    /// Create XObject PDF objects for each image instruction, in draw
    /// order, so content-stream /ImN references line up by index.
    fn register_images(&self, builder: &mut PdfBuilder, ops: &[DrawOp]) {
        for op in ops {
            if let DrawOp::Image { image, .. } = op {
                let xobj_id = Self::write_image_xobject(builder, image);
                builder.image_objects.push(xobj_id);
            }
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space_str = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };

                let obj_id = builder.objects.len();
                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace {} \
                     /BitsPerComponent 8 \
                     /Filter /DCTDecode \
                     /Length {} >>\nstream\n",
                    image.width_px, image.height_px, color_space_str, data.len()
                );
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                // Write SMask first if alpha channel exists
                let smask_id = alpha.as_ref().map(|alpha_data| {
                    let compressed_alpha = compress_to_vec_zlib(alpha_data, 6);
                    let smask_obj_id = builder.objects.len();
                    let mut smask_data: Vec<u8> = Vec::new();
                    let _ = write!(
                        smask_data,
                        "<< /Type /XObject /Subtype /Image \
                         /Width {} /Height {} \
                         /ColorSpace /DeviceGray \
                         /BitsPerComponent 8 \
                         /Filter /FlateDecode \
                         /Length {} >>\nstream\n",
                        image.width_px,
                        image.height_px,
                        compressed_alpha.len()
                    );
                    smask_data.extend_from_slice(&compressed_alpha);
                    smask_data.extend_from_slice(b"\nendstream");
                    builder.objects.push(PdfObject { data: smask_data });
                    smask_obj_id
                });

                let compressed_rgb = compress_to_vec_zlib(rgb, 6);
                let obj_id = builder.objects.len();
                let mut obj_data: Vec<u8> = Vec::new();

                let smask_ref = smask_id
                    .map(|id| format!(" /SMask {} 0 R", id))
                    .unwrap_or_default();

                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace /DeviceRGB \
                     /BitsPerComponent 8 \
                     /Filter /FlateDecode \
                     /Length {}{} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed_rgb.len(),
                    smask_ref
                );
                obj_data.extend_from_slice(&compressed_rgb);
                obj_data.extend_from_slice(b"\nendstream");
                builder.objects.push(PdfObject { data: obj_data });
                obj_id
            }
        }
    }

    /// Escape special characters in a PDF string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for i in 1..builder.objects.len() {
            let _ = write!(output, "{:010} 00000 n \n", offsets[i]);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
