//! PDF export on top of [`layout_pdf`].
//!
//! Output is byte-stable for a given invoice: the trailer file identifier and
//! the timestamps are derived from the invoice instead of the clock or RNG.

use std::io::{BufWriter, Cursor};

use printpdf::{
    BuiltinFont, CustomPdfConformance, IndirectFontRef, Line, Mm, OffsetDateTime, PdfConformance,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point,
};

use tillbook_billing::Invoice;
use uuid::Uuid;

use crate::config::{PdfOptions, ShopProfile};
use crate::error::RenderError;
use crate::layout::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH, PageLayout, Weight, layout_pdf};
use crate::text::TextMode;

const LAYER: &str = "Layer 1";

/// Start of the trailer's file identifier array, `/ID[(<32>)(<32>)]`.
const TRAILER_ID: &[u8] = b"/ID[(";
const FILE_ID_LEN: usize = 32;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: Weight) -> &IndirectFontRef {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

/// Render the invoice as A4 PDF bytes.
///
/// A Unicode font from `options` is embedded when it loads; otherwise the
/// builtin Helvetica is used and text falls back to Latin-1.
pub fn render_pdf(
    invoice: &Invoice,
    shop: &ShopProfile,
    options: &PdfOptions,
) -> Result<Vec<u8>, RenderError> {
    let timestamp = invoice_timestamp(invoice)?;
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Invoice {}", invoice.invoice_number),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER,
    );
    let doc = doc
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_icc_profile: false,
            requires_xmp_metadata: false,
            ..Default::default()
        }))
        .with_creation_date(timestamp)
        .with_mod_date(timestamp)
        .with_metadata_date(timestamp);

    let (fonts, mode) = load_fonts(&doc, options)?;
    let layout = layout_pdf(invoice, shop, mode);

    for (index, page) in layout.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
            doc.get_page(page).get_layer(layer)
        };
        draw(&layer, page, &fonts);
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer).map_err(RenderError::pdf)?;
    let mut bytes = writer.into_inner().map_err(RenderError::pdf)?;
    pin_file_id(&mut bytes, &file_id(invoice))?;

    tracing::info!(
        invoice_number = %invoice.invoice_number,
        pages = layout.pages.len(),
        unicode = mode == TextMode::Unicode,
        bytes = bytes.len(),
        "pdf invoice rendered"
    );
    Ok(bytes)
}

fn load_fonts(
    doc: &PdfDocumentReference,
    options: &PdfOptions,
) -> Result<(Fonts, TextMode), RenderError> {
    if let Some(bytes) = &options.unicode_font {
        match doc.add_external_font(Cursor::new(bytes.as_slice())) {
            Ok(font) => {
                let fonts = Fonts {
                    regular: font.clone(),
                    bold: font,
                };
                return Ok((fonts, TextMode::Unicode));
            }
            Err(err) => {
                tracing::warn!(error = %err, "unicode font failed to load; using builtin Helvetica");
            }
        }
    }

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(RenderError::pdf)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(RenderError::pdf)?,
    };
    Ok((fonts, TextMode::Fallback))
}

fn draw(layer: &PdfLayerReference, page: &PageLayout, fonts: &Fonts) {
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                weight,
                text,
            } => layer.use_text(text.as_str(), *size, Mm(*x), Mm(*y), fonts.get(*weight)),
            DrawOp::Rule { x1, x2, y } => layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x1), Mm(*y)), false),
                    (Point::new(Mm(*x2), Mm(*y)), false),
                ],
                is_closed: false,
            }),
            DrawOp::Frame {
                x,
                y,
                width,
                height,
            } => layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x), Mm(*y)), false),
                    (Point::new(Mm(*x + *width), Mm(*y)), false),
                    (Point::new(Mm(*x + *width), Mm(*y + *height)), false),
                    (Point::new(Mm(*x), Mm(*y + *height)), false),
                ],
                is_closed: true,
            }),
        }
    }
}

/// 32 hex digits derived from the invoice number.
fn file_id(invoice: &Invoice) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, invoice.invoice_number.as_str().as_bytes())
        .simple()
        .to_string()
        .to_ascii_uppercase()
}

/// Overwrite both strings of the trailer `/ID` array in place.
///
/// The encoder fills them with random text of the same length, so no xref
/// offset moves.
fn pin_file_id(bytes: &mut [u8], id: &str) -> Result<(), RenderError> {
    let id = id.as_bytes();
    if id.len() != FILE_ID_LEN {
        return Err(RenderError::pdf(format!("file id must be {FILE_ID_LEN} bytes")));
    }
    let start = bytes
        .windows(TRAILER_ID.len())
        .rposition(|window| window == TRAILER_ID)
        .ok_or_else(|| RenderError::pdf("trailer has no file identifier"))?
        + TRAILER_ID.len();
    let first = start..start + FILE_ID_LEN;
    let second = first.end + 2..first.end + 2 + FILE_ID_LEN;

    if bytes.get(first.end..second.start) != Some(&b")("[..])
        || bytes.get(second.end) != Some(&b')')
    {
        return Err(RenderError::pdf("unexpected trailer file identifier layout"));
    }
    bytes[first].copy_from_slice(id);
    bytes[second].copy_from_slice(id);
    Ok(())
}

/// Midnight UTC of the invoice date.
fn invoice_timestamp(invoice: &Invoice) -> Result<OffsetDateTime, RenderError> {
    let secs = invoice
        .date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default();
    OffsetDateTime::from_unix_timestamp(secs).map_err(RenderError::pdf)
}
