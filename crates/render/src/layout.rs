//! Page layout of the PDF invoice, independent of the PDF encoder.
//!
//! Coordinates are millimetres on an A4 page with the origin at the bottom-left
//! corner, matching the encoder.

use tillbook_billing::Invoice;

use crate::config::ShopProfile;
use crate::text::{TextMode, TextStyle};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

const LEFT: f32 = 15.0;
const RIGHT: f32 = 195.0;
const META_X: f32 = 140.0;

const COL_QTY: f32 = 110.0;
const COL_PRICE: f32 = 135.0;
const COL_SUBTOTAL: f32 = 165.0;

const HEADER_RULE_Y: f32 = 258.0;
const FIRST_TABLE_TOP: f32 = 222.0;
const NEXT_TABLE_TOP: f32 = 250.0;
const FOOTER_RULE_Y: f32 = 32.0;
const BODY_BOTTOM: f32 = 38.0;

const ROW_HEIGHT: f32 = 7.0;
const SUMMARY_HEIGHT: f32 = 4.0 + 3.0 * ROW_HEIGHT;
const MAX_NAME_CHARS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: Weight,
        text: String,
    },
    /// Horizontal rule from `x1` to `x2`.
    Rule { x1: f32, x2: f32, y: f32 },
    /// Rectangle outline; `(x, y)` is the bottom-left corner.
    Frame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    fn text(&mut self, x: f32, y: f32, size: f32, weight: Weight, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            size,
            weight,
            text: text.into(),
        });
    }

    fn rule(&mut self, y: f32) {
        self.ops.push(DrawOp::Rule { x1: LEFT, x2: RIGHT, y });
    }

    /// Text runs of this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub title: String,
    pub mode: TextMode,
    pub pages: Vec<PageLayout>,
}

impl PdfLayout {
    /// All text runs of the document in page order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(PageLayout::texts)
    }
}

/// Lay out the invoice on as many A4 pages as the rows need.
///
/// Every page carries the header band and the payment footer; the customer
/// block sits on the first page and the summary after the last row.
pub fn layout_pdf(invoice: &Invoice, shop: &ShopProfile, mode: TextMode) -> PdfLayout {
    let style = TextStyle::new(mode, &shop.currency);

    let mut bodies = Vec::new();
    let mut page = PageLayout::default();
    let mut y = customer_block(&mut page, invoice, &style);
    y = table_header(&mut page, y);

    for line in &invoice.lines {
        if y < BODY_BOTTOM {
            bodies.push(std::mem::take(&mut page));
            y = table_header(&mut page, NEXT_TABLE_TOP);
        }
        page.text(LEFT, y, 10.0, Weight::Regular, style.text(&truncate(line.name())));
        page.text(COL_QTY, y, 10.0, Weight::Regular, style.quantity_entry(line.quantity()));
        page.text(COL_PRICE, y, 10.0, Weight::Regular, style.price_entry(line.unit_price()));
        page.text(COL_SUBTOTAL, y, 10.0, Weight::Regular, style.money(line.subtotal()));
        y -= ROW_HEIGHT;
    }

    if y + ROW_HEIGHT - SUMMARY_HEIGHT < BODY_BOTTOM {
        bodies.push(std::mem::take(&mut page));
        y = NEXT_TABLE_TOP;
    }
    summary(&mut page, y, invoice, &style);
    bodies.push(page);

    let count = bodies.len();
    let pages = bodies
        .into_iter()
        .enumerate()
        .map(|(index, body)| {
            let mut page = PageLayout::default();
            header_band(&mut page, invoice, shop, &style, index + 1, count);
            page.ops.extend(body.ops);
            footer(&mut page, shop, &style);
            page
        })
        .collect();

    PdfLayout {
        title: style.text(&format!("Invoice {}", invoice.invoice_number)),
        mode,
        pages,
    }
}

fn header_band(
    page: &mut PageLayout,
    invoice: &Invoice,
    shop: &ShopProfile,
    style: &TextStyle<'_>,
    number: usize,
    count: usize,
) {
    // Logo placeholder; the asset itself is placed by whoever prints the page.
    page.ops.push(DrawOp::Frame {
        x: LEFT,
        y: 262.0,
        width: 30.0,
        height: 25.0,
    });
    page.text(LEFT + 8.0, 273.0, 8.0, Weight::Regular, "LOGO");

    let x = LEFT + 35.0;
    let mut y = 282.0;
    page.text(x, y, 16.0, Weight::Bold, style.text(&shop.name));
    y -= 6.0;
    for line in &shop.address_lines {
        page.text(x, y, 9.0, Weight::Regular, style.text(line));
        y -= 4.5;
    }
    if !shop.phone.is_empty() {
        page.text(x, y, 9.0, Weight::Regular, style.text(&format!("Tel: {}", shop.phone)));
        y -= 4.5;
    }
    if !shop.tax_id.is_empty() {
        page.text(x, y, 9.0, Weight::Regular, style.text(&format!("Tax ID: {}", shop.tax_id)));
        y -= 4.5;
    }
    if !shop.vat_id.is_empty() {
        page.text(x, y, 9.0, Weight::Regular, style.text(&format!("VAT ID: {}", shop.vat_id)));
    }

    page.text(META_X, 282.0, 18.0, Weight::Bold, "INVOICE");
    page.text(
        META_X,
        275.0,
        10.0,
        Weight::Regular,
        style.text(&format!("No: {}", invoice.invoice_number)),
    );
    page.text(
        META_X,
        270.0,
        10.0,
        Weight::Regular,
        format!("Date: {}", invoice.date.format("%d.%m.%Y")),
    );
    page.text(META_X, 265.0, 10.0, Weight::Regular, format!("Page {number} of {count}"));

    page.rule(HEADER_RULE_Y);
}

fn customer_block(page: &mut PageLayout, invoice: &Invoice, style: &TextStyle<'_>) -> f32 {
    let customer = &invoice.customer;
    let mut y = 250.0;
    page.text(LEFT, y, 11.0, Weight::Bold, "Bill to:");
    y -= 5.5;
    for (label, value) in [
        ("Name", customer.name.as_str()),
        ("Phone", customer.phone.as_str()),
        ("Address", customer.address.as_str()),
    ] {
        page.text(LEFT, y, 10.0, Weight::Regular, style.text(&format!("{label}: {value}")));
        y -= 4.5;
    }
    page.text(LEFT, y, 10.0, Weight::Regular, format!("Order type: {}", invoice.order_type));
    FIRST_TABLE_TOP
}

fn table_header(page: &mut PageLayout, y: f32) -> f32 {
    page.text(LEFT, y, 10.0, Weight::Bold, "Product");
    page.text(COL_QTY, y, 10.0, Weight::Bold, "Qty");
    page.text(COL_PRICE, y, 10.0, Weight::Bold, "Unit Price");
    page.text(COL_SUBTOTAL, y, 10.0, Weight::Bold, "Subtotal");
    page.rule(y - 2.5);
    y - 2.5 - ROW_HEIGHT
}

fn summary(page: &mut PageLayout, y: f32, invoice: &Invoice, style: &TextStyle<'_>) {
    page.rule(y + ROW_HEIGHT - 2.5);
    let mut y = y - 1.5;
    let rows = [
        ("Subtotal".to_string(), invoice.subtotal, Weight::Regular),
        (format!("Tax ({})", invoice.tax_label()), invoice.tax_amount, Weight::Regular),
        ("Total".to_string(), invoice.total, Weight::Bold),
    ];
    for (label, amount, weight) in rows {
        page.text(COL_PRICE, y, 10.5, weight, label);
        page.text(COL_SUBTOTAL, y, 10.5, weight, style.money(amount));
        y -= ROW_HEIGHT;
    }
}

fn footer(page: &mut PageLayout, shop: &ShopProfile, style: &TextStyle<'_>) {
    let bank = &shop.bank;
    page.rule(FOOTER_RULE_Y);
    page.text(LEFT, 26.0, 9.0, Weight::Bold, "Payment information");
    page.text(
        LEFT,
        21.5,
        8.5,
        Weight::Regular,
        style.text(&format!("Account holder: {}   Bank: {}", bank.account_holder, bank.bank_name)),
    );
    page.text(
        LEFT,
        17.0,
        8.5,
        Weight::Regular,
        style.text(&format!("IBAN: {}   BIC: {}", bank.iban, bank.bic)),
    );
    page.text(
        LEFT,
        12.5,
        8.0,
        Weight::Regular,
        style.text(&format!("Please quote the invoice number with your payment. Amounts in {}.", shop.currency.code)),
    );
}

fn truncate(name: &str) -> String {
    if name.chars().count() <= MAX_NAME_CHARS {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_NAME_CHARS - 3).collect();
    short.push_str("...");
    short
}
