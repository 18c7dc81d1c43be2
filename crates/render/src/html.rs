//! Self-contained HTML preview.
//!
//! All text goes through the template engine's HTML escaping, so customer and
//! product fields cannot inject markup.

use askama::Template;

use tillbook_billing::{Customer, Invoice};

use crate::config::ShopProfile;
use crate::error::RenderError;
use crate::text::{TextMode, TextStyle};

struct RowView {
    product: String,
    quantity: String,
    unit_price: String,
    subtotal: String,
}

#[derive(Template)]
#[template(path = "invoice.html")]
struct InvoiceTemplate<'a> {
    title: String,
    shop: &'a ShopProfile,
    invoice_number: &'a str,
    date: String,
    customer: &'a Customer,
    order_type: String,
    rows: Vec<RowView>,
    subtotal: String,
    tax_label: String,
    tax_amount: String,
    total: String,
}

/// Render the invoice as one HTML document with inline styles.
pub fn render_html(invoice: &Invoice, shop: &ShopProfile) -> Result<String, RenderError> {
    let style = TextStyle::new(TextMode::Unicode, &shop.currency);

    let rows = invoice
        .lines
        .iter()
        .map(|line| RowView {
            product: line.name().to_string(),
            quantity: style.quantity_entry(line.quantity()),
            unit_price: style.price_entry(line.unit_price()),
            subtotal: style.money(line.subtotal()),
        })
        .collect();

    let template = InvoiceTemplate {
        title: format!("{} {}", shop.name, invoice.invoice_number),
        shop,
        invoice_number: invoice.invoice_number.as_str(),
        date: invoice.date.format("%Y-%m-%d").to_string(),
        customer: &invoice.customer,
        order_type: invoice.order_type.to_string(),
        rows,
        subtotal: style.money(invoice.subtotal),
        tax_label: invoice.tax_label(),
        tax_amount: style.money(invoice.tax_amount),
        total: style.money(invoice.total),
    };

    let html = template.render()?;
    tracing::info!(
        invoice_number = %invoice.invoice_number,
        rows = invoice.lines.len(),
        bytes = html.len(),
        "html invoice rendered"
    );
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tillbook_billing::{InvoiceSession, LineField, LineItem, OrderType};

    fn session() -> InvoiceSession {
        let mut session = InvoiceSession::new(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap());
        session.set_customer_name("Ada");
        session.set_phone("0301234");
        session.set_order_type(OrderType::Wholesale);
        session.add_line(LineItem::new("Apple", 2.0, 0.5, "4011", "Fruit"));
        session.add_line(LineItem::new("Bread", 1.0, 2.2, "17", "Bakery"));
        session
    }

    fn shop() -> ShopProfile {
        ShopProfile {
            name: "SR Markt".to_string(),
            address_lines: vec!["Main St 1".to_string(), "10115 Berlin".to_string()],
            ..ShopProfile::default()
        }
    }

    #[test]
    fn contains_header_customer_rows_and_summary() {
        let html = render_html(&session().snapshot(), &shop()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("SR Markt"));
        assert!(html.contains("10115 Berlin"));
        assert!(html.contains("SR-20250307-001"));
        assert!(html.contains("2025-03-07"));
        assert!(html.contains("Wholesale"));
        assert!(html.contains("<td>Apple</td><td class=\"num\">2</td><td class=\"num\">€0.50</td><td class=\"num\">€1.00</td>"));
        assert!(html.contains("Tax (7%)"));
        assert!(html.contains("€3.20"));
        assert!(html.contains("€0.22"));
        assert!(html.contains("€3.42"));
    }

    #[test]
    fn rows_follow_ledger_order() {
        let html = render_html(&session().snapshot(), &shop()).unwrap();
        let apple = html.find("Apple").unwrap();
        let bread = html.find("Bread").unwrap();
        assert!(apple < bread);
    }

    #[test]
    fn customer_markup_is_escaped() {
        let mut session = session();
        session.set_customer_name("<script>alert('x')</script>");
        session.set_address("Fish & Chips Lane");
        let html = render_html(&session.snapshot(), &shop()).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Fish &amp; Chips Lane"));
    }

    #[test]
    fn invalid_quantity_shows_raw_text_and_zero_subtotal() {
        let mut session = session();
        session.update_line(0, LineField::Quantity, "abc").unwrap();
        let html = render_html(&session.snapshot(), &shop()).unwrap();

        assert!(html.contains("<td>Apple</td><td class=\"num\">abc</td><td class=\"num\">€0.50</td><td class=\"num\">€0.00</td>"));
        assert!(html.contains("€2.20"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let invoice = session().snapshot();
        assert_eq!(
            render_html(&invoice, &shop()).unwrap(),
            render_html(&invoice, &shop()).unwrap()
        );
    }
}
