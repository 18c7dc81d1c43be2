//! Demo shell: reads an order file, replays it through an invoice session and
//! writes the HTML and PDF documents.

pub mod order;
pub mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use tillbook_catalog::{CatalogAdapter, InMemoryCatalog};
use tillbook_render::{PdfOptions, ShopProfile, render_html, render_pdf};

pub use order::{OrderFile, OrderItem};
pub use settings::Settings;

/// Paths of the documents written by [`export_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub html: PathBuf,
    pub pdf: PathBuf,
}

pub fn load_profile(settings: &Settings) -> anyhow::Result<ShopProfile> {
    let Some(path) = &settings.profile else {
        return Ok(ShopProfile::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading shop profile {}", path.display()))?;
    ShopProfile::from_json(&json).with_context(|| format!("parsing shop profile {}", path.display()))
}

pub fn load_catalog(settings: &Settings) -> anyhow::Result<InMemoryCatalog> {
    let Some(path) = &settings.catalog else {
        return Ok(InMemoryCatalog::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading price list {}", path.display()))?;
    let (catalog, _report) = InMemoryCatalog::from_json(&json)
        .with_context(|| format!("parsing price list {}", path.display()))?;
    Ok(catalog)
}

pub fn load_pdf_options(settings: &Settings) -> anyhow::Result<PdfOptions> {
    let unicode_font = match &settings.font {
        Some(path) => Some(
            fs::read(path).with_context(|| format!("reading font {}", path.display()))?,
        ),
        None => None,
    };
    Ok(PdfOptions { unicode_font })
}

/// Replay the order at `order_path` and write `<invoice number>.html` and
/// `<invoice number>.pdf` into the output directory.
pub fn export_order(settings: &Settings, order_path: &Path) -> anyhow::Result<Exported> {
    let shop = load_profile(settings)?;
    let scanner = CatalogAdapter::new(load_catalog(settings)?);
    let options = load_pdf_options(settings)?;

    let json = fs::read_to_string(order_path)
        .with_context(|| format!("reading order {}", order_path.display()))?;
    let order = OrderFile::from_json(&json)
        .with_context(|| format!("parsing order {}", order_path.display()))?;

    let mut session = order.session();
    let invoice = order.replay(&mut session, &scanner)?;

    let html = render_html(&invoice, &shop)?;
    let pdf = render_pdf(&invoice, &shop, &options)?;

    fs::create_dir_all(&settings.out_dir)
        .with_context(|| format!("creating {}", settings.out_dir.display()))?;
    let exported = Exported {
        html: settings.out_dir.join(format!("{}.html", invoice.invoice_number)),
        pdf: settings.out_dir.join(format!("{}.pdf", invoice.invoice_number)),
    };
    fs::write(&exported.html, html)
        .with_context(|| format!("writing {}", exported.html.display()))?;
    fs::write(&exported.pdf, pdf).with_context(|| format!("writing {}", exported.pdf.display()))?;

    tracing::info!(
        invoice_number = %invoice.invoice_number,
        html = %exported.html.display(),
        pdf = %exported.pdf.display(),
        "invoice exported"
    );
    Ok(exported)
}
