//! Document rendering for invoice snapshots.
//!
//! Both entry points are pure transformations of an [`Invoice`] plus static
//! shop configuration: no engine state is read or written, and no wall-clock
//! time is consulted, so rendering the same snapshot twice yields the same
//! output.
//!
//! [`Invoice`]: tillbook_billing::Invoice

pub mod config;
pub mod error;
pub mod html;
pub mod layout;
pub mod pdf;
pub mod text;

pub use config::{BankDetails, Currency, PdfOptions, ShopProfile};
pub use error::RenderError;
pub use html::render_html;
pub use layout::{DrawOp, PageLayout, PdfLayout, Weight, layout_pdf};
pub use pdf::render_pdf;
pub use text::{TextMode, TextStyle};
