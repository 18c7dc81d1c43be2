//! Text preparation shared by both renderers.

use tillbook_billing::NumericEntry;
use tillbook_core::{format_amount, format_quantity};

use crate::config::Currency;

/// Glyph coverage of the output font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    /// Any character can be drawn.
    Unicode,
    /// Only Latin-1 can be drawn: the currency glyph becomes its code and any
    /// other character outside Latin-1 becomes `?`.
    Fallback,
}

/// Formats amounts and sanitizes text for one output mode.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    mode: TextMode,
    currency: &'a Currency,
}

impl<'a> TextStyle<'a> {
    pub fn new(mode: TextMode, currency: &'a Currency) -> Self {
        Self { mode, currency }
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    /// `"€3.42"`, or `"EUR 3.42"` in fallback mode.
    pub fn money(&self, amount: f64) -> String {
        self.text(&format!("{}{}", self.currency.symbol, format_amount(amount)))
    }

    /// Unit price column: the amount, or the operator's raw text if it did not parse.
    pub fn price_entry(&self, entry: &NumericEntry) -> String {
        match entry {
            NumericEntry::Parsed(v) => self.money(*v),
            NumericEntry::Unparsed(raw) => self.text(raw),
        }
    }

    /// Quantity column: compact number, or the operator's raw text.
    pub fn quantity_entry(&self, entry: &NumericEntry) -> String {
        match entry {
            NumericEntry::Parsed(v) => format_quantity(*v),
            NumericEntry::Unparsed(raw) => self.text(raw),
        }
    }

    /// Apply the mode's substitutions to arbitrary text.
    pub fn text(&self, text: &str) -> String {
        match self.mode {
            TextMode::Unicode => text.to_string(),
            TextMode::Fallback => to_latin1(&self.substitute_currency(text)),
        }
    }

    fn substitute_currency(&self, text: &str) -> String {
        let symbol = self.currency.symbol.as_str();
        if symbol.is_empty() || symbol == self.currency.code {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + 4);
        let mut parts = text.split(symbol).peekable();
        while let Some(part) = parts.next() {
            out.push_str(part);
            if let Some(next) = parts.peek() {
                out.push_str(&self.currency.code);
                if next.starts_with(|c: char| c.is_ascii_digit()) {
                    out.push(' ');
                }
            }
        }
        out
    }
}

fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if c.is_control() => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}
