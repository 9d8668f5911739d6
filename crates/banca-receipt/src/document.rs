//! # Document Model
//!
//! One line/cell model feeds every output target: the HTML print path and
//! the raster/PDF path consume the same [`RenderedDocument`], so the two can
//! never drift apart.
//!
//! ## Shared Preparation
//! Both layouts render from a single [`ReceiptData`] prepared once per sale:
//! merchant identity with documented defaults, currency-formatted amounts,
//! the payment-method label, formatted date and truncated sale id. Layouts
//! only ARRANGE these strings; they never re-derive them, which is what
//! guarantees the thermal receipt and the A4 invoice always agree on totals,
//! item counts and payment labels.

use banca_core::{CurrencyFormat, Sale, SettingsMap};

use crate::a4;
use crate::thermal;

// =============================================================================
// Document Kind
// =============================================================================

/// The two receipt layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Narrow 80mm roll-paper receipt, monospace-oriented.
    Thermal,
    /// Full-page formal invoice.
    A4,
}

impl DocumentKind {
    /// Physical width of the rendered document.
    pub const fn width_mm(&self) -> u32 {
        match self {
            DocumentKind::Thermal => 80,
            DocumentKind::A4 => 210,
        }
    }

    /// Prefix for exported PDF file names.
    pub const fn file_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Thermal => "recibo",
            DocumentKind::A4 => "fatura",
        }
    }

    /// Prefix for print-job titles.
    pub const fn title_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Thermal => "Recibo",
            DocumentKind::A4 => "Fatura",
        }
    }
}

// =============================================================================
// Line / Cell Model
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Normal,
    Large,
    Title,
}

/// One cell of a row. `width` is a percentage of the content width; the
/// widths of a row's cells must not exceed 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub width: u8,
    pub align: Align,
    pub bold: bool,
}

impl Cell {
    pub fn new(text: impl Into<String>, width: u8, align: Align) -> Self {
        Cell {
            text: text.into(),
            width,
            align,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One line of a rendered document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocLine {
    /// Vertical spacing of one normal line.
    Blank,
    /// Horizontal separator across the content width.
    Rule { dashed: bool },
    /// A row of cells sharing one text size.
    Row { cells: Vec<Cell>, size: TextSize },
}

/// A layout-resolved document, self-contained and deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    /// Print-job / window title, e.g. `Recibo-<sale id>`.
    pub title: String,
    lines: Vec<DocLine>,
}

impl RenderedDocument {
    pub(crate) fn new(kind: DocumentKind, title: impl Into<String>) -> Self {
        RenderedDocument {
            kind,
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// The empty result rendered for an absent sale.
    pub fn empty(kind: DocumentKind) -> Self {
        RenderedDocument::new(kind, kind.title_prefix())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[DocLine] {
        &self.lines
    }

    // Builder helpers for the layout modules.

    pub(crate) fn push(&mut self, line: DocLine) {
        self.lines.push(line);
    }

    pub(crate) fn blank(&mut self) {
        self.push(DocLine::Blank);
    }

    pub(crate) fn rule(&mut self, dashed: bool) {
        self.push(DocLine::Rule { dashed });
    }

    pub(crate) fn row(&mut self, size: TextSize, cells: Vec<Cell>) {
        self.push(DocLine::Row { cells, size });
    }

    /// Single full-width cell row.
    pub(crate) fn text(&mut self, size: TextSize, align: Align, text: impl Into<String>) {
        self.row(size, vec![Cell::new(text, 100, align)]);
    }

    /// Single full-width bold cell row.
    pub(crate) fn text_bold(&mut self, size: TextSize, align: Align, text: impl Into<String>) {
        self.row(size, vec![Cell::new(text, 100, align).bold()]);
    }
}

// =============================================================================
// Merchant Identity
// =============================================================================

/// Merchant header block resolved from the settings map.
///
/// Every key is optional; these are the documented defaults applied when a
/// key is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Merchant {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
    /// Merchant tax id; omitted from headers when the key is absent.
    pub nif: Option<String>,
}

impl Merchant {
    pub fn from_settings(settings: &SettingsMap) -> Self {
        let get = |key: &str, default: &str| {
            settings
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Merchant {
            name: get("company_name", "Banca Central"),
            tagline: get("hero_title", "Tecnologia & Serviços"),
            address: get("location_address", "Rua da Missão 42, Luanda"),
            phone: get("contact_phone", "(+244) 923 000 000"),
            nif: settings
                .get("company_nif")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }
}

// =============================================================================
// Shared Preparation
// =============================================================================

/// One precomputed item line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemLine {
    pub quantity: i64,
    pub name: String,
    pub unit_price: String,
    pub line_total: String,
}

/// Everything the layouts need, derived once from `(Sale, SettingsMap)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptData {
    pub merchant: Merchant,
    pub sale_id: String,
    /// First 8 characters of the sale id, for compact display.
    pub sale_id_short: String,
    /// `dd/mm/YYYY HH:MM:SS`, from the sale's own timestamp.
    pub date_label: String,
    pub payment_label: &'static str,
    pub seller_name: String,
    pub customer_name: Option<String>,
    pub customer_nif: Option<String>,
    pub items: Vec<ItemLine>,
    pub total: String,
}

impl ReceiptData {
    pub fn prepare(sale: &Sale, settings: &SettingsMap) -> Self {
        let currency = CurrencyFormat::default();

        ReceiptData {
            merchant: Merchant::from_settings(settings),
            sale_id: sale.id.clone(),
            sale_id_short: short_id(&sale.id),
            date_label: sale.date.format("%d/%m/%Y %H:%M:%S").to_string(),
            payment_label: sale
                .payment_method
                .unwrap_or(banca_core::PaymentMethod::Other)
                .label(),
            seller_name: sale.seller_name.clone().unwrap_or_default(),
            customer_name: sale.customer_name.clone(),
            customer_nif: sale.customer_nif.clone(),
            items: sale
                .items
                .iter()
                .map(|item| ItemLine {
                    quantity: item.quantity,
                    name: item.name.clone(),
                    unit_price: currency.format(item.unit_price),
                    line_total: currency.format(item.line_total()),
                })
                .collect(),
            total: currency.format(sale.total),
        }
    }
}

/// First 8 characters of an id (char-boundary safe).
pub(crate) fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

// =============================================================================
// Render Dispatch
// =============================================================================

/// Renders one layout of a sale.
///
/// An absent sale yields an empty document (never a panic), so callers can
/// wire this straight to an optional "last sale" slot.
pub fn render(kind: DocumentKind, sale: Option<&Sale>, settings: &SettingsMap) -> RenderedDocument {
    let Some(sale) = sale else {
        return RenderedDocument::empty(kind);
    };

    let data = ReceiptData::prepare(sale, settings);
    match kind {
        DocumentKind::Thermal => thermal::build(&data),
        DocumentKind::A4 => a4::build(&data),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{sale_fixture, settings_fixture};

    #[test]
    fn test_render_absent_sale_is_empty_for_both_kinds() {
        let settings = SettingsMap::new();
        assert!(render(DocumentKind::Thermal, None, &settings).is_empty());
        assert!(render(DocumentKind::A4, None, &settings).is_empty());
    }

    #[test]
    fn test_merchant_defaults_apply_per_missing_key() {
        let mut settings = SettingsMap::new();
        settings.insert("company_name".to_string(), "Loja do Kinaxixi".to_string());
        settings.insert("company_nif".to_string(), "5000123456".to_string());

        let merchant = Merchant::from_settings(&settings);
        assert_eq!(merchant.name, "Loja do Kinaxixi");
        // Absent keys fall back independently.
        assert_eq!(merchant.tagline, "Tecnologia & Serviços");
        assert_eq!(merchant.nif.as_deref(), Some("5000123456"));

        let bare = Merchant::from_settings(&SettingsMap::new());
        assert_eq!(bare.name, "Banca Central");
        assert!(bare.nif.is_none());
    }

    #[test]
    fn test_prepare_formats_shared_fields() {
        let data = ReceiptData::prepare(&sale_fixture(), &settings_fixture());

        assert_eq!(data.sale_id_short.chars().count(), 8);
        assert_eq!(data.date_label, "04/05/2024 10:30:00");
        assert_eq!(data.payment_label, "Dinheiro");
        assert_eq!(data.total, "250,00 Kz");
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.items[0].line_total, "200,00 Kz");
    }

    #[test]
    fn test_layouts_agree_on_total_items_and_payment_label() {
        let sale = sale_fixture();
        let settings = settings_fixture();
        let data = ReceiptData::prepare(&sale, &settings);

        for kind in [DocumentKind::Thermal, DocumentKind::A4] {
            let doc = render(kind, Some(&sale), &settings);
            let text: Vec<String> = doc
                .lines()
                .iter()
                .filter_map(|line| match line {
                    DocLine::Row { cells, .. } => Some(
                        cells
                            .iter()
                            .map(|c| c.text.clone())
                            .collect::<Vec<_>>()
                            .join(" "),
                    ),
                    _ => None,
                })
                .collect();
            let all = text.join("\n");

            assert!(all.contains(&data.total), "{:?} misses total", kind);
            assert!(
                all.contains(data.payment_label),
                "{:?} misses payment label",
                kind
            );
            for item in &data.items {
                assert!(all.contains(&item.name), "{:?} misses {}", kind, item.name);
            }
        }
    }

    #[test]
    fn test_short_id_handles_short_and_multibyte_ids() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("áéíóúàâãę9"), "áéíóúàâã");
    }
}
