//! # Thermal Layout (80mm)
//!
//! The narrow roll-paper receipt: centered merchant header, sale metadata,
//! item lines against their totals, a bold TOTAL and the fiscal disclaimer
//! footer.

use crate::document::{Align, Cell, DocumentKind, ReceiptData, RenderedDocument, TextSize};

pub(crate) fn build(data: &ReceiptData) -> RenderedDocument {
    let mut doc = RenderedDocument::new(
        DocumentKind::Thermal,
        format!("Recibo-{}", data.sale_id),
    );

    // Header
    doc.text_bold(TextSize::Large, Align::Center, &data.merchant.name);
    doc.text(TextSize::Normal, Align::Center, &data.merchant.tagline);
    if let Some(nif) = &data.merchant.nif {
        doc.text(TextSize::Normal, Align::Center, format!("NIF: {}", nif));
    }
    doc.rule(true);

    // Sale metadata
    doc.text(
        TextSize::Normal,
        Align::Left,
        format!("Data: {}", data.date_label),
    );
    doc.text(
        TextSize::Normal,
        Align::Left,
        format!("Venda: #{}", data.sale_id_short),
    );
    doc.text(
        TextSize::Normal,
        Align::Left,
        format!("Pagamento: {}", data.payment_label),
    );
    doc.text(
        TextSize::Normal,
        Align::Left,
        format!("Vendedor: {}", data.seller_name),
    );
    if let Some(customer) = &data.customer_name {
        doc.text(
            TextSize::Normal,
            Align::Left,
            format!("Cliente: {}", customer),
        );
        if let Some(nif) = &data.customer_nif {
            doc.text(TextSize::Normal, Align::Left, format!("NIF: {}", nif));
        }
    }
    doc.rule(true);

    // Items
    for item in &data.items {
        doc.row(
            TextSize::Normal,
            vec![
                Cell::new(format!("{}x {}", item.quantity, item.name), 62, Align::Left),
                Cell::new(&item.line_total, 38, Align::Right),
            ],
        );
    }
    doc.rule(true);

    // Total
    doc.row(
        TextSize::Large,
        vec![
            Cell::new("TOTAL:", 40, Align::Left).bold(),
            Cell::new(&data.total, 60, Align::Right).bold(),
        ],
    );

    // Footer
    doc.blank();
    doc.text(TextSize::Normal, Align::Center, "Obrigado pela preferência!");
    doc.text(
        TextSize::Normal,
        Align::Center,
        "*** Documento sem valor fiscal ***",
    );

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocLine;
    use crate::test_fixtures::{sale_fixture, settings_fixture};

    fn rendered_text() -> String {
        let data = ReceiptData::prepare(&sale_fixture(), &settings_fixture());
        build(&data)
            .lines()
            .iter()
            .filter_map(|line| match line {
                DocLine::Row { cells, .. } => Some(
                    cells
                        .iter()
                        .map(|c| c.text.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_header_metadata_and_footer() {
        let text = rendered_text();

        assert!(text.contains("Banca Central"));
        assert!(text.contains("Venda: #f3a81c2d"));
        assert!(text.contains("Pagamento: Dinheiro"));
        assert!(text.contains("Vendedor: Maria Fernandes"));
        assert!(text.contains("Data: 04/05/2024 10:30:00"));
        assert!(text.contains("*** Documento sem valor fiscal ***"));
    }

    #[test]
    fn test_items_render_quantity_and_line_total() {
        let text = rendered_text();
        assert!(text.contains("2x Carregador USB-C"));
        assert!(text.contains("200,00 Kz"));
        assert!(text.contains("1x Cabo HDMI"));
    }

    #[test]
    fn test_customer_block_only_when_attached() {
        assert!(!rendered_text().contains("Cliente:"));

        let mut sale = sale_fixture();
        sale.customer_name = Some("João Baptista".to_string());
        sale.customer_nif = Some("5417623984".to_string());
        let data = ReceiptData::prepare(&sale, &settings_fixture());
        let doc = build(&data);
        let text: String = doc
            .lines()
            .iter()
            .filter_map(|line| match line {
                DocLine::Row { cells, .. } => Some(cells[0].text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        assert!(text.contains("Cliente: João Baptista"));
        assert!(text.contains("NIF: 5417623984"));
    }

    #[test]
    fn test_title_carries_sale_id() {
        let data = ReceiptData::prepare(&sale_fixture(), &settings_fixture());
        let doc = build(&data);
        assert_eq!(doc.title, format!("Recibo-{}", data.sale_id));
        assert_eq!(doc.kind, DocumentKind::Thermal);
    }
}
