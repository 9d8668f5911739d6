//! # A4 Layout (210×297mm)
//!
//! The formal invoice: merchant identity block against the document title,
//! an explicit customer block (with the unidentified-customer notice), a
//! tabular item listing and a right-aligned totals block.

use crate::document::{Align, Cell, DocumentKind, ReceiptData, RenderedDocument, TextSize};

pub(crate) fn build(data: &ReceiptData) -> RenderedDocument {
    let mut doc = RenderedDocument::new(DocumentKind::A4, format!("Fatura-{}", data.sale_id));

    // Header: merchant block left, document identity right.
    doc.row(
        TextSize::Title,
        vec![
            Cell::new(&data.merchant.name, 60, Align::Left).bold(),
            Cell::new("Recibo de Venda", 40, Align::Right).bold(),
        ],
    );
    doc.row(
        TextSize::Normal,
        vec![
            Cell::new(&data.merchant.tagline, 60, Align::Left),
            Cell::new(format!("#{}", data.sale_id), 40, Align::Right),
        ],
    );
    doc.row(
        TextSize::Normal,
        vec![
            Cell::new(&data.merchant.address, 60, Align::Left),
            Cell::new(format!("Data: {}", data.date_label), 40, Align::Right),
        ],
    );
    doc.text(
        TextSize::Normal,
        Align::Left,
        format!("Tel: {}", data.merchant.phone),
    );
    doc.rule(false);
    doc.blank();

    // Customer block
    doc.text_bold(TextSize::Large, Align::Left, "Dados do Cliente");
    match &data.customer_name {
        Some(name) => {
            doc.text(TextSize::Normal, Align::Left, format!("Nome: {}", name));
            if let Some(nif) = &data.customer_nif {
                doc.text(TextSize::Normal, Align::Left, format!("NIF: {}", nif));
            }
        }
        None => doc.text(
            TextSize::Normal,
            Align::Left,
            "Cliente não identificado (Consumidor Final)",
        ),
    }
    doc.blank();

    // Item table
    doc.row(
        TextSize::Normal,
        vec![
            Cell::new("Item", 46, Align::Left).bold(),
            Cell::new("Qtd", 10, Align::Right).bold(),
            Cell::new("Preço Unit.", 22, Align::Right).bold(),
            Cell::new("Total", 22, Align::Right).bold(),
        ],
    );
    doc.rule(false);
    for item in &data.items {
        doc.row(
            TextSize::Normal,
            vec![
                Cell::new(&item.name, 46, Align::Left),
                Cell::new(item.quantity.to_string(), 10, Align::Right),
                Cell::new(&item.unit_price, 22, Align::Right),
                Cell::new(&item.line_total, 22, Align::Right),
            ],
        );
    }
    doc.rule(false);
    doc.blank();

    // Totals block, right-aligned. No tax line: totals equal the item sum,
    // and the document explicitly carries no fiscal value.
    doc.row(
        TextSize::Normal,
        vec![
            Cell::new("", 55, Align::Left),
            Cell::new("Subtotal:", 20, Align::Left),
            Cell::new(&data.total, 25, Align::Right),
        ],
    );
    doc.row(
        TextSize::Large,
        vec![
            Cell::new("", 55, Align::Left),
            Cell::new("TOTAL:", 20, Align::Left).bold(),
            Cell::new(&data.total, 25, Align::Right).bold(),
        ],
    );
    doc.row(
        TextSize::Normal,
        vec![
            Cell::new("", 50, Align::Left),
            Cell::new("Método de Pagamento:", 30, Align::Left),
            Cell::new(data.payment_label, 20, Align::Right),
        ],
    );
    doc.row(
        TextSize::Normal,
        vec![
            Cell::new("", 50, Align::Left),
            Cell::new("Vendedor:", 30, Align::Left),
            Cell::new(&data.seller_name, 20, Align::Right),
        ],
    );

    // Footer
    doc.blank();
    doc.rule(false);
    doc.text(TextSize::Normal, Align::Center, "Obrigado pela preferência!");

    doc
}
