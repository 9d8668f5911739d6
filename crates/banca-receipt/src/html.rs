//! # HTML Print Path
//!
//! Serializes a [`RenderedDocument`] into a fully self-contained HTML
//! document (inline minimal styling only, so nothing from any host
//! application can leak in) and hands it to the platform print facility
//! through the [`PrintTarget`] port.

use tracing::debug;

use banca_core::{Sale, SettingsMap};

use crate::document::{render, Align, Cell, DocLine, DocumentKind, RenderedDocument, TextSize};
use crate::error::ExportResult;

/// A print job scoped to one rendered document.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob {
    pub title: String,
    pub html: String,
}

/// Platform print facility. Implementations are environment-specific and
/// out of this crate's scope; tests substitute fakes.
pub trait PrintTarget {
    fn print(&self, job: &PrintJob) -> ExportResult<()>;
}

/// Renders a layout and sends it to the print facility.
///
/// An absent sale renders an empty document and the job is skipped: a
/// deliberate no-op, matching the disabled print actions before a sale is
/// finalized.
pub fn print_document<T: PrintTarget>(
    kind: DocumentKind,
    sale: Option<&Sale>,
    settings: &SettingsMap,
    target: &T,
) -> ExportResult<()> {
    let doc = render(kind, sale, settings);
    if doc.is_empty() {
        debug!(kind = ?kind, "nothing to print");
        return Ok(());
    }

    let job = PrintJob {
        title: doc.title.clone(),
        html: to_html(&doc),
    };
    debug!(title = %job.title, bytes = job.html.len(), "dispatching print job");
    target.print(&job)
}

/// Serializes a document into standalone HTML.
pub fn to_html(doc: &RenderedDocument) -> String {
    let font = match doc.kind {
        DocumentKind::Thermal => "'Courier New', monospace",
        DocumentKind::A4 => "Arial, sans-serif",
    };

    let mut body = String::new();
    for line in doc.lines() {
        match line {
            DocLine::Blank => body.push_str("<div class=\"blank\"></div>"),
            DocLine::Rule { dashed } => {
                if *dashed {
                    body.push_str("<div class=\"rule dashed\"></div>");
                } else {
                    body.push_str("<div class=\"rule\"></div>");
                }
            }
            DocLine::Row { cells, size } => {
                let size_class = match size {
                    TextSize::Normal => "",
                    TextSize::Large => " lg",
                    TextSize::Title => " xl",
                };
                body.push_str(&format!("<div class=\"row{}\">", size_class));
                for cell in cells {
                    body.push_str(&cell_html(cell));
                }
                body.push_str("</div>");
            }
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="pt">
<head>
<meta charset="UTF-8"/>
<title>{title}</title>
<style>
body {{ margin: 0; padding: 0; background: #ffffff; color: #000000; }}
.doc {{ width: {width}mm; margin: 0 auto; padding: 4mm; box-sizing: border-box; font-family: {font}; font-size: 12px; }}
.row {{ display: flex; }}
.row span {{ display: inline-block; }}
.lg {{ font-size: 14px; }}
.xl {{ font-size: 18px; }}
.b {{ font-weight: bold; }}
.rule {{ border-top: 1px solid #000000; margin: 4px 0; }}
.rule.dashed {{ border-top-style: dashed; }}
.blank {{ height: 12px; }}
</style>
</head>
<body><div class="doc">{body}</div></body>
</html>"#,
        title = esc(&doc.title),
        width = doc.kind.width_mm(),
        font = font,
        body = body,
    )
}

fn cell_html(cell: &Cell) -> String {
    let align = match cell.align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    };
    format!(
        "<span{} style=\"width:{}%;text-align:{}\">{}</span>",
        if cell.bold { " class=\"b\"" } else { "" },
        cell.width,
        align,
        esc(&cell.text)
    )
}

fn esc(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::error::ExportError;
    use crate::test_fixtures::{sale_fixture, settings_fixture};

    struct RecordingTarget {
        jobs: RefCell<Vec<PrintJob>>,
    }

    impl RecordingTarget {
        fn new() -> Self {
            RecordingTarget {
                jobs: RefCell::new(Vec::new()),
            }
        }
    }

    impl PrintTarget for RecordingTarget {
        fn print(&self, job: &PrintJob) -> ExportResult<()> {
            self.jobs.borrow_mut().push(job.clone());
            Ok(())
        }
    }

    struct RefusingTarget;

    impl PrintTarget for RefusingTarget {
        fn print(&self, _job: &PrintJob) -> ExportResult<()> {
            Err(ExportError::Print("spooler offline".to_string()))
        }
    }

    #[test]
    fn test_print_dispatches_scoped_job() {
        let target = RecordingTarget::new();
        let sale = sale_fixture();

        print_document(DocumentKind::Thermal, Some(&sale), &settings_fixture(), &target).unwrap();

        let jobs = target.jobs.borrow();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, format!("Recibo-{}", sale.id));
        assert!(jobs[0].html.contains("width: 80mm"));
        assert!(jobs[0].html.contains("Obrigado pela preferência!"));
    }

    #[test]
    fn test_print_without_sale_is_noop() {
        let target = RecordingTarget::new();
        print_document(DocumentKind::A4, None, &settings_fixture(), &target).unwrap();
        assert!(target.jobs.borrow().is_empty());
    }

    #[test]
    fn test_print_failure_propagates() {
        let sale = sale_fixture();
        let err = print_document(
            DocumentKind::A4,
            Some(&sale),
            &settings_fixture(),
            &RefusingTarget,
        )
        .unwrap_err();
        assert!(matches!(err, ExportError::Print(_)));
    }

    #[test]
    fn test_html_is_self_contained_and_escaped() {
        let mut sale = sale_fixture();
        sale.items[0].name = "Cabo <HDMI> & adaptador".to_string();
        let html = to_html(&render(
            DocumentKind::A4,
            Some(&sale),
            &settings_fixture(),
        ));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("width: 210mm"));
        assert!(html.contains("Cabo &lt;HDMI&gt; &amp; adaptador"));
        // No external references of any kind.
        assert!(!html.contains("href="));
        assert!(!html.contains("src="));
    }
}
