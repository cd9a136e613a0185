//! HTML rendering of a procedure for the headless-browser PDF service
//!
//! The body carries the header, title, the five numbered sections and the
//! trailing notice. Approvals go into a separate footer template that the
//! renderer repeats on every page.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{Approvals, ProcessedSections};
use crate::config::DocumentBranding;

/// Print stylesheet embedded in every rendered document.
///
/// `.pdf-sublist li` outranks the generic `ol li` rule and comes after it,
/// so lettered sublists print letters instead of numbers.
pub const PRINT_STYLESHEET: &str = r#"
body { font-family: Arial, sans-serif; margin: 0; padding: 40px 40px 60px 40px; font-size: 12pt; line-height: 1.4; color: #333; }
.header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid black; padding-bottom: 5px; margin-bottom: 20px; }
.header-left { font-weight: bold; }
.header-left img { height: 30px; vertical-align: middle; }
.header-center { font-weight: bold; text-align: center; flex: 1; }
.header-right { text-align: right; font-size: 10pt; }
.title { text-align: center; font-size: 14pt; font-weight: bold; margin: 20px 0; line-height: 1.2; }
.section { margin-bottom: 20px; page-break-inside: auto; }
.section-title { font-weight: bold; margin-bottom: 8px; font-size: 12pt; page-break-after: avoid; }
.pdf-paragraph, p { margin: 8px 0; line-height: 1.5; text-align: justify; }
.pdf-ordered-list, ol { margin: 10px 0; padding-left: 25px; page-break-inside: auto; }
.pdf-ordered-list li, ol li { margin-bottom: 6px; line-height: 1.4; page-break-inside: avoid; list-style-type: decimal; }
.pdf-unordered-list, ul { margin: 10px 0; padding-left: 25px; page-break-inside: auto; }
.pdf-unordered-list li, ul li { margin-bottom: 6px; line-height: 1.4; page-break-inside: avoid; list-style-type: disc; }
.pdf-sublist { margin: 5px 0; padding-left: 20px; }
.pdf-sublist li { list-style-type: lower-alpha; margin-bottom: 4px; }
ol ol, ul ul, ol ul, ul ol { margin: 5px 0; padding-left: 20px; }
ol ol li, ul ol li { list-style-type: lower-alpha; }
ul ul li, ol ul li { list-style-type: circle; }
.pdf-heading-1, h1 { font-size: 16pt; font-weight: bold; margin: 15px 0 10px 0; color: #000; }
.pdf-heading-2, h2 { font-size: 14pt; font-weight: bold; margin: 12px 0 8px 0; color: #000; }
.pdf-heading-3, h3 { font-size: 13pt; font-weight: bold; margin: 10px 0 6px 0; color: #000; }
h1, h2, h3 { page-break-after: avoid; }
strong, b { font-weight: bold; }
em, i { font-style: italic; }
u { text-decoration: underline; }
.pdf-blockquote, blockquote { border-left: 4px solid #ddd; margin: 15px 0; padding: 10px 15px; background-color: #f9f9f9; font-style: italic; page-break-inside: avoid; }
.additional-text { margin: 15px 0; font-style: italic; font-size: 10pt; color: #666; }
p + ul, p + ol { margin-top: 5px; }
ul + p, ol + p { margin-top: 10px; }
div { margin: 0; padding: 0; }
* { box-sizing: border-box; }
"#;

const CELL_STYLE: &str = "border: 1px solid black; padding: 5px; text-align: center;";

/// `DD/MM/YYYY`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Full HTML document for the PDF body.
///
/// Section fragments are inserted as-is; they must already be the output
/// of the content pipeline. Branding strings are escaped.
#[must_use]
pub fn render_document_html(sections: &ProcessedSections, branding: &DocumentBranding) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<html>\n<head>\n<meta charset=\"utf-8\" />\n<style>");
    html.push_str(PRINT_STYLESHEET);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        concat!(
            "<div class=\"header\">\n",
            "<div class=\"header-left\"><img src=\"{logo}\" alt=\"logo\" /></div>\n",
            "<div class=\"header-center\">PROCEDIMIENTO</div>\n",
            "<div class=\"header-right\">{code}<br />",
            "Página <span class=\"pageNumber\"></span> de <span class=\"totalPages\"></span></div>\n",
            "</div>\n",
            "<div class=\"title\">{title}<br /></div>\n",
        ),
        logo = encode_double_quoted_attribute(&branding.logo_url),
        code = encode_text(&branding.document_code),
        title = encode_text(&branding.title),
    ));

    for (key, fragment) in sections.iter() {
        html.push_str(&format!(
            "<div class=\"section\">\n<div class=\"section-title\">{}</div>\n{fragment}\n</div>\n",
            key.heading()
        ));
    }

    html.push_str(&format!(
        "<div class=\"additional-text\">{}</div>\n</body>\n</html>\n",
        encode_text(&branding.notice)
    ));

    html
}

/// Footer repeated on every page: the approval table.
#[must_use]
pub fn render_footer_template(approvals: &Approvals, date: NaiveDate) -> String {
    let fecha = format_date(date);
    let signed = |name: &str| format!("{}<br />Fecha: {fecha}", encode_text(name));

    let headers = ["Preparado por:", "Revisado por:", "Aprobado por:", "Revisión N°:"];
    let cells = [
        signed(&approvals.preparado_por),
        signed(&approvals.revisado_por),
        signed(&approvals.aprobado_por),
        encode_text(&approvals.revision).into_owned(),
    ];

    let header_row: String = headers
        .iter()
        .map(|h| format!("<th style=\"{CELL_STYLE}\">{h}</th>"))
        .collect();
    let value_row: String = cells
        .iter()
        .map(|c| format!("<td style=\"{CELL_STYLE}\">{c}</td>"))
        .collect();

    format!(
        concat!(
            "<div style=\"font-size: 10pt; width: 100%; margin: 0 40px; padding-top: 5px;\">",
            "<table style=\"width: 100%; border-collapse: collapse;\">",
            "<tr>{header_row}</tr><tr>{value_row}</tr>",
            "</table></div>"
        ),
        header_row = header_row,
        value_row = value_row,
    )
}
