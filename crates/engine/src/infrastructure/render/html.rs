//! Final document assembly.

use chrono::Utc;
use sheetpress_shared::PaperSize;

use super::css::{page_css, SHEET_CSS};
use crate::use_cases::view_model::format::escape_html;

/// Wrap a rendered body in a self-contained HTML document: doctype, head
/// with injected CSS, body, and a generation footer.
pub fn wrap_document(title: &str, body: &str, paper: PaperSize) -> String {
    let generated = Utc::now().format("%Y-%m-%d %H:%M UTC");
    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{page}{css}</style>\n</head>\n<body>\n{body}\n\
         <footer>Generated {generated}</footer>\n</body>\n</html>\n",
        title = escape_html(title),
        page = page_css(paper),
        css = SHEET_CSS,
        body = body,
        generated = generated,
    )
}
