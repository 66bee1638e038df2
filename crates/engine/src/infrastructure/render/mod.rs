//! Rendering - view-model trees to self-contained HTML documents.

mod css;
mod html;
mod templates;

pub use css::{page_css, SHEET_CSS};
pub use html::wrap_document;
pub use templates::{RenderError, Template, TemplateId, TemplateRegistry};

pub use crate::use_cases::view_model::ViewModel;
