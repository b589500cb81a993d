//! Generation infrastructure implementations

pub mod formatter;
pub mod template_renderer;

pub use formatter::{CompositeFormatter, GofmtFormatter, NormalizingFormatter};
pub use template_renderer::TeraTemplateRenderer;
