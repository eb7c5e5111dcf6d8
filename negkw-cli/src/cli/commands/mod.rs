//! Subcommand arguments and handlers

pub mod preview;
pub mod submit;
pub mod template;

pub use preview::{PreviewArgs, handle_preview_command};
pub use submit::{SubmitArgs, handle_submit_command};
pub use template::{TemplateArgs, handle_template_command};
