//! File outputs: the upload template and the failure list

pub mod failures;
pub mod template;

pub use failures::{export_failures_csv, write_failures_csv};
pub use template::{TEMPLATE_FILE_NAME, TEMPLATE_SHEET, write_template};
