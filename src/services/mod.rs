//! Business logic services.

pub mod github;
pub mod parser;
pub mod render;

pub use github::CommentClient;
pub use parser::{
    CollectPolicy, ReportSchema, is_valid_report, parse_report, parse_report_file,
    parse_specs_recursively,
};
pub use render::{RenderOptions, render_report_summary};
