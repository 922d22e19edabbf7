//! End-of-run report: a boxed text table or a JSON document.

mod render;
mod types;


pub use render::render_json;
pub use types::LoadTestReport;
