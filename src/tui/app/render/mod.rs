mod header;
mod notice;
mod status;

pub use header::render_header;
pub use notice::render_notice;
pub use status::{StatusView, render_status};
