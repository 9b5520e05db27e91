mod block;
mod context;
mod error;
mod highlight;
mod inline;
mod widget;
mod wrap;

pub use error::MarkdownError;
pub use widget::MarkdownWidget;
