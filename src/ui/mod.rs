pub mod clipboard;
pub mod markdown;
pub mod notice;
pub mod theme;

pub use notice::{Notice, NoticeLevel};
pub use theme::Theme;
