pub mod event_source;
pub mod panic_handler;
pub mod render;
pub mod session;
pub mod split;
pub mod ui;

pub use render::{Command, ViewerState, ZoomMode};
pub use session::{Session, SessionUpdate};
