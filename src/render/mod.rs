//! PDF rendering: display-list cache, quadrant zoom, navigation state,
//! and the worker/service pair that rasterizes views.

mod cache;
mod request;
mod service;
mod state;
mod worker;
mod zoom;

pub use cache::DisplayListCache;
pub use request::{RenderFault, RenderRequest, RenderResponse, RequestId};
pub use service::{DocumentOpenError, RenderService};
pub use state::{Command, Effect, ViewerState};
pub use zoom::{QUADRANT_MAGNIFICATION, ZoomMode};

/// Display lists kept resident before the LRU starts evicting.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
