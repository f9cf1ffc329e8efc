//! Render requests, responses, and faults

use super::zoom::ZoomMode;

/// Unique identifier for render requests
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Request sent to the render worker
#[derive(Debug)]
pub enum RenderRequest {
    /// Rasterize one view of a page
    View {
        id: RequestId,
        page: usize,
        zoom: ZoomMode,
    },

    /// Shutdown the worker
    Shutdown,
}

/// Errors from the render worker
#[derive(Debug, thiserror::Error)]
pub enum RenderFault {
    /// Out-of-range page index. The navigation layer sanitizes every index,
    /// so hitting this is a bug in the caller, not user error.
    #[error("page index {page} out of range, document has {page_count} pages")]
    InvalidPageIndex { page: usize, page_count: usize },

    #[error("PDF engine: {0}")]
    Pdf(#[from] mupdf::error::Error),

    #[error("bitmap encoding: {0}")]
    Encode(#[from] image::ImageError),

    #[error("{detail}")]
    Generic { detail: String },
}

impl RenderFault {
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic { detail: msg.into() }
    }
}

/// Response from the render worker
#[derive(Debug)]
pub enum RenderResponse {
    /// PNG-encoded bitmap for one view of a page
    Bitmap {
        id: RequestId,
        page: usize,
        zoom: ZoomMode,
        png: Vec<u8>,
    },

    /// Rendering failed; the previously shown bitmap stays up
    Error { id: RequestId, fault: RenderFault },
}
