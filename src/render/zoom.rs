//! Quadrant zoom modes and clip geometry
//!
//! A quadrant view rasterizes one quarter of the page, clipped at render
//! time and magnified so it fills roughly the same pixel dimensions as a
//! full-page render.

use mupdf::Rect;

/// Magnification applied to quadrant views, in both axes.
pub const QUADRANT_MAGNIFICATION: f32 = 2.0;

/// Which view of a page to rasterize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomMode {
    /// The whole page at base scale.
    #[default]
    Full,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ZoomMode {
    /// Quadrant-button toggle: selecting the already-active quadrant
    /// returns to the full page, anything else switches to that quadrant.
    #[must_use]
    pub fn toggled(self, quadrant: ZoomMode) -> ZoomMode {
        if self == quadrant {
            ZoomMode::Full
        } else {
            quadrant
        }
    }

    /// Scale factor used when rasterizing this view.
    #[must_use]
    pub fn scale(self) -> f32 {
        match self {
            ZoomMode::Full => 1.0,
            _ => QUADRANT_MAGNIFICATION,
        }
    }

    /// Clip rectangle in page coordinates, or `None` for the full page.
    ///
    /// A quadrant is the axis-aligned box between the matching page corner
    /// and the page-rectangle center.
    #[must_use]
    pub fn clip(self, bounds: Rect) -> Option<Rect> {
        let cx = (bounds.x0 + bounds.x1) * 0.5;
        let cy = (bounds.y0 + bounds.y1) * 0.5;

        match self {
            ZoomMode::Full => None,
            ZoomMode::TopLeft => Some(Rect::new(bounds.x0, bounds.y0, cx, cy)),
            ZoomMode::TopRight => Some(Rect::new(cx, bounds.y0, bounds.x1, cy)),
            ZoomMode::BottomLeft => Some(Rect::new(bounds.x0, cy, cx, bounds.y1)),
            ZoomMode::BottomRight => Some(Rect::new(cx, cy, bounds.x1, bounds.y1)),
        }
    }

    /// Short label for the status line.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            ZoomMode::Full => None,
            ZoomMode::TopLeft => Some("top-left"),
            ZoomMode::TopRight => Some("top-right"),
            ZoomMode::BottomLeft => Some("bottom-left"),
            ZoomMode::BottomRight => Some("bottom-right"),
        }
    }
}
