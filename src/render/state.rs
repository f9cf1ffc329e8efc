//! Viewer navigation state machine
//!
//! Pure state: commands go in, effects come out, and the caller decides how
//! to execute them. Rendering happens only when an effect says so, which is
//! what keeps repeated no-op input (same page, same zoom) from touching the
//! rasterizer at all.

use super::zoom::ZoomMode;

/// Navigation state for one open document.
#[derive(Clone, Debug)]
pub struct ViewerState {
    /// Current page (0-indexed, always within `[0, page_count)`).
    pub current_page: usize,
    /// Total page count.
    pub page_count: usize,
    /// Requested zoom for the current page.
    pub zoom: ZoomMode,
    /// The (page, zoom) pair that was last actually rendered. `None` until
    /// the first render. Redraw decisions compare against this, not against
    /// whatever was last requested.
    rendered: Option<(usize, ZoomMode)>,
}

/// Input events, one variant per user action.
#[derive(Clone, Debug)]
pub enum Command {
    /// Advance one page, wrapping past the end.
    NextPage,
    /// Go back one page, wrapping past the start.
    PrevPage,
    /// Jump to the 1-based page number typed into the page field.
    GotoPage(String),
    /// Toggle a quadrant zoom; `Zoom(ZoomMode::Full)` always shows the
    /// full page.
    Zoom(ZoomMode),
    /// Extract the current page into `<name>.pdf`.
    Split { name: String },
}

/// Work produced by a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Rasterize and display this view.
    RenderView { page: usize, zoom: ZoomMode },
    /// Copy a page into a new single-page document.
    ExtractPage { page: usize, name: String },
    /// The page-number field changed without a redraw.
    SyncPageField,
}

impl ViewerState {
    #[must_use]
    pub fn new(page_count: usize) -> Self {
        Self {
            current_page: 0,
            page_count,
            zoom: ZoomMode::Full,
            rendered: None,
        }
    }

    /// Effect for the very first draw; records it as rendered.
    #[must_use]
    pub fn initial_render(&mut self) -> Effect {
        self.rendered = Some((self.current_page, self.zoom));
        Effect::RenderView {
            page: self.current_page,
            zoom: self.zoom,
        }
    }

    /// Apply one input command and return the effects it produced.
    #[must_use]
    pub fn apply(&mut self, cmd: Command) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut zoom_before = None;

        match cmd {
            Command::NextPage => {
                self.current_page = self.sanitize(self.current_page as i64 + 1);
            }
            Command::PrevPage => {
                self.current_page = self.sanitize(self.current_page as i64 - 1);
            }
            Command::GotoPage(text) => {
                self.current_page = self.sanitize(parse_page_field(&text));
                effects.push(Effect::SyncPageField);
            }
            Command::Zoom(quadrant) => {
                zoom_before = Some(self.zoom);
                self.zoom = self.zoom.toggled(quadrant);
            }
            Command::Split { name } => {
                effects.push(Effect::ExtractPage {
                    page: self.current_page,
                    name,
                });
                return effects;
            }
        }

        let mut force = false;

        // Changing page always shows the full page first, whatever zoom was
        // requested in the same cycle.
        if self.rendered.map(|(page, _)| page) != Some(self.current_page) {
            self.zoom = ZoomMode::Full;
            force = true;
        }

        if let Some(before) = zoom_before {
            // Toggling a quadrant off must show the un-zoomed page again.
            if before != ZoomMode::Full && self.zoom == ZoomMode::Full {
                force = true;
            }
            // A zoom that differs from the last rendered one needs a redraw.
            if self.rendered.map(|(_, zoom)| zoom) != Some(self.zoom) {
                force = true;
            }
        }

        if force {
            effects.push(Effect::RenderView {
                page: self.current_page,
                zoom: self.zoom,
            });
            self.rendered = Some((self.current_page, self.zoom));
        }

        effects
    }

    /// Keep the page index valid without erroring: wrap overflow to the
    /// first page, and add `page_count` while negative so even a large
    /// backwards jump lands on a real page.
    fn sanitize(&self, page: i64) -> usize {
        let count = self.page_count as i64;
        if count <= 0 {
            return 0;
        }

        let mut page = page;
        if page >= count {
            page = 0;
        }
        while page < 0 {
            page += count;
        }
        page as usize
    }
}

/// Parse the free-text page field (1-based). Anything that does not parse
/// as an integer >= 1 means page 1; this leniency is intentional.
fn parse_page_field(text: &str) -> i64 {
    match text.trim().parse::<i64>() {
        Ok(number) if number >= 1 => number - 1,
        _ => 0,
    }
}
