//! Viewer session: one open document plus everything acting on it
//!
//! The session is an explicitly constructed object owned by the interaction
//! loop; there is no ambient global state. It turns navigation effects into
//! render requests and split calls, and reports outcomes as plain updates
//! for the presentation layer to draw.

use std::path::PathBuf;

use log::warn;

use crate::render::{
    Command, DocumentOpenError, Effect, RenderResponse, RenderService, ViewerState, ZoomMode,
};
use crate::split;

/// A viewer session for a single document.
pub struct Session {
    service: RenderService,
    state: ViewerState,
    source: PathBuf,
}

/// Outcome of handling one input command, for the presentation layer.
#[derive(Debug)]
pub enum SessionUpdate {
    /// A freshly rasterized view to display.
    Bitmap {
        page: usize,
        zoom: ZoomMode,
        png: Vec<u8>,
    },

    /// The page-number field changed without a redraw.
    PageField { page: usize },

    /// A split finished.
    SplitDone { destination: PathBuf },

    /// A render or split failed; whatever is on screen stays up.
    Failed { message: String },
}

impl Session {
    /// Open `source` and prepare its render service.
    pub fn open(source: PathBuf) -> Result<Self, DocumentOpenError> {
        let service = RenderService::open(source.clone())?;
        let state = ViewerState::new(service.page_count());

        Ok(Self {
            service,
            state,
            source,
        })
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.state.page_count
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomMode {
        self.state.zoom
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.service.title()
    }

    /// Render the first page. Call once before entering the input loop.
    pub fn initial_view(&mut self) -> Vec<SessionUpdate> {
        let effect = self.state.initial_render();
        self.execute(vec![effect])
    }

    /// Apply one input command and run every effect it produced, in order.
    pub fn handle(&mut self, cmd: Command) -> Vec<SessionUpdate> {
        let effects = self.state.apply(cmd);
        self.execute(effects)
    }

    fn execute(&mut self, effects: Vec<Effect>) -> Vec<SessionUpdate> {
        let mut updates = Vec::new();

        for effect in effects {
            match effect {
                Effect::RenderView { page, zoom } => {
                    let id = self.service.request_view(page, zoom);
                    match self.service.wait_for(id) {
                        Some(RenderResponse::Bitmap { page, zoom, png, .. }) => {
                            updates.push(SessionUpdate::Bitmap { page, zoom, png });
                        }
                        Some(RenderResponse::Error { fault, .. }) => {
                            warn!("render failed for page {page}: {fault}");
                            updates.push(SessionUpdate::Failed {
                                message: format!("cannot display page {}: {fault}", page + 1),
                            });
                        }
                        None => {
                            updates.push(SessionUpdate::Failed {
                                message: "render worker is gone".into(),
                            });
                        }
                    }
                }

                Effect::SyncPageField => {
                    updates.push(SessionUpdate::PageField {
                        page: self.state.current_page,
                    });
                }

                Effect::ExtractPage { page, name } => {
                    let destination = split::destination_for(&name);
                    match split::split_page(&self.source, page, &destination) {
                        Ok(path) => updates.push(SessionUpdate::SplitDone { destination: path }),
                        Err(e) => {
                            warn!("split of page {page} failed: {e}");
                            updates.push(SessionUpdate::Failed {
                                message: format!("split failed: {e}"),
                            });
                        }
                    }
                }
            }
        }

        updates
    }
}
