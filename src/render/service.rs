//! Render service - spawns the worker and tracks requests
//!
//! One worker thread, unbounded FIFO channels. A single worker is load
//! bearing: it guarantees at most one rasterization in flight and responses
//! in the order requests were issued.

use std::path::{Path, PathBuf};

use flume::{Receiver, Sender};
use log::warn;
use mupdf::Document;

use super::request::{RenderRequest, RenderResponse, RequestId};
use super::worker::render_worker;
use super::zoom::ZoomMode;

/// The document could not be opened at startup. Fatal: the interaction
/// loop never starts.
#[derive(Debug, thiserror::Error)]
#[error("cannot open {}: {source}", path.display())]
pub struct DocumentOpenError {
    pub path: PathBuf,
    #[source]
    pub source: mupdf::error::Error,
}

/// Manages the render worker for one open document.
pub struct RenderService {
    request_tx: Sender<RenderRequest>,
    response_rx: Receiver<RenderResponse>,
    next_request_id: u64,
    page_count: usize,
    title: Option<String>,
}

impl RenderService {
    /// Open a document and spawn its render worker.
    ///
    /// The document is opened twice: once here for metadata, once by the
    /// worker thread, which owns its handle for the process lifetime.
    pub fn open(doc_path: PathBuf) -> Result<Self, DocumentOpenError> {
        let (page_count, title) = Self::load_document_info(&doc_path)?;

        let (request_tx, request_rx) = flume::unbounded();
        let (response_tx, response_rx) = flume::unbounded();

        std::thread::spawn(move || {
            render_worker(&doc_path, request_rx, response_tx);
        });

        Ok(Self {
            request_tx,
            response_rx,
            next_request_id: 1,
            page_count,
            title,
        })
    }

    fn load_document_info(path: &Path) -> Result<(usize, Option<String>), DocumentOpenError> {
        let open_err = |source| DocumentOpenError {
            path: path.to_path_buf(),
            source,
        };

        let doc = Document::open(path.to_string_lossy().as_ref()).map_err(open_err)?;
        let page_count = doc.page_count().map_err(open_err)? as usize;
        let title = doc
            .metadata(mupdf::MetadataName::Title)
            .ok()
            .filter(|t| !t.is_empty());

        Ok((page_count, title))
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Queue one view for rasterization.
    pub fn request_view(&mut self, page: usize, zoom: ZoomMode) -> RequestId {
        let id = self.next_id();
        let _ = self.request_tx.send(RenderRequest::View { id, page, zoom });
        id
    }

    /// Block until the response for `id` arrives. Responses come back in
    /// request order, so anything older is drained and logged. Returns
    /// `None` if the worker has shut down.
    pub fn wait_for(&self, id: RequestId) -> Option<RenderResponse> {
        while let Ok(response) = self.response_rx.recv() {
            let response_id = match &response {
                RenderResponse::Bitmap { id, .. } => *id,
                RenderResponse::Error { id, .. } => *id,
            };

            if response_id == id {
                return Some(response);
            }

            if let RenderResponse::Error { fault, .. } = &response {
                warn!("stale render fault: {fault}");
            }
        }

        None
    }

    /// Shutdown the worker.
    pub fn shutdown(&self) {
        let _ = self.request_tx.send(RenderRequest::Shutdown);
    }

    fn next_id(&mut self) -> RequestId {
        let id = RequestId::new(self.next_request_id);
        self.next_request_id += 1;
        id
    }
}

impl Drop for RenderService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
