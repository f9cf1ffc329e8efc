//! Single-page extraction
//!
//! Splitting never touches the render engine's document handle: the source
//! file is reopened independently with lopdf, reduced to the one requested
//! page, and serialized through a temp file so a failed save leaves no
//! partial output behind.

use std::path::{Path, PathBuf};

use log::info;
use lopdf::Document;
use tempfile::NamedTempFile;

/// Errors from a split operation. None of them terminate the session.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("page index {page} out of range, document has {page_count} pages")]
    InvalidPage { page: usize, page_count: usize },

    #[error("cannot read source document: {0}")]
    Extraction(#[from] lopdf::Error),

    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Copy the page at `page_index` (0-based) of `source` into a new
/// single-page PDF at `destination`.
///
/// An existing file at `destination` is replaced without confirmation;
/// silent overwrite is the documented behavior of the split button.
pub fn split_page(
    source: &Path,
    page_index: usize,
    destination: &Path,
) -> Result<PathBuf, SplitError> {
    let mut doc = Document::load(source)?;
    let page_count = doc.get_pages().len();
    if page_index >= page_count {
        return Err(SplitError::InvalidPage {
            page: page_index,
            page_count,
        });
    }

    // lopdf numbers pages from 1.
    let keep = (page_index + 1) as u32;
    let discard: Vec<u32> = (1..=page_count as u32).filter(|&n| n != keep).collect();
    doc.delete_pages(&discard);
    doc.prune_objects();
    doc.renumber_objects();

    let dir = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    doc.save_to(tmp.as_file_mut())
        .map_err(|e| SplitError::Write(std::io::Error::other(e)))?;
    tmp.persist(destination)
        .map_err(|e| SplitError::Write(e.error))?;

    info!(
        "split page {} of {} into {}",
        page_index + 1,
        source.display(),
        destination.display()
    );
    Ok(destination.to_path_buf())
}

/// Resolve the user-typed split name to `<name>.pdf` in the working
/// directory.
#[must_use]
pub fn destination_for(name: &str) -> PathBuf {
    PathBuf::from(format!("{}.pdf", name.trim()))
}
