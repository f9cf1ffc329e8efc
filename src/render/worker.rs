//! Render worker - runs in a dedicated thread
//!
//! The worker owns the open document and the display-list cache outright;
//! nothing else touches either. Requests arrive over a FIFO channel and are
//! answered strictly in order, so the control thread never sees responses
//! out of sequence and never has more than one render in flight.

use std::io::Cursor;
use std::path::Path;

use flume::{Receiver, Sender};
use log::{debug, warn};
use mupdf::{Colorspace, Device, DisplayList, Document, IRect, Matrix, Pixmap, Rect};

use super::DEFAULT_CACHE_CAPACITY;
use super::cache::DisplayListCache;
use super::request::{RenderFault, RenderRequest, RenderResponse, RequestId};
use super::zoom::ZoomMode;

/// Main worker function.
pub fn render_worker(
    doc_path: &Path,
    requests: Receiver<RenderRequest>,
    responses: Sender<RenderResponse>,
) {
    let doc = match Document::open(doc_path.to_string_lossy().as_ref()) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("render worker cannot open {}: {e}", doc_path.display());
            let _ = responses.send(RenderResponse::Error {
                id: RequestId::new(0),
                fault: e.into(),
            });
            return;
        }
    };

    let page_count = match doc.page_count() {
        Ok(count) => count as usize,
        Err(e) => {
            let _ = responses.send(RenderResponse::Error {
                id: RequestId::new(0),
                fault: e.into(),
            });
            return;
        }
    };

    let mut cache = DisplayListCache::new(DEFAULT_CACHE_CAPACITY);

    for request in requests {
        match request {
            RenderRequest::View { id, page, zoom } => {
                match render_view(&doc, &mut cache, page_count, page, zoom) {
                    Ok(png) => {
                        let _ = responses.send(RenderResponse::Bitmap {
                            id,
                            page,
                            zoom,
                            png,
                        });
                    }
                    Err(fault) => {
                        let _ = responses.send(RenderResponse::Error { id, fault });
                    }
                }
            }

            RenderRequest::Shutdown => break,
        }
    }
}

/// Rasterize one view of a page from its cached display list.
fn render_view(
    doc: &Document,
    cache: &mut DisplayListCache<DisplayList>,
    page_count: usize,
    page_num: usize,
    zoom: ZoomMode,
) -> Result<Vec<u8>, RenderFault> {
    if page_num >= page_count {
        return Err(RenderFault::InvalidPageIndex {
            page: page_num,
            page_count,
        });
    }

    let list = cache.get_or_create(page_num, || {
        debug!("building display list for page {page_num}");
        doc.load_page(page_num as i32)?.to_display_list(false)
    })?;

    let pixmap = rasterize(&list, zoom)?;
    encode_png(&pixmap)
}

/// Rasterize a display list either whole or clipped to one quadrant.
///
/// Quadrant views clip at render time rather than cropping a full-page
/// bitmap afterwards: only the quadrant's drawing commands run, at the
/// magnified scale.
fn rasterize(list: &DisplayList, zoom: ZoomMode) -> Result<Pixmap, RenderFault> {
    let rgb = Colorspace::device_rgb();
    let scale = zoom.scale();
    let ctm = Matrix::new_scale(scale, scale);
    let bounds = list.bounds();

    let Some(clip) = zoom.clip(bounds) else {
        return Ok(list.to_pixmap(&ctm, &rgb, false)?);
    };

    // Device-space box of the magnified clip.
    let x0 = (clip.x0 * scale).floor() as i32;
    let y0 = (clip.y0 * scale).floor() as i32;
    let x1 = (clip.x1 * scale).ceil() as i32;
    let y1 = (clip.y1 * scale).ceil() as i32;

    let mut pixmap = Pixmap::new_with_rect(&rgb, IRect::new(x0, y0, x1, y1), false)?;
    pixmap.clear_with(0xff)?;

    let device = Device::from_pixmap(&pixmap)?;
    list.run(
        &device,
        &ctm,
        Rect::new(x0 as f32, y0 as f32, x1 as f32, y1 as f32),
    )?;

    Ok(pixmap)
}

/// Encode a pixmap as PNG, dropping any extra channels down to RGB.
fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RenderFault> {
    let n = pixmap.n() as usize;
    if n < 3 {
        return Err(RenderFault::generic(format!(
            "unsupported pixmap format: {n} channels"
        )));
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let stride = pixmap.stride() as usize;
    let samples = pixmap.samples();
    let row_bytes = width * n;
    if samples.len() < stride.saturating_mul(height) || row_bytes > stride {
        return Err(RenderFault::generic("pixmap buffer size mismatch"));
    }

    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let row = &samples[y * stride..y * stride + row_bytes];
        if n == 3 {
            rgb.extend_from_slice(row);
        } else {
            for px in row.chunks_exact(n) {
                rgb.extend_from_slice(&px[..3]);
            }
        }
    }

    let img = image::RgbImage::from_raw(width as u32, height as u32, rgb)
        .ok_or_else(|| RenderFault::generic("pixmap dimensions disagree with sample count"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)?;

    Ok(png)
}
