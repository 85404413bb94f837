use std::fs;
use std::path::{Path, PathBuf};

use engine_logging::engine_debug;
use formfill_engine::{Document, Frame, Page};

/// A saved page on disk plus the frames a browser host would have handed us.
#[derive(Debug, Clone, Default)]
pub struct PageSource {
    pub page: PathBuf,
    /// Address the page was saved from; drives hostname fallbacks.
    pub url: Option<String>,
    /// Saved documents of scriptable sub-frames, in page order.
    pub frames: Vec<PathBuf>,
    /// Sub-frames that refused injection.
    pub denied_frames: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read {path:?}: {source}")]
pub struct PageLoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

const DENIED_REASON: &str = "cross-origin frame";

/// Builds a [`Page`]: the top document with its `srcdoc` frames, then each
/// frame file, then the denied frames.
pub fn load_page(source: &PageSource) -> Result<Page, PageLoadError> {
    let html = read(&source.page)?;
    let mut page = Page::from_html(&html, source.url.as_deref());

    for path in &source.frames {
        let html = read(path)?;
        page.push_frame(Frame::Scriptable(Document::parse(&html, None)));
    }
    for url in &source.denied_frames {
        page.push_frame(Frame::Denied {
            url: url.clone(),
            reason: DENIED_REASON.to_string(),
        });
    }
    engine_debug!("loaded {:?} with {} frames", source.page, page.frame_count());
    Ok(page)
}

fn read(path: &Path) -> Result<String, PageLoadError> {
    fs::read_to_string(path).map_err(|source| PageLoadError {
        path: path.to_path_buf(),
        source,
    })
}
