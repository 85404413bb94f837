use std::fmt;

use engine_logging::engine_debug;

use crate::dom::Document;

const SRCDOC_URL: &str = "about:srcdoc";

/// One browsing context of a page.
#[derive(Debug)]
pub enum Frame {
    /// A document the engine may read and write.
    Scriptable(Document),
    /// A frame the host could not inject into (cross-origin policy, CSP, ...).
    Denied { url: String, reason: String },
}

impl Frame {
    pub fn document(&self) -> Option<&Document> {
        match self {
            Frame::Scriptable(doc) => Some(doc),
            Frame::Denied { .. } => None,
        }
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Frame::Scriptable(doc) => Some(doc),
            Frame::Denied { .. } => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Frame::Scriptable(doc) => doc.url().map(|url| url.as_str()).unwrap_or(""),
            Frame::Denied { url, .. } => url,
        }
    }
}

/// A top-level document plus its nested frames, each an isolated unit of work.
#[derive(Debug)]
pub struct Page {
    top: Frame,
    subframes: Vec<Frame>,
}

impl Page {
    pub fn new(top: Document) -> Self {
        Self {
            top: Frame::Scriptable(top),
            subframes: Vec::new(),
        }
    }

    /// A page whose top-level document refused injection.
    pub fn denied(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            top: Frame::Denied {
                url: url.into(),
                reason: reason.into(),
            },
            subframes: Vec::new(),
        }
    }

    /// Parses the top-level document and every `<iframe srcdoc>` nested in
    /// it, at any depth. Frames loaded from `src` must be added by the host.
    pub fn from_html(html: &str, url: Option<&str>) -> Self {
        let top = Document::parse(html, url);
        let mut subframes = Vec::new();
        collect_srcdoc_frames(&top, &mut subframes);
        Self {
            top: Frame::Scriptable(top),
            subframes,
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.push_frame(frame);
        self
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.subframes.push(frame);
    }

    pub fn top(&self) -> &Frame {
        &self.top
    }

    /// Top frame first, then sub-frames in insertion order.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::once(&self.top).chain(self.subframes.iter())
    }

    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        std::iter::once(&mut self.top).chain(self.subframes.iter_mut())
    }

    pub fn frame_count(&self) -> usize {
        1 + self.subframes.len()
    }
}

/// Logging label for the frame at `index` (0 is the top-level document).
pub struct FrameLabel<'a> {
    pub index: usize,
    pub frame: &'a Frame,
}

impl fmt::Display for FrameLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.frame.url();
        match (self.index, url.is_empty()) {
            (0, true) => write!(f, "top"),
            (0, false) => write!(f, "top {url}"),
            (index, true) => write!(f, "frame {index}"),
            (index, false) => write!(f, "frame {index} {url}"),
        }
    }
}

fn collect_srcdoc_frames(doc: &Document, out: &mut Vec<Frame>) {
    let sources: Vec<String> = doc
        .elements()
        .filter(|el| el.value().name() == "iframe")
        .filter_map(|el| el.value().attr("srcdoc").map(str::to_string))
        .collect();
    for source in sources {
        let nested = Document::parse(&source, Some(SRCDOC_URL));
        engine_debug!("discovered srcdoc frame ({} bytes)", source.len());
        let mut descendants = Vec::new();
        collect_srcdoc_frames(&nested, &mut descendants);
        out.push(Frame::Scriptable(nested));
        out.append(&mut descendants);
    }
}
