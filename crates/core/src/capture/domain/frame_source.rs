use std::fmt;
use std::path::PathBuf;

use crate::shared::frame::Frame;

/// A stream of frames from a camera or a still image.
///
/// Sources are not required to be `Send`: camera handles are tied to the
/// thread that opened them, so a source is opened on the thread that reads it.
pub trait FrameSource {
    /// Next frame, or `None` once the stream ended or a read failed.
    fn read(&mut self) -> Option<Frame>;

    /// `true` for sources that produce new pixels on every read.
    fn is_live(&self) -> bool;

    /// Release the underlying device. Further reads return `None`.
    fn release(&mut self);
}

/// What to open as a frame source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    Camera { index: u32 },
    Image(PathBuf),
}

impl fmt::Display for SourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSpec::Camera { index } => write!(f, "camera {index}"),
            SourceSpec::Image(path) => write!(f, "image {}", path.display()),
        }
    }
}
