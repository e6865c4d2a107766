use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("cannot open camera {index}: {reason}")]
    CameraOpen { index: u32, reason: String },
    #[error("cannot read image {}: {reason}", .path.display())]
    ImageRead { path: PathBuf, reason: String },
}
