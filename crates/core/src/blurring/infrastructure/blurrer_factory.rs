use crate::blurring::domain::frame_blurrer::FrameBlurrer;

use super::gaussian_blurrer::GaussianBlurrer;
use super::pixelate_blurrer::PixelateBlurrer;

/// How detected faces are hidden in the annotated output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FaceMask {
    #[default]
    None,
    Blur,
    Pixelate,
}

impl FaceMask {
    /// Map the two option checkboxes to a mask. Blur wins when both are set.
    pub fn from_flags(blur: bool, pixelate: bool) -> Self {
        if blur {
            FaceMask::Blur
        } else if pixelate {
            FaceMask::Pixelate
        } else {
            FaceMask::None
        }
    }
}

/// Creates the blurrer for `mask`, or `None` when faces stay visible.
pub fn create_blurrer(mask: FaceMask) -> Option<Box<dyn FrameBlurrer>> {
    log::debug!("Creating face mask {:?}", mask);
    match mask {
        FaceMask::None => None,
        FaceMask::Blur => Some(Box::new(GaussianBlurrer::default())),
        FaceMask::Pixelate => Some(Box::new(PixelateBlurrer::default())),
    }
}
