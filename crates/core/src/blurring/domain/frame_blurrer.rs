use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Domain interface for masking face regions within a frame.
///
/// Implementations modify the frame in place. Regions are clamped to the
/// frame before any pixel is touched.
pub trait FrameBlurrer: Send {
    fn blur(&self, frame: &mut Frame, regions: &[Region])
        -> Result<(), Box<dyn std::error::Error>>;
}
