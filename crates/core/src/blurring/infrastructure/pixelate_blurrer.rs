use std::cell::RefCell;

use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::roi::{self, RoiRect};

/// Side of the mosaic grid a face is reduced to.
pub const DEFAULT_BLOCKS: usize = 16;

/// Mosaic mask: shrink each face to `blocks × blocks` bilinearly, then
/// scale back up with nearest-neighbour sampling.
pub struct PixelateBlurrer {
    blocks: usize,
    roi_buf: RefCell<Vec<u8>>,
}

impl PixelateBlurrer {
    pub fn new(blocks: usize) -> Self {
        Self {
            blocks: blocks.max(1),
            roi_buf: RefCell::new(Vec::new()),
        }
    }
}

impl Default for PixelateBlurrer {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKS)
    }
}

impl FrameBlurrer for PixelateBlurrer {
    fn blur(
        &self,
        frame: &mut Frame,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (fw, fh) = (frame.width(), frame.height());
        let channels = frame.channels() as usize;
        let data = frame.data_mut();
        let mut roi = self.roi_buf.borrow_mut();

        for rect in regions.iter().filter_map(|r| RoiRect::from_region(r, fw, fh)) {
            roi::extract_roi(data, fw as usize, channels, rect, &mut roi);
            let small = roi::resize_bilinear(&roi, rect.w, rect.h, channels, self.blocks, self.blocks);
            let mosaic =
                roi::resize_nearest(&small, self.blocks, self.blocks, channels, rect.w, rect.h);
            roi::write_roi_back(data, &mosaic, fw as usize, channels, rect);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: u32) -> Frame {
        let mut data = Vec::with_capacity((size * size * 3) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(data, size, size, 3, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> u8 {
        frame.data()[(y * frame.width() as usize + x) * 3]
    }

    #[test]
    fn test_region_becomes_blocks() {
        let mut frame = checkerboard(64);
        PixelateBlurrer::default()
            .blur(&mut frame, &[Region::new(0, 0, 64, 64)])
            .unwrap();
        // 64 / 16 = 4 pixel blocks: every pixel in a block shares a value.
        for by in 0..16 {
            for bx in 0..16 {
                let first = pixel(&frame, bx * 4, by * 4);
                for dy in 0..4 {
                    for dx in 0..4 {
                        assert_eq!(pixel(&frame, bx * 4 + dx, by * 4 + dy), first);
                    }
                }
            }
        }
    }

    #[test]
    fn test_pixels_outside_region_unchanged() {
        let mut frame = checkerboard(64);
        let original = frame.clone();
        PixelateBlurrer::default()
            .blur(&mut frame, &[Region::new(16, 16, 32, 32)])
            .unwrap();
        assert_eq!(pixel(&frame, 0, 0), pixel(&original, 0, 0));
        assert_eq!(pixel(&frame, 15, 20), pixel(&original, 15, 20));
        assert_eq!(pixel(&frame, 63, 63), pixel(&original, 63, 63));
    }

    #[test]
    fn test_small_region_is_upsampled_to_itself() {
        let mut frame = checkerboard(20);
        PixelateBlurrer::default()
            .blur(&mut frame, &[Region::new(2, 2, 4, 4)])
            .unwrap();
        assert_eq!((frame.width(), frame.height()), (20, 20));
    }

    #[test]
    fn test_empty_region_skipped() {
        let mut frame = checkerboard(20);
        let original = frame.data().to_vec();
        PixelateBlurrer::default()
            .blur(&mut frame, &[Region::new(5, 5, 0, 10), Region::new(50, 50, 5, 5)])
            .unwrap();
        assert_eq!(frame.data(), &original[..]);
    }
}
