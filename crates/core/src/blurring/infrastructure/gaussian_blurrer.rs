use std::cell::RefCell;

use crate::blurring::domain::frame_blurrer::FrameBlurrer;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::roi::{self, RoiRect};

pub const DEFAULT_KERNEL_SIZE: usize = 99;
pub const DEFAULT_SIGMA: f64 = 30.0;

/// Gaussian blur over each face rectangle.
///
/// Each ROI is blurred in isolation, so pixels outside the face never bleed in.
pub struct GaussianBlurrer {
    kernel: Vec<f32>,
    roi_buf: RefCell<Vec<u8>>,
    blur_temp: RefCell<Vec<f32>>,
}

impl GaussianBlurrer {
    pub fn new(kernel_size: usize, sigma: f64) -> Self {
        let kernel_size = kernel_size.max(1) | 1;
        Self {
            kernel: roi::gaussian_kernel_1d(kernel_size, sigma),
            roi_buf: RefCell::new(Vec::new()),
            blur_temp: RefCell::new(Vec::new()),
        }
    }
}

impl Default for GaussianBlurrer {
    fn default() -> Self {
        Self::new(DEFAULT_KERNEL_SIZE, DEFAULT_SIGMA)
    }
}

impl FrameBlurrer for GaussianBlurrer {
    fn blur(
        &self,
        frame: &mut Frame,
        regions: &[Region],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let (fw, fh) = (frame.width(), frame.height());
        let channels = frame.channels() as usize;
        let data = frame.data_mut();
        let mut roi = self.roi_buf.borrow_mut();
        let mut temp = self.blur_temp.borrow_mut();

        for rect in regions.iter().filter_map(|r| RoiRect::from_region(r, fw, fh)) {
            roi::extract_roi(data, fw as usize, channels, rect, &mut roi);
            roi::separable_blur(&mut roi, rect.w, rect.h, channels, &self.kernel, &mut temp);
            roi::write_roi_back(data, &roi, fw as usize, channels, rect);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height, 3, 0)
    }

    fn light_patch(frame: &mut Frame, x0: usize, y0: usize, size: usize) {
        let w = frame.width() as usize;
        let data = frame.data_mut();
        for y in y0..y0 + size {
            for x in x0..x0 + size {
                let idx = (y * w + x) * 3;
                data[idx..idx + 3].fill(255);
            }
        }
    }

    #[test]
    fn test_default_kernel() {
        let blurrer = GaussianBlurrer::default();
        assert_eq!(blurrer.kernel.len(), 99);
    }

    #[test]
    fn test_even_kernel_size_rounds_up_to_odd() {
        assert_eq!(GaussianBlurrer::new(10, 2.0).kernel.len(), 11);
    }

    #[test]
    fn test_no_regions_frame_unchanged() {
        let mut frame = make_frame(60, 60, 90);
        let original = frame.data().to_vec();
        GaussianBlurrer::default().blur(&mut frame, &[]).unwrap();
        assert_eq!(frame.data(), &original[..]);
    }

    #[test]
    fn test_blur_spreads_inside_region() {
        let mut frame = make_frame(100, 100, 0);
        light_patch(&mut frame, 20, 20, 5);
        GaussianBlurrer::default()
            .blur(&mut frame, &[Region::new(10, 10, 30, 30)])
            .unwrap();
        let neighbor = (18 * 100 + 22) * 3;
        assert!(frame.data()[neighbor] > 0);
        assert!(frame.data()[(22 * 100 + 22) * 3] < 255);
    }

    #[test]
    fn test_pixels_outside_region_unchanged() {
        let mut frame = make_frame(100, 100, 0);
        light_patch(&mut frame, 40, 40, 10);
        let original = frame.data().to_vec();
        GaussianBlurrer::default()
            .blur(&mut frame, &[Region::new(35, 35, 20, 20)])
            .unwrap();
        for (x, y) in [(0usize, 0usize), (34, 40), (55, 55), (99, 99)] {
            let idx = (y * 100 + x) * 3;
            assert_eq!(frame.data()[idx], original[idx]);
        }
    }

    #[test]
    fn test_region_past_frame_edge_is_clamped() {
        let mut frame = make_frame(50, 50, 0);
        light_patch(&mut frame, 45, 45, 5);
        GaussianBlurrer::new(5, 1.0)
            .blur(&mut frame, &[Region::new(40, 40, 30, 30)])
            .unwrap();
        assert!(frame.data()[(44 * 50 + 47) * 3] > 0);
    }

    #[test]
    fn test_preserves_frame_index() {
        let mut frame = Frame::new(vec![1; 30 * 30 * 3], 30, 30, 3, 42);
        GaussianBlurrer::default()
            .blur(&mut frame, &[Region::new(0, 0, 10, 10)])
            .unwrap();
        assert_eq!(frame.index(), 42);
    }
}
