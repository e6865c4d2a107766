use image::RgbImage;
use ndarray::ArrayView3;

use crate::shared::region::Region;

/// A single camera or image frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; detection,
/// classification and masking all read the same RGB layout.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn from_rgb_image(image: RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, 3, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixels inside `region` (clamped to the frame) into a new frame.
    ///
    /// Returns an empty (0×0) frame when the region does not overlap the frame.
    pub fn crop(&self, region: &Region) -> Frame {
        let r = region.clamped(self.width, self.height);
        if r.is_empty() {
            return Frame::new(Vec::new(), 0, 0, self.channels, self.index);
        }

        let channels = self.channels as usize;
        let fw = self.width as usize;
        let (rx, ry) = (r.x as usize, r.y as usize);
        let (rw, rh) = (r.width as usize, r.height as usize);

        let mut out = Vec::with_capacity(rw * rh * channels);
        for row in ry..ry + rh {
            let start = (row * fw + rx) * channels;
            out.extend_from_slice(&self.data[start..start + rw * channels]);
        }
        Frame::new(out, rw as u32, rh as u32, self.channels, self.index)
    }

    /// Runs `f` over the pixel buffer viewed as an `RgbImage`.
    ///
    /// Used for drawing with `imageproc`. Frames that are not 3-channel are
    /// left untouched.
    pub fn edit_rgb<F: FnOnce(&mut RgbImage)>(&mut self, f: F) {
        if self.channels != 3 {
            return;
        }
        let (h, w, c) = self.shape();
        if self.data.len() != h * w * c {
            log::error!(
                "Frame {} buffer does not match {}x{}",
                self.index,
                self.width,
                self.height
            );
            return;
        }
        let data = std::mem::take(&mut self.data);
        if let Some(mut img) = RgbImage::from_raw(self.width, self.height, data) {
            f(&mut img);
            self.data = img.into_raw();
        }
    }

    pub fn to_rgb_image(&self) -> Option<RgbImage> {
        if self.channels != 3 {
            return None;
        }
        RgbImage::from_raw(self.width, self.height, self.data.clone())
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, 7]);
            }
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_clone_is_independent() {
        let frame = Frame::new(vec![100u8; 12], 2, 2, 3, 0);
        let mut cloned = frame.clone();
        cloned.data_mut()[0] = 0;
        assert_eq!(frame.data()[0], 100);
        assert_eq!(cloned.data()[0], 0);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 3, 0);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        let frame = gradient_frame(4, 3);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[3, 4, 3]);
        assert_eq!(arr[[2, 1, 0]], 1); // x
        assert_eq!(arr[[2, 1, 1]], 2); // y
    }

    #[test]
    fn test_crop_copies_region() {
        let frame = gradient_frame(10, 8);
        let crop = frame.crop(&Region::new(2, 3, 4, 2));
        assert_eq!((crop.width(), crop.height()), (4, 2));
        let arr = crop.as_ndarray();
        assert_eq!(arr[[0, 0, 0]], 2);
        assert_eq!(arr[[0, 0, 1]], 3);
        assert_eq!(arr[[1, 3, 0]], 5);
        assert_eq!(arr[[1, 3, 1]], 4);
    }

    #[test]
    fn test_crop_is_clamped_to_frame() {
        let frame = gradient_frame(10, 8);
        let crop = frame.crop(&Region::new(-5, 6, 8, 10));
        assert_eq!((crop.width(), crop.height()), (3, 2));
    }

    #[test]
    fn test_crop_outside_frame_is_empty() {
        let frame = gradient_frame(10, 8);
        let crop = frame.crop(&Region::new(20, 20, 5, 5));
        assert!(crop.is_empty());
        assert!(crop.data().is_empty());
    }

    #[test]
    fn test_edit_rgb_writes_back() {
        let mut frame = Frame::new(vec![0u8; 12], 2, 2, 3, 3);
        frame.edit_rgb(|img| img.put_pixel(1, 1, image::Rgb([9, 8, 7])));
        assert_eq!(&frame.data()[9..12], &[9, 8, 7]);
        assert_eq!(frame.index(), 3);
    }

    #[test]
    fn test_edit_rgb_keeps_mismatched_buffer() {
        let mut frame = Frame {
            data: vec![5u8; 7],
            width: 2,
            height: 2,
            channels: 3,
            index: 0,
        };
        frame.edit_rgb(|img| img.put_pixel(0, 0, image::Rgb([0, 0, 0])));
        assert_eq!(frame.data(), &[5u8; 7]);
    }

    #[test]
    fn test_edit_rgb_ignores_non_rgb() {
        let mut frame = Frame::new(vec![1u8; 4], 2, 2, 1, 0);
        frame.edit_rgb(|img| img.put_pixel(0, 0, image::Rgb([0, 0, 0])));
        assert_eq!(frame.data(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_from_rgb_image_roundtrip_dimensions() {
        let img = RgbImage::new(5, 4);
        let frame = Frame::from_rgb_image(img, 2);
        assert_eq!((frame.width(), frame.height(), frame.index()), (5, 4, 2));
        assert_eq!(frame.to_rgb_image().unwrap().dimensions(), (5, 4));
    }
}
