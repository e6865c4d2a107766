//! Network input preparation.
//!
//! Turns an RGB [`Frame`] into the NCHW float tensor ("blob") the detection
//! and classification networks consume: bilinear resize to a square input,
//! channel reorder, per-channel mean subtraction.

use ndarray::Array4;

use crate::shared::frame::Frame;

/// Channel order expected by a network's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// Resize `frame` to `size × size` and lay it out as a `[1, 3, size, size]` tensor.
///
/// `mean` is indexed in output channel order and subtracted from raw 0–255
/// values (no scaling).
pub fn blob_from_frame(frame: &Frame, size: u32, mean: [f32; 3], order: ChannelOrder) -> Array4<f32> {
    let s = size as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, s, s));
    if frame.is_empty() || s == 0 {
        return tensor;
    }

    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let scale_y = src_h as f32 / s as f32;
    let scale_x = src_w as f32 / s as f32;

    let channel_map: [usize; 3] = match order {
        ChannelOrder::Rgb => [0, 1, 2],
        ChannelOrder::Bgr => [2, 1, 0],
    };

    for y in 0..s {
        let (y0, y1, fy) = sample_coords(y, scale_y, src_h);
        for x in 0..s {
            let (x0, x1, fx) = sample_coords(x, scale_x, src_w);
            for (out_c, &src_c) in channel_map.iter().enumerate() {
                let v00 = src[[y0, x0, src_c]] as f32;
                let v01 = src[[y0, x1, src_c]] as f32;
                let v10 = src[[y1, x0, src_c]] as f32;
                let v11 = src[[y1, x1, src_c]] as f32;
                let top = v00 + (v01 - v00) * fx;
                let bottom = v10 + (v11 - v10) * fx;
                tensor[[0, out_c, y, x]] = top + (bottom - top) * fy - mean[out_c];
            }
        }
    }

    tensor
}

/// Half-pixel-centre source coordinates for bilinear sampling.
fn sample_coords(dst: usize, scale: f32, src_len: usize) -> (usize, usize, f32) {
    let pos = ((dst as f32 + 0.5) * scale - 0.5).max(0.0);
    let i0 = (pos.floor() as usize).min(src_len - 1);
    let i1 = (i0 + 1).min(src_len - 1);
    (i0, i1, pos - i0 as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solid_frame(w: u32, h: u32, rgb: [u8; 3]) -> Frame {
        let data = (0..w * h).flat_map(|_| rgb).collect();
        Frame::new(data, w, h, 3, 0)
    }

    #[test]
    fn test_blob_shape() {
        let frame = solid_frame(64, 48, [10, 20, 30]);
        let blob = blob_from_frame(&frame, 300, [0.0; 3], ChannelOrder::Rgb);
        assert_eq!(blob.shape(), &[1, 3, 300, 300]);
    }

    #[test]
    fn test_rgb_order_subtracts_mean_per_channel() {
        let frame = solid_frame(20, 20, [200, 150, 100]);
        let blob = blob_from_frame(&frame, 8, [104.0, 117.0, 123.0], ChannelOrder::Rgb);
        assert_relative_eq!(blob[[0, 0, 3, 3]], 96.0, epsilon = 1e-3);
        assert_relative_eq!(blob[[0, 1, 3, 3]], 33.0, epsilon = 1e-3);
        assert_relative_eq!(blob[[0, 2, 3, 3]], -23.0, epsilon = 1e-3);
    }

    #[test]
    fn test_bgr_order_swaps_channels() {
        let frame = solid_frame(10, 10, [200, 150, 100]);
        let blob = blob_from_frame(&frame, 4, [0.0; 3], ChannelOrder::Bgr);
        assert_relative_eq!(blob[[0, 0, 0, 0]], 100.0, epsilon = 1e-3);
        assert_relative_eq!(blob[[0, 1, 0, 0]], 150.0, epsilon = 1e-3);
        assert_relative_eq!(blob[[0, 2, 0, 0]], 200.0, epsilon = 1e-3);
    }

    #[test]
    fn test_upscale_interpolates_between_pixels() {
        // 2x1 frame: black then white; the middle of a 4-wide output blends them.
        let frame = Frame::new(vec![0, 0, 0, 255, 255, 255], 2, 1, 3, 0);
        let blob = blob_from_frame(&frame, 4, [0.0; 3], ChannelOrder::Rgb);
        let left = blob[[0, 0, 0, 0]];
        let mid = blob[[0, 0, 0, 1]];
        let right = blob[[0, 0, 0, 3]];
        assert_relative_eq!(left, 0.0, epsilon = 1e-3);
        assert!(mid > 0.0 && mid < 255.0);
        assert_relative_eq!(right, 255.0, epsilon = 1e-3);
    }

    #[test]
    fn test_empty_frame_yields_zero_tensor() {
        let frame = Frame::new(Vec::new(), 0, 0, 3, 0);
        let blob = blob_from_frame(&frame, 4, [1.0; 3], ChannelOrder::Rgb);
        assert!(blob.iter().all(|&v| v == 0.0));
    }
}
