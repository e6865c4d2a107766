//! Drawing face boxes, labels and the FPS counter onto frames.

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::shared::frame::Frame;
use crate::shared::region::Region;

use super::font;

pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
pub const FPS_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

const BOX_THICKNESS: i32 = 2;
const LABEL_SCALE: f32 = 24.0;
const FPS_SCALE: f32 = 30.0;
/// Gap between the label baseline and the top of the face box.
const LABEL_OFFSET: i32 = 10;
const FPS_ORIGIN: (i32, i32) = (20, 50);

/// Draws detection overlays. Without a font only the boxes are drawn.
pub struct Annotator {
    font: Option<FontVec>,
}

impl Annotator {
    pub fn new(font: Option<FontVec>) -> Self {
        if font.is_none() {
            log::warn!("No overlay font available, face labels and FPS text will not be drawn");
        }
        Self { font }
    }

    /// Resolve a font from `font_path` or the system and build an annotator.
    pub fn with_font_path(font_path: Option<&Path>) -> Self {
        Self::new(font::find_font(font_path))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Green box around `region` with `label` above it.
    pub fn draw_face(&self, frame: &mut Frame, region: &Region, label: &str) {
        frame.edit_rgb(|img| {
            draw_box(img, region);
            if let Some(font) = &self.font {
                draw_baseline_text(
                    img,
                    font,
                    LABEL_SCALE,
                    LABEL_COLOR,
                    (region.x, region.y - LABEL_OFFSET),
                    label,
                );
            }
        });
    }

    /// `FPS: {fps:.2}` in the top-left corner.
    pub fn draw_fps(&self, frame: &mut Frame, fps: f64) {
        let Some(font) = &self.font else {
            return;
        };
        let text = format_fps(fps);
        frame.edit_rgb(|img| {
            draw_baseline_text(img, font, FPS_SCALE, FPS_COLOR, FPS_ORIGIN, &text);
        });
    }
}

pub fn format_fps(fps: f64) -> String {
    format!("FPS: {fps:.2}")
}

fn draw_box(img: &mut RgbImage, region: &Region) {
    for inset in 0..BOX_THICKNESS {
        let w = region.width - 2 * inset;
        let h = region.height - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(region.x + inset, region.y + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(img, rect, BOX_COLOR);
    }
}

/// Draw `text` with its baseline at `origin.1`, like a typewriter origin.
fn draw_baseline_text(
    img: &mut RgbImage,
    font: &FontVec,
    scale: f32,
    color: Rgb<u8>,
    origin: (i32, i32),
    text: &str,
) {
    let scale = PxScale::from(scale);
    let (_, height) = text_size(scale, font, text);
    draw_text_mut(img, color, origin.0, origin.1 - height as i32, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: u32, h: u32) -> Frame {
        Frame::new(vec![0; (w * h * 3) as usize], w, h, 3, 0)
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * frame.width() + x) * 3) as usize;
        [frame.data()[i], frame.data()[i + 1], frame.data()[i + 2]]
    }

    #[test]
    fn test_box_is_green_and_two_pixels_thick() {
        let annotator = Annotator::new(None);
        let mut frame = blank(100, 100);
        annotator.draw_face(&mut frame, &Region::from_corners(20, 30, 60, 80), "Male, (25-32)");

        assert_eq!(pixel(&frame, 20, 50), [0, 255, 0]);
        assert_eq!(pixel(&frame, 21, 50), [0, 255, 0]);
        assert_eq!(pixel(&frame, 22, 50), [0, 0, 0]);
        assert_eq!(pixel(&frame, 40, 30), [0, 255, 0]);
        assert_eq!(pixel(&frame, 40, 31), [0, 255, 0]);
        assert_eq!(pixel(&frame, 40, 55), [0, 0, 0]);
    }

    #[test]
    fn test_box_partly_outside_frame_is_drawn() {
        let annotator = Annotator::new(None);
        let mut frame = blank(50, 50);
        annotator.draw_face(&mut frame, &Region::from_corners(-10, -10, 20, 20), "x");
        assert_eq!(pixel(&frame, 19, 5), [0, 255, 0]);
    }

    #[test]
    fn test_empty_region_draws_nothing() {
        let annotator = Annotator::new(None);
        let mut frame = blank(20, 20);
        annotator.draw_face(&mut frame, &Region::new(5, 5, 0, 0), "x");
        assert!(frame.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_fps_without_font_is_noop() {
        let annotator = Annotator::new(None);
        let mut frame = blank(200, 100);
        annotator.draw_fps(&mut frame, 29.97);
        assert!(frame.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_format_fps_two_decimals() {
        assert_eq!(format_fps(29.969), "FPS: 29.97");
        assert_eq!(format_fps(0.0), "FPS: 0.00");
    }

    #[test]
    fn test_label_drawn_when_font_available() {
        let annotator = Annotator::with_font_path(None);
        if !annotator.has_font() {
            return;
        }
        let mut frame = blank(200, 200);
        annotator.draw_face(&mut frame, &Region::from_corners(40, 100, 140, 180), "Female, (8-12)");
        // Text sits above the box.
        let yellow = (0..90)
            .flat_map(|y| (0..200).map(move |x| (x, y)))
            .any(|(x, y)| {
                let p = pixel(&frame, x, y);
                p[0] > 0 && p[1] > 0 && p[2] == 0
            });
        assert!(yellow);
    }
}
