/// An axis-aligned rectangle in frame pixel coordinates.
///
/// Detections may extend past the frame edges; use [`Region::clamped`]
/// before touching pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a region from corner coordinates `[x1, y1)` to `[x2, y2)`.
    ///
    /// Inverted corners produce a zero-sized region.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0),
            height: (y2 - y1).max(0),
        }
    }

    pub fn x2(&self) -> i32 {
        self.x + self.width
    }

    pub fn y2(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with the `frame_width × frame_height` frame.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Region {
        let x1 = self.x.clamp(0, frame_width as i32);
        let y1 = self.y.clamp(0, frame_height as i32);
        let x2 = self.x2().clamp(0, frame_width as i32);
        let y2 = self.y2().clamp(0, frame_height as i32);
        Region::from_corners(x1, y1, x2, y2)
    }

    /// The face crop used for classification: the region grown by `padding`
    /// on every side, limited to the frame.
    ///
    /// The far edges stop one pixel short of the frame border, matching the
    /// crop the age and gender networks were tuned against.
    pub fn padded(&self, padding: i32, frame_width: u32, frame_height: u32) -> Region {
        let x1 = (self.x - padding).max(0);
        let y1 = (self.y - padding).max(0);
        let x2 = (self.x2() + padding).min(frame_width as i32 - 1);
        let y2 = (self.y2() + padding).min(frame_height as i32 - 1);
        Region::from_corners(x1, y1, x2, y2)
    }
}
