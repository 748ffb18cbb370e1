//! Coordinate spaces and the ratio→absolute resolver.
//!
//! Three spaces are in play: raw capture pixels, the canonical working
//! resolution frames are resized to, and absolute screen pixels. Ratio
//! coordinates ([0,1] relative to the window content area) are the lingua
//! franca between them; conversion to absolute pixels happens at the last
//! possible moment, against a freshly queried content box, because the
//! window may move or resize between calls.

/// Axis-aligned box in absolute screen pixels. Invariant: x1 < x2, y1 < y2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl PixelBox {
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// Axis-aligned box in normalized [0,1] coordinates relative to the window
/// content area. Invariant: x1 < x2, y1 < y2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl RatioBox {
    /// Center point in ratio coordinates.
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Strict rectangle intersection test (touching edges do not overlap).
    pub fn overlaps(&self, other: &RatioBox) -> bool {
        self.x1 < other.x2 && self.x2 > other.x1 && self.y1 < other.y2 && self.y2 > other.y1
    }

    /// Sub-box located by coordinates relative to this box (0 = this box's
    /// near edge, 1 = its far edge).
    pub fn sub(&self, rx1: f32, ry1: f32, rx2: f32, ry2: f32) -> RatioBox {
        let w = self.x2 - self.x1;
        let h = self.y2 - self.y1;
        RatioBox {
            x1: self.x1 + rx1 * w,
            y1: self.y1 + ry1 * h,
            x2: self.x1 + rx2 * w,
            y2: self.y1 + ry2 * h,
        }
    }

    /// Grow the box by per-edge ratio offsets, clamped to [0,1]. Used to
    /// expand a landmark box into the super-region holding its text fields.
    pub fn expand(&self, left: f32, top: f32, right: f32, bottom: f32) -> RatioBox {
        RatioBox {
            x1: (self.x1 - left).clamp(0.0, 1.0),
            y1: (self.y1 - top).clamp(0.0, 1.0),
            x2: (self.x2 + right).clamp(0.0, 1.0),
            y2: (self.y2 + bottom).clamp(0.0, 1.0),
        }
    }
}

/// Coordinate-wise arithmetic mean of a non-empty set of boxes.
pub fn mean_box(boxes: &[RatioBox]) -> RatioBox {
    let n = boxes.len() as f32;
    RatioBox {
        x1: boxes.iter().map(|b| b.x1).sum::<f32>() / n,
        y1: boxes.iter().map(|b| b.y1).sum::<f32>() / n,
        x2: boxes.iter().map(|b| b.x2).sum::<f32>() / n,
        y2: boxes.iter().map(|b| b.y2).sum::<f32>() / n,
    }
}

/// Convert a ratio point to absolute screen pixels against the given
/// content box. Affine, monotonic in each axis, truncating to integers:
/// (0,0) maps to the box's top-left corner, (1,1) to its bottom-right.
pub fn to_absolute(rx: f32, ry: f32, content: PixelBox) -> (i32, i32) {
    let x = content.x1 + (rx * content.width() as f32) as i32;
    let y = content.y1 + (ry * content.height() as f32) as i32;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_maps_corners_to_box_corners() {
        let content = PixelBox { x1: 100, y1: 50, x2: 1700, y2: 950 };
        assert_eq!(to_absolute(0.0, 0.0, content), (100, 50));
        assert_eq!(to_absolute(1.0, 1.0, content), (1700, 950));
    }

    #[test]
    fn resolver_is_monotonic_per_axis() {
        let content = PixelBox { x1: 10, y1: 20, x2: 810, y2: 620 };
        let mut last_x = i32::MIN;
        let mut last_y = i32::MIN;
        for i in 0..=10 {
            let r = i as f32 / 10.0;
            let (x, y) = to_absolute(r, r, content);
            assert!(x >= last_x && y >= last_y);
            last_x = x;
            last_y = y;
        }
    }

    #[test]
    fn resolver_truncates_to_integers() {
        let content = PixelBox { x1: 0, y1: 0, x2: 3, y2: 3 };
        // 0.5 * 3 = 1.5, truncated to 1
        assert_eq!(to_absolute(0.5, 0.5, content), (1, 1));
    }

    #[test]
    fn overlap_is_strict() {
        let a = RatioBox { x1: 0.0, y1: 0.0, x2: 0.5, y2: 0.5 };
        let touching = RatioBox { x1: 0.5, y1: 0.0, x2: 1.0, y2: 0.5 };
        let inside = RatioBox { x1: 0.4, y1: 0.4, x2: 0.6, y2: 0.6 };
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn expand_clamps_to_unit_square() {
        let b = RatioBox { x1: 0.05, y1: 0.1, x2: 0.9, y2: 0.95 };
        let e = b.expand(0.2, 0.2, 0.2, 0.2);
        assert_eq!(e.x1, 0.0);
        assert_eq!(e.y1, 0.0);
        assert_eq!(e.x2, 1.0);
        assert_eq!(e.y2, 1.0);
    }
}
