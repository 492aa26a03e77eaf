//! Screen-space rectangles and the AABB overlap test.

/// Axis-aligned rectangle in world units. `(x, y)` is the top-left corner;
/// the rectangle covers `[x, x + w) x [y, y + h)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rectangle whose bottom edge is centered on `(cx, bottom)`.
    pub fn from_midbottom(cx: f64, bottom: f64, w: f64, h: f64) -> Self {
        Self {
            x: cx - w / 2.0,
            y: bottom - h,
            w,
            h,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.y = bottom - self.h;
    }

    /// Half-open overlap test: rectangles that only share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
