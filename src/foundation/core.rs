pub use kurbo::{Point, Rect, Size};

/// Absolute tolerance used when comparing independently resolved values.
pub const TOLERANCE: f64 = 1e-6;

/// Resolved rectangle of one box: origin plus non-negative size.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn to_rect(self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }

    /// Component-wise comparison within [`TOLERANCE`].
    pub fn approx_eq(self, other: Self) -> bool {
        approx_eq(self.x, other.x)
            && approx_eq(self.y, other.y)
            && approx_eq(self.width, other.width)
            && approx_eq(self.height, other.height)
    }
}

impl From<Frame> for Rect {
    fn from(f: Frame) -> Self {
        f.to_rect()
    }
}

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}
