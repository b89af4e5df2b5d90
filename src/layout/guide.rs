use std::fmt;
use std::ops::{Add, Sub};
use std::sync::atomic::{AtomicU64, Ordering};

/// One numeric attribute of a box.
///
/// `Top`, `Left`, `Width` and `Height` are the primaries. The remaining four are
/// always derived from the primaries of the same box:
/// `Bottom = Top + Height`, `Right = Left + Width`, `CenterX = Left + Width / 2`,
/// `CenterY = Top + Height / 2`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Top,
    Left,
    Width,
    Height,
    Bottom,
    Right,
    CenterX,
    CenterY,
}

impl Attribute {
    pub const COUNT: usize = 8;

    pub const ALL: [Attribute; Self::COUNT] = [
        Attribute::Top,
        Attribute::Left,
        Attribute::Width,
        Attribute::Height,
        Attribute::Bottom,
        Attribute::Right,
        Attribute::CenterX,
        Attribute::CenterY,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_primary(self) -> bool {
        matches!(
            self,
            Attribute::Top | Attribute::Left | Attribute::Width | Attribute::Height
        )
    }

    pub fn axis(self) -> Axis {
        match self {
            Attribute::Left | Attribute::Width | Attribute::Right | Attribute::CenterX => {
                Axis::Horizontal
            }
            Attribute::Top | Attribute::Height | Attribute::Bottom | Attribute::CenterY => {
                Axis::Vertical
            }
        }
    }

    pub fn role(self) -> Role {
        match self {
            Attribute::Top | Attribute::Left => Role::Start,
            Attribute::Width | Attribute::Height => Role::Size,
            Attribute::Bottom | Attribute::Right => Role::End,
            Attribute::CenterX | Attribute::CenterY => Role::Center,
        }
    }

    pub fn of(axis: Axis, role: Role) -> Self {
        match (axis, role) {
            (Axis::Horizontal, Role::Start) => Attribute::Left,
            (Axis::Horizontal, Role::Size) => Attribute::Width,
            (Axis::Horizontal, Role::End) => Attribute::Right,
            (Axis::Horizontal, Role::Center) => Attribute::CenterX,
            (Axis::Vertical, Role::Start) => Attribute::Top,
            (Axis::Vertical, Role::Size) => Attribute::Height,
            (Axis::Vertical, Role::End) => Attribute::Bottom,
            (Axis::Vertical, Role::Center) => Attribute::CenterY,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Top => "top",
            Attribute::Left => "left",
            Attribute::Width => "width",
            Attribute::Height => "height",
            Attribute::Bottom => "bottom",
            Attribute::Right => "right",
            Attribute::CenterX => "center_x",
            Attribute::CenterY => "center_y",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// Position of an attribute along its axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Start,
    Size,
    End,
    Center,
}

impl Role {
    /// Edge roles in the order they are consulted when deriving a start.
    pub const EDGES: [Role; 3] = [Role::Start, Role::End, Role::Center];

    /// Weight of the size in `edge = start + k * size`; `None` for [`Role::Size`].
    pub fn coefficient(self) -> Option<f64> {
        match self {
            Role::Start => Some(0.0),
            Role::End => Some(1.0),
            Role::Center => Some(0.5),
            Role::Size => None,
        }
    }
}

/// Identifies the layouter a guide was produced by.
///
/// Tags are never reused within a process, so a guide kept across rebuilds is
/// detected as dangling instead of silently aliasing a box of the new layouter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayouterTag(u64);

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

impl LayouterTag {
    pub(crate) fn next() -> Self {
        Self(NEXT_TAG.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(v: u64) -> Self {
        Self(v)
    }
}

/// Index of a box inside its layouter.
///
/// Two ids are reserved: 0 is the container itself and 1 is the space the parent
/// offers it (see [`Layouter::max_guide`](crate::Layouter::max_guide)). Children follow
/// in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub(crate) u32);

impl BoxId {
    pub const CONTAINER: BoxId = BoxId(0);
    pub const AVAILABLE: BoxId = BoxId(1);

    const FIRST_CHILD: u32 = 2;

    /// Id of the `idx`-th added child (0-based insertion order).
    pub fn child(idx: u32) -> Self {
        Self(idx + Self::FIRST_CHILD)
    }

    pub fn is_container(self) -> bool {
        self == Self::CONTAINER
    }

    pub fn is_available(self) -> bool {
        self == Self::AVAILABLE
    }

    /// Insertion index of a child box, `None` for the two reserved boxes.
    pub fn child_index(self) -> Option<usize> {
        self.0
            .checked_sub(Self::FIRST_CHILD)
            .map(|i| i as usize)
    }

    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.child_index() {
            Some(i) => write!(f, "box#{i}"),
            None if self.is_container() => f.write_str("container"),
            None => f.write_str("max"),
        }
    }
}

/// Handle to one attribute of one box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Guide {
    layouter: LayouterTag,
    target: BoxId,
    attribute: Attribute,
}

impl Guide {
    pub(crate) fn new(layouter: LayouterTag, target: BoxId, attribute: Attribute) -> Self {
        Self {
            layouter,
            target,
            attribute,
        }
    }

    pub fn target(self) -> BoxId {
        self.target
    }

    pub fn attribute(self) -> Attribute {
        self.attribute
    }

    pub(crate) fn layouter(self) -> LayouterTag {
        self.layouter
    }
}

impl fmt::Display for Guide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.attribute)
    }
}

/// All eight guides of one box, as returned by [`Layouter::add`](crate::Layouter::add).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Guides {
    layouter: LayouterTag,
    target: BoxId,
}

impl Guides {
    pub(crate) fn new(layouter: LayouterTag, target: BoxId) -> Self {
        Self { layouter, target }
    }

    pub fn id(&self) -> BoxId {
        self.target
    }

    pub fn get(&self, attribute: Attribute) -> Guide {
        Guide::new(self.layouter, self.target, attribute)
    }

    pub fn top(&self) -> Guide {
        self.get(Attribute::Top)
    }

    pub fn left(&self) -> Guide {
        self.get(Attribute::Left)
    }

    pub fn width(&self) -> Guide {
        self.get(Attribute::Width)
    }

    pub fn height(&self) -> Guide {
        self.get(Attribute::Height)
    }

    pub fn bottom(&self) -> Guide {
        self.get(Attribute::Bottom)
    }

    pub fn right(&self) -> Guide {
        self.get(Attribute::Right)
    }

    pub fn center_x(&self) -> Guide {
        self.get(Attribute::CenterX)
    }

    pub fn center_y(&self) -> Guide {
        self.get(Attribute::CenterY)
    }

    pub(crate) fn layouter(&self) -> LayouterTag {
        self.layouter
    }
}

/// Affine value: an optional guide plus a constant offset.
///
/// Offsets compose additively, so `(g + 3.0) + 4.0` is the same expression as `g + 7.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Expr {
    guide: Option<Guide>,
    offset: f64,
}

impl Expr {
    pub fn constant(value: f64) -> Self {
        Self {
            guide: None,
            offset: value,
        }
    }

    pub fn guide(self) -> Option<Guide> {
        self.guide
    }

    pub fn offset(self) -> f64 {
        self.offset
    }
}

/// Guide-free expression.
pub fn constant(value: f64) -> Expr {
    Expr::constant(value)
}

impl From<Guide> for Expr {
    fn from(g: Guide) -> Self {
        Self {
            guide: Some(g),
            offset: 0.0,
        }
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Self::constant(v)
    }
}

impl Add<f64> for Expr {
    type Output = Expr;

    fn add(self, rhs: f64) -> Expr {
        Expr {
            guide: self.guide,
            offset: self.offset + rhs,
        }
    }
}

impl Sub<f64> for Expr {
    type Output = Expr;

    fn sub(self, rhs: f64) -> Expr {
        self + -rhs
    }
}

impl Add<f64> for Guide {
    type Output = Expr;

    fn add(self, rhs: f64) -> Expr {
        Expr::from(self) + rhs
    }
}

impl Sub<f64> for Guide {
    type Output = Expr;

    fn sub(self, rhs: f64) -> Expr {
        Expr::from(self) - rhs
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.guide {
            None => write!(f, "{}", self.offset),
            Some(g) if self.offset == 0.0 => write!(f, "{g}"),
            Some(g) if self.offset < 0.0 => write!(f, "{g} - {}", -self.offset),
            Some(g) => write!(f, "{g} + {}", self.offset),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/guide.rs"]
mod tests;
