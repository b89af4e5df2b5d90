use crate::foundation::core::Frame;
use crate::layout::guide::{Attribute, BoxId, Expr, Guide, Guides, LayouterTag};
use crate::layout::resolve::AttributeValues;

const FIRST_CHILD_SLOT: usize = 2;

/// Immutable result of resolving a [`Layouter`](crate::Layouter).
///
/// Holds the final value of every attribute of every box, the reserved boxes included.
/// Lookups with guides from another layouter return `None`.
#[derive(Clone, Debug)]
pub struct Resolution {
    tag: LayouterTag,
    values: Vec<AttributeValues>,
}

impl Resolution {
    pub(crate) fn new(tag: LayouterTag, values: Vec<AttributeValues>) -> Self {
        Self { tag, values }
    }

    /// Number of child boxes (the two reserved boxes are not counted).
    pub fn len(&self) -> usize {
        self.values.len().saturating_sub(FIRST_CHILD_SLOT)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn container(&self) -> Frame {
        self.frame_of(BoxId::CONTAINER).unwrap_or_default()
    }

    /// Space the parent offered, as seen through [`Layouter::max_guide`](crate::Layouter::max_guide).
    pub fn available(&self) -> Frame {
        self.frame_of(BoxId::AVAILABLE).unwrap_or_default()
    }

    pub fn frame_of(&self, id: BoxId) -> Option<Frame> {
        self.values.get(id.slot()).map(frame_from)
    }

    pub fn frame(&self, guides: &Guides) -> Option<Frame> {
        if guides.layouter() != self.tag {
            return None;
        }
        self.frame_of(guides.id())
    }

    /// Child frames in insertion order, matching [`Layouter::views`](crate::Layouter::views).
    pub fn frames(&self) -> impl ExactSizeIterator<Item = Frame> + '_ {
        self.values.iter().skip(FIRST_CHILD_SLOT).map(frame_from)
    }

    pub fn value(&self, guide: Guide) -> Option<f64> {
        if guide.layouter() != self.tag {
            return None;
        }
        self.values
            .get(guide.target().slot())
            .map(|v| v[guide.attribute().index()])
    }

    pub fn eval(&self, expr: Expr) -> Option<f64> {
        match expr.guide() {
            Some(g) => self.value(g).map(|v| v + expr.offset()),
            None => Some(expr.offset()),
        }
    }
}

fn frame_from(v: &AttributeValues) -> Frame {
    Frame::new(
        v[Attribute::Left.index()],
        v[Attribute::Top.index()],
        v[Attribute::Width.index()],
        v[Attribute::Height.index()],
    )
}
