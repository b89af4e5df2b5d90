use crate::foundation::core::Size;
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::layout::constraint::{BoxSpec, Constraint, Relation};
use crate::layout::guide::{Attribute, BoxId, Guide, Guides, LayouterTag, constant};
use crate::layout::resolution::Resolution;
use crate::layout::resolve::resolve_specs;
use crate::layout::solver::Solver;

/// Ordered set of `(view, box)` pairs plus the container box, built fresh on every rebuild.
///
/// Boxes can only reference guides handed out before them: the container's own guides
/// ([`Layouter::guides`]), the space offered by the parent ([`Layouter::max_guide`]) and
/// those returned by earlier [`Layouter::add`] calls. [`Layouter::constrain`] re-opens an
/// existing box, which is the only way to reference a later box; circular references
/// then fail resolution with [`LayoutError::Cycle`].
#[derive(Debug)]
pub struct Layouter<V> {
    tag: LayouterTag,
    container: BoxSpec,
    available: BoxSpec,
    max: Option<Size>,
    children: Vec<(V, BoxSpec)>,
}

impl<V> Default for Layouter<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Layouter<V> {
    /// Layouter without an available-space input: [`Layouter::max_guide`] sizes default to 0.
    pub fn new() -> Self {
        Self {
            tag: LayouterTag::next(),
            container: BoxSpec::new(BoxId::CONTAINER),
            available: BoxSpec::new(BoxId::AVAILABLE),
            max: None,
            children: Vec::new(),
        }
    }

    /// Layouter whose parent offers `max` as the space available to the container.
    pub fn with_max(max: Size) -> Self {
        let mut l = Self::new();
        let pin = |attribute, v| Constraint {
            attribute,
            relation: Relation::Equal,
            expr: constant(v),
        };
        l.available.push(pin(Attribute::Top, 0.0));
        l.available.push(pin(Attribute::Left, 0.0));
        l.available.push(pin(Attribute::Width, max.width.max(0.0)));
        l.available.push(pin(Attribute::Height, max.height.max(0.0)));
        l.max = Some(max);
        l
    }

    /// Available-space input, if one was supplied.
    pub fn max(&self) -> Option<Size> {
        self.max
    }

    /// Add a child box for `view`, configure it, and return its guides.
    pub fn add(&mut self, view: V, configure: impl FnOnce(&mut Solver<'_>)) -> Guides {
        let id = BoxId::child(self.children.len() as u32);
        let guides = Guides::new(self.tag, id);
        let mut spec = BoxSpec::new(id);
        configure(&mut Solver::new(&mut spec, guides));
        self.children.push((view, spec));
        guides
    }

    /// Constrain the container box itself.
    pub fn solve(&mut self, configure: impl FnOnce(&mut Solver<'_>)) {
        let guides = self.guides();
        configure(&mut Solver::new(&mut self.container, guides));
    }

    /// Register further constraints on a box that was already added (or the container).
    pub fn constrain(
        &mut self,
        target: &Guides,
        configure: impl FnOnce(&mut Solver<'_>),
    ) -> LayoutResult<()> {
        let dangling = || LayoutError::DanglingGuide {
            guide: target.get(Attribute::Top),
        };
        if target.layouter() != self.tag {
            return Err(dangling());
        }
        if target.id().is_available() {
            return Err(LayoutError::validation(
                "the available space is an input of the layouter and cannot be constrained",
            ));
        }
        let spec = match target.id().child_index() {
            None => &mut self.container,
            Some(i) => match self.children.get_mut(i) {
                Some((_, spec)) => spec,
                None => return Err(dangling()),
            },
        };
        configure(&mut Solver::new(spec, *target));
        Ok(())
    }

    /// Guides of the container box itself, as constrained by [`Layouter::solve`].
    pub fn guides(&self) -> Guides {
        Guides::new(self.tag, BoxId::CONTAINER)
    }

    /// Guides of the space the parent offers this container, before the container's own
    /// constraints narrow it. Origin `(0, 0)`, size from [`Layouter::with_max`].
    pub fn max_guide(&self) -> Guides {
        Guides::new(self.tag, BoxId::AVAILABLE)
    }

    /// Views in insertion order.
    pub fn views(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.children.iter().map(|(v, _)| v)
    }

    pub fn into_views(self) -> Vec<V> {
        self.children.into_iter().map(|(v, _)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn spec(&self, id: BoxId) -> Option<&BoxSpec> {
        match id.child_index() {
            Some(i) => self.children.get(i).map(|(_, s)| s),
            None if id.is_container() => Some(&self.container),
            None => Some(&self.available),
        }
    }

    /// Whether `guide` was produced by this layouter for a box it holds.
    pub fn owns(&self, guide: Guide) -> bool {
        guide.layouter() == self.tag && self.spec(guide.target()).is_some()
    }

    /// Resolve every box into a frame.
    ///
    /// Fails atomically: on error no frame is produced for any box.
    #[tracing::instrument(skip(self), fields(boxes = self.children.len()))]
    pub fn resolve(&self) -> LayoutResult<Resolution> {
        let specs: Vec<&BoxSpec> = [&self.container, &self.available]
            .into_iter()
            .chain(self.children.iter().map(|(_, s)| s))
            .collect();
        let values = resolve_specs(self.tag, &specs)
            .inspect_err(|e| tracing::debug!(error = %e, "layout resolution failed"))?;
        Ok(Resolution::new(self.tag, values))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/layouter.rs"]
mod tests;
