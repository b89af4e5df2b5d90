use std::collections::BTreeSet;

use crate::foundation::core::approx_eq;
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::layout::constraint::{BoxSpec, Relation};
use crate::layout::guide::{Attribute, Axis, BoxId, Expr, Guide, LayouterTag, Role};

/// Resolved values of one box, indexed by [`Attribute::index`].
pub(crate) type AttributeValues = [f64; Attribute::COUNT];

/// An edge attribute pinned by an `Equal` constraint.
#[derive(Clone, Copy, Debug)]
struct Pin {
    role: Role,
    expr: Expr,
}

impl Pin {
    fn k(self) -> f64 {
        self.role.coefficient().unwrap_or(0.0)
    }
}

#[derive(Clone, Copy, Debug)]
enum SizeRule {
    Pinned(Expr),
    Between(Pin, Pin),
    /// Nominal zero narrowed by bounds, translated through the pinned edge if there is one.
    Free(Option<Pin>),
}

#[derive(Clone, Copy, Debug)]
enum StartRule {
    Pinned(Expr),
    From(Pin),
    Free,
}

/// How the two primaries of one axis of one box are computed.
#[derive(Clone, Copy, Debug)]
struct AxisPlan {
    axis: Axis,
    size: SizeRule,
    start: StartRule,
}

impl AxisPlan {
    fn new(spec: &BoxSpec, axis: Axis) -> Self {
        let edges: Vec<Pin> = Role::EDGES
            .into_iter()
            .filter_map(|role| {
                spec.equal(Attribute::of(axis, role))
                    .map(|expr| Pin { role, expr })
            })
            .collect();

        let size = match spec.equal(Attribute::of(axis, Role::Size)) {
            Some(e) => SizeRule::Pinned(e),
            None => match edges.as_slice() {
                [a, b, ..] => SizeRule::Between(*a, *b),
                [a] => SizeRule::Free(Some(*a)),
                [] => SizeRule::Free(None),
            },
        };
        let start = match edges.first() {
            Some(p) if p.role == Role::Start => StartRule::Pinned(p.expr),
            Some(p) => StartRule::From(*p),
            None => StartRule::Free,
        };
        Self { axis, size, start }
    }

    fn attr(&self, role: Role) -> Attribute {
        Attribute::of(self.axis, role)
    }

    /// Guides the size reads, other than primaries of its own box.
    fn size_deps(&self, spec: &BoxSpec) -> Vec<Guide> {
        let mut deps = Vec::new();
        match self.size {
            SizeRule::Pinned(e) => deps.extend(e.guide()),
            SizeRule::Between(a, b) => {
                deps.extend(a.expr.guide());
                deps.extend(b.expr.guide());
            }
            SizeRule::Free(pin) => {
                deps.extend(bound_guides(spec, self.attr(Role::Size)));
                if let Some(p) = pin {
                    deps.extend(p.expr.guide());
                    for role in Role::EDGES.into_iter().filter(|r| *r != p.role) {
                        deps.extend(bound_guides(spec, self.attr(role)));
                    }
                }
            }
        }
        deps
    }

    /// Guides the start reads, and whether it also reads the size of its own box.
    fn start_deps(&self, spec: &BoxSpec) -> (Vec<Guide>, bool) {
        match self.start {
            StartRule::Pinned(e) => (e.guide().into_iter().collect(), false),
            StartRule::From(p) => (p.expr.guide().into_iter().collect(), true),
            StartRule::Free => {
                let mut deps = Vec::new();
                let mut needs_size = false;
                for role in Role::EDGES {
                    let attr = self.attr(role);
                    deps.extend(bound_guides(spec, attr));
                    needs_size |= role != Role::Start && spec.bounds(attr).next().is_some();
                }
                (deps, needs_size)
            }
        }
    }
}

fn bound_guides(spec: &BoxSpec, attribute: Attribute) -> impl Iterator<Item = Guide> + '_ {
    spec.bounds(attribute).filter_map(|c| c.expr.guide())
}

/// Closed interval accumulated from `AtMost`/`AtLeast` bounds.
#[derive(Clone, Copy, Debug)]
struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    fn unbounded() -> Self {
        Self {
            lo: f64::NEG_INFINITY,
            hi: f64::INFINITY,
        }
    }

    /// Narrow `x` by `scale * x (relation) bound`; `scale` must be non-zero.
    fn narrow(&mut self, relation: Relation, bound: f64, scale: f64) {
        let v = bound / scale;
        let flipped = scale < 0.0;
        match (relation, flipped) {
            (Relation::AtMost, false) | (Relation::AtLeast, true) => self.hi = self.hi.min(v),
            (Relation::AtLeast, false) | (Relation::AtMost, true) => self.lo = self.lo.max(v),
            (Relation::Equal, _) => {
                self.lo = self.lo.max(v);
                self.hi = self.hi.min(v);
            }
        }
    }

    /// Clamp `nominal` into the interval; the lower bound wins when they cross.
    fn settle(self, nominal: f64) -> f64 {
        nominal.min(self.hi).max(self.lo)
    }
}

#[derive(Debug, Default)]
struct Graph {
    outs: Vec<Vec<usize>>,
    indeg: Vec<u32>,
}

impl Graph {
    fn with_nodes(n: usize) -> Self {
        Self {
            outs: vec![Vec::new(); n],
            indeg: vec![0; n],
        }
    }

    /// `node` reads `dep`.
    fn edge(&mut self, dep: usize, node: usize) {
        self.outs[dep].push(node);
        self.indeg[node] = self.indeg[node].saturating_add(1);
    }
}

fn node(slot: usize, attribute: Attribute) -> usize {
    slot * Attribute::COUNT + attribute.index()
}

fn guide_node(g: Guide) -> usize {
    node(g.target().slot(), g.attribute())
}

struct Resolver<'a> {
    tag: LayouterTag,
    specs: &'a [&'a BoxSpec],
    plans: Vec<[AxisPlan; 2]>,
    values: Vec<Option<f64>>,
}

/// Resolve every box of a layouter. `specs[i]` is the box with slot `i`: the container,
/// then the available space, then the children.
pub(crate) fn resolve_specs(
    tag: LayouterTag,
    specs: &[&BoxSpec],
) -> LayoutResult<Vec<AttributeValues>> {
    validate(tag, specs)?;

    let plans: Vec<[AxisPlan; 2]> = specs
        .iter()
        .map(|s| [AxisPlan::new(s, Axis::Horizontal), AxisPlan::new(s, Axis::Vertical)])
        .collect();
    let mut r = Resolver {
        tag,
        specs,
        plans,
        values: vec![None; specs.len() * Attribute::COUNT],
    };

    let graph = r.build_graph();
    let order = topo_order(&graph);
    if order.len() != graph.indeg.len() {
        let path = find_cycle(&graph.outs)
            .into_iter()
            .rev()
            .map(|n| r.guide_at(n))
            .collect();
        return Err(LayoutError::Cycle { path });
    }

    for n in order {
        let v = r.evaluate(n)?;
        tracing::trace!(guide = %r.guide_at(n), value = v, "resolved");
        r.values[n] = Some(v);
    }

    r.verify()?;
    r.finish()
}

/// Duplicate `Equal`s and guides from other layouters are rejected before any ordering work.
fn validate(tag: LayouterTag, specs: &[&BoxSpec]) -> LayoutResult<()> {
    for spec in specs {
        if let Some(attribute) = spec.duplicate_equal() {
            return Err(LayoutError::DuplicateEqual {
                guide: Guide::new(tag, spec.id(), attribute),
            });
        }
        for g in spec.referenced_guides() {
            if g.layouter() != tag || g.target().slot() >= specs.len() {
                return Err(LayoutError::DanglingGuide { guide: g });
            }
        }
    }
    Ok(())
}

impl Resolver<'_> {
    fn guide_at(&self, n: usize) -> Guide {
        let slot = n / Attribute::COUNT;
        let attribute = Attribute::ALL[n % Attribute::COUNT];
        let id = self.specs.get(slot).map_or(BoxId::CONTAINER, |s| s.id());
        Guide::new(self.tag, id, attribute)
    }

    fn plan(&self, slot: usize, axis: Axis) -> &AxisPlan {
        match axis {
            Axis::Horizontal => &self.plans[slot][0],
            Axis::Vertical => &self.plans[slot][1],
        }
    }

    fn build_graph(&self) -> Graph {
        let mut graph = Graph::with_nodes(self.values.len());
        for (slot, spec) in self.specs.iter().enumerate() {
            for axis in Axis::BOTH {
                let plan = self.plan(slot, axis);
                let size = node(slot, plan.attr(Role::Size));
                let start = node(slot, plan.attr(Role::Start));

                for g in plan.size_deps(spec) {
                    graph.edge(guide_node(g), size);
                }
                let (deps, needs_size) = plan.start_deps(spec);
                for g in deps {
                    graph.edge(guide_node(g), start);
                }
                if needs_size {
                    graph.edge(size, start);
                }
                for role in [Role::End, Role::Center] {
                    let derived = node(slot, plan.attr(role));
                    graph.edge(start, derived);
                    graph.edge(size, derived);
                }
            }
        }
        graph
    }

    fn read(&self, g: Guide) -> LayoutResult<f64> {
        self.values[guide_node(g)].ok_or_else(|| {
            LayoutError::Other(anyhow::anyhow!("{g} was read before it was resolved"))
        })
    }

    fn eval(&self, e: Expr) -> LayoutResult<f64> {
        match e.guide() {
            Some(g) => Ok(self.read(g)? + e.offset()),
            None => Ok(e.offset()),
        }
    }

    fn own(&self, slot: usize, attribute: Attribute) -> LayoutResult<f64> {
        self.read(Guide::new(self.tag, self.specs[slot].id(), attribute))
    }

    fn evaluate(&self, n: usize) -> LayoutResult<f64> {
        let slot = n / Attribute::COUNT;
        let attribute = Attribute::ALL[n % Attribute::COUNT];
        let plan = self.plan(slot, attribute.axis());
        match attribute.role() {
            Role::Size => self.eval_size(slot, plan),
            Role::Start => self.eval_start(slot, plan),
            role => {
                let start = self.own(slot, plan.attr(Role::Start))?;
                let size = self.own(slot, plan.attr(Role::Size))?;
                Ok(start + role.coefficient().unwrap_or(0.0) * size)
            }
        }
    }

    fn eval_size(&self, slot: usize, plan: &AxisPlan) -> LayoutResult<f64> {
        let spec = self.specs[slot];
        let size = match plan.size {
            SizeRule::Pinned(e) => self.eval(e)?,
            SizeRule::Between(a, b) => {
                let va = self.eval(a.expr)?;
                let vb = self.eval(b.expr)?;
                (vb - va) / (b.k() - a.k())
            }
            SizeRule::Free(pin) => {
                let mut range = Interval::unbounded();
                for c in spec.bounds(plan.attr(Role::Size)) {
                    range.narrow(c.relation, self.eval(c.expr)?, 1.0);
                }
                if let Some(p) = pin {
                    let vp = self.eval(p.expr)?;
                    for role in Role::EDGES.into_iter().filter(|r| *r != p.role) {
                        let d = role.coefficient().unwrap_or(0.0) - p.k();
                        for c in spec.bounds(plan.attr(role)) {
                            range.narrow(c.relation, self.eval(c.expr)? - vp, d);
                        }
                    }
                }
                let v = range.settle(0.0);
                tracing::debug!(
                    guide = %Guide::new(self.tag, spec.id(), plan.attr(Role::Size)),
                    value = v,
                    "size defaulted"
                );
                v
            }
        };
        Ok(size.max(0.0))
    }

    fn eval_start(&self, slot: usize, plan: &AxisPlan) -> LayoutResult<f64> {
        let spec = self.specs[slot];
        match plan.start {
            StartRule::Pinned(e) => self.eval(e),
            StartRule::From(p) => {
                let size = self.own(slot, plan.attr(Role::Size))?;
                Ok(self.eval(p.expr)? - p.k() * size)
            }
            StartRule::Free => {
                let mut range = Interval::unbounded();
                for role in Role::EDGES {
                    let k = role.coefficient().unwrap_or(0.0);
                    let mut bounds = spec.bounds(plan.attr(role)).peekable();
                    if bounds.peek().is_none() {
                        continue;
                    }
                    let size = if k == 0.0 {
                        0.0
                    } else {
                        self.own(slot, plan.attr(Role::Size))?
                    };
                    for c in bounds {
                        range.narrow(c.relation, self.eval(c.expr)? - k * size, 1.0);
                    }
                }
                let v = range.settle(0.0);
                tracing::debug!(
                    guide = %Guide::new(self.tag, spec.id(), plan.attr(Role::Start)),
                    value = v,
                    "start defaulted"
                );
                Ok(v)
            }
        }
    }

    /// Every `Equal` must hold against the final values.
    fn verify(&self) -> LayoutResult<()> {
        for (slot, spec) in self.specs.iter().enumerate() {
            for c in spec.constraints() {
                if c.relation != Relation::Equal {
                    continue;
                }
                let expected = self.eval(c.expr)?;
                let actual = self.own(slot, c.attribute)?;
                if !approx_eq(expected, actual) {
                    return Err(LayoutError::Overconstrained {
                        constraint: c.describe(spec.id()),
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }

    fn finish(self) -> LayoutResult<Vec<AttributeValues>> {
        let mut out = Vec::with_capacity(self.specs.len());
        for slot in 0..self.specs.len() {
            let mut values = [0.0; Attribute::COUNT];
            for a in Attribute::ALL {
                values[a.index()] = self.own(slot, a)?;
            }
            out.push(values);
        }
        Ok(out)
    }
}

/// Kahn ordering with a deterministic tie-break on node index.
fn topo_order(graph: &Graph) -> Vec<usize> {
    let mut indeg = graph.indeg.clone();
    let mut ready: BTreeSet<usize> = indeg
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| i)
        .collect();

    let mut order = Vec::with_capacity(indeg.len());
    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &j in &graph.outs[i] {
            let dj = &mut indeg[j];
            *dj = dj.saturating_sub(1);
            if *dj == 0 {
                ready.insert(j);
            }
        }
    }
    order
}

/// One cycle in `outs`, first node repeated at the end; empty if the graph is acyclic.
///
/// Walks with an explicit `(node, next edge)` stack so chain length never touches the
/// thread stack.
fn find_cycle(outs: &[Vec<usize>]) -> Vec<usize> {
    let n = outs.len();
    let mut state = vec![0u8; n]; // 0=unvisited,1=visiting,2=done
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if state[root] != 0 {
            continue;
        }
        state[root] = 1;
        stack.push((root, 0));

        while let Some(&(v, next)) = stack.last() {
            let Some(&to) = outs[v].get(next) else {
                state[v] = 2;
                stack.pop();
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;

            match state[to] {
                0 => {
                    state[to] = 1;
                    stack.push((to, 0));
                }
                1 => {
                    let pos = stack.iter().position(|&(x, _)| x == to).unwrap_or(0);
                    let mut cycle: Vec<usize> = stack[pos..].iter().map(|&(x, _)| x).collect();
                    cycle.push(to);
                    return cycle;
                }
                _ => {}
            }
        }
    }
    Vec::new()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolve.rs"]
mod tests;
