//! Constraint-based layout resolver for declarative view trees.
//!
//! A container view rebuilds a fresh [`Layouter`] on every update, adds one box per
//! child with a configuration closure, and hands the result to the render pass, which
//! calls [`Layouter::resolve`] to obtain concrete [`Frame`]s.
//!
//! # Model
//!
//! - A [`Guide`] names one attribute (`top`, `left`, `width`, `height`, `bottom`,
//!   `right`, `center_x`, `center_y`) of one box, of the container
//!   ([`Layouter::guides`]) or of the space the parent offers it
//!   ([`Layouter::max_guide`]).
//! - An [`Expr`] is a guide plus a constant offset (`guide + 8.0`) or a bare
//!   [`constant`].
//! - A [`Solver`] registers `Equal`, `AtMost` and `AtLeast` constraints on the box it
//!   is bound to.
//!
//! # Resolution
//!
//! Resolution is a single dependency-ordered pass over affine relations:
//!
//! 1. Duplicate `Equal`s and foreign guides are rejected.
//! 2. Every attribute becomes a graph node; expressions add edges to the guides they read.
//! 3. Nodes are evaluated in topological order. Unpinned primaries default to `0`,
//!    narrowed by bounds; sizes are never negative.
//! 4. Every `Equal` is checked against the final values (tolerance `1e-6`).
//!
//! Any failure aborts the whole layouter; there are no partial frame sets.
//!
//! ```
//! use constraint_layout::{Layouter, Size};
//!
//! let mut l = Layouter::with_max(Size::new(400.0, 800.0));
//! let max = l.max_guide();
//! l.solve(|s| s.width_equal(max.width()));
//! let header = l.add("header", |s| {
//!     s.width(300.0);
//!     s.height(300.0);
//! });
//! let body = l.add("body", |s| {
//!     s.top_equal(header.bottom());
//!     s.left_equal(header.left());
//!     s.width(100.0);
//!     s.height(100.0);
//! });
//! let frames = l.resolve().unwrap();
//! let f = frames.frame(&body).unwrap();
//! assert_eq!((f.x, f.y, f.width, f.height), (0.0, 300.0, 100.0, 100.0));
//! ```
#![forbid(unsafe_code)]

mod foundation;
mod layout;
mod program;

pub use foundation::core::{Frame, Point, Rect, Size, TOLERANCE};
pub use foundation::error::{LayoutError, LayoutResult};
pub use layout::constraint::{BoxSpec, Constraint, Relation};
pub use layout::guide::{Attribute, Axis, BoxId, Expr, Guide, Guides, Role, constant};
pub use layout::layouter::Layouter;
pub use layout::resolution::Resolution;
pub use layout::solver::Solver;
pub use program::build::{CONTAINER_NAME, MAX_NAME, build_layouter, resolve_program};
pub use program::model::{
    BoxDef, ConstraintDef, ContainerDef, LayoutProgram, NamedFrame, ResolvedProgram, ValueDef,
};
