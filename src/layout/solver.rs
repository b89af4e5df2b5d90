use crate::layout::constraint::{BoxSpec, Constraint, Relation};
use crate::layout::guide::{Attribute, Expr, Guides, constant};

/// Writer handed to a configuration closure; registers constraints on exactly one box.
///
/// Every method only records a constraint. Conflicts such as a second `Equal` on the
/// same attribute are reported when the layouter resolves, so registration order never
/// changes which error is seen.
///
/// `Equal` constraints on a derived attribute (`bottom`, `right`, `center_x`,
/// `center_y`) are kept as written; resolution solves them against whichever primary
/// of the same axis is otherwise pinned.
pub struct Solver<'a> {
    spec: &'a mut BoxSpec,
    guides: Guides,
}

impl<'a> Solver<'a> {
    pub(crate) fn new(spec: &'a mut BoxSpec, guides: Guides) -> Self {
        Self { spec, guides }
    }

    /// Guides of the box being configured.
    pub fn guides(&self) -> Guides {
        self.guides
    }

    pub fn constrain(&mut self, attribute: Attribute, relation: Relation, expr: impl Into<Expr>) {
        let c = Constraint {
            attribute,
            relation,
            expr: expr.into(),
        };
        tracing::trace!(constraint = %c.describe(self.spec.id()), "register");
        self.spec.push(c);
    }

    pub fn equal(&mut self, attribute: Attribute, expr: impl Into<Expr>) {
        self.constrain(attribute, Relation::Equal, expr);
    }

    pub fn at_most(&mut self, attribute: Attribute, expr: impl Into<Expr>) {
        self.constrain(attribute, Relation::AtMost, expr);
    }

    pub fn at_least(&mut self, attribute: Attribute, expr: impl Into<Expr>) {
        self.constrain(attribute, Relation::AtLeast, expr);
    }

    pub fn top(&mut self, v: f64) {
        self.equal(Attribute::Top, constant(v));
    }

    pub fn left(&mut self, v: f64) {
        self.equal(Attribute::Left, constant(v));
    }

    pub fn width(&mut self, v: f64) {
        self.equal(Attribute::Width, constant(v));
    }

    pub fn height(&mut self, v: f64) {
        self.equal(Attribute::Height, constant(v));
    }

    pub fn top_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::Top, e);
    }

    pub fn left_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::Left, e);
    }

    pub fn width_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::Width, e);
    }

    pub fn height_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::Height, e);
    }

    pub fn bottom_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::Bottom, e);
    }

    pub fn right_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::Right, e);
    }

    pub fn center_x_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::CenterX, e);
    }

    pub fn center_y_equal(&mut self, e: impl Into<Expr>) {
        self.equal(Attribute::CenterY, e);
    }

    pub fn top_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::Top, e);
    }

    pub fn left_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::Left, e);
    }

    pub fn width_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::Width, e);
    }

    pub fn height_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::Height, e);
    }

    pub fn bottom_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::Bottom, e);
    }

    pub fn right_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::Right, e);
    }

    pub fn center_x_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::CenterX, e);
    }

    pub fn center_y_less(&mut self, e: impl Into<Expr>) {
        self.at_most(Attribute::CenterY, e);
    }

    pub fn top_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::Top, e);
    }

    pub fn left_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::Left, e);
    }

    pub fn width_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::Width, e);
    }

    pub fn height_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::Height, e);
    }

    pub fn bottom_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::Bottom, e);
    }

    pub fn right_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::Right, e);
    }

    pub fn center_x_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::CenterX, e);
    }

    pub fn center_y_greater(&mut self, e: impl Into<Expr>) {
        self.at_least(Attribute::CenterY, e);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/solver.rs"]
mod tests;
