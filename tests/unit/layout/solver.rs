use super::*;
use crate::layout::guide::{BoxId, LayouterTag};

fn with_solver(f: impl FnOnce(&mut Solver<'_>)) -> BoxSpec {
    let id = BoxId::child(0);
    let mut spec = BoxSpec::new(id);
    let mut s = Solver::new(&mut spec, Guides::new(LayouterTag::for_tests(1), id));
    f(&mut s);
    spec
}

#[test]
fn absolute_setters_pin_constants() {
    let spec = with_solver(|s| {
        s.top(1.0);
        s.left(2.0);
        s.width(3.0);
        s.height(4.0);
    });
    assert_eq!(spec.equal(Attribute::Top), Some(constant(1.0)));
    assert_eq!(spec.equal(Attribute::Left), Some(constant(2.0)));
    assert_eq!(spec.equal(Attribute::Width), Some(constant(3.0)));
    assert_eq!(spec.equal(Attribute::Height), Some(constant(4.0)));
}

#[test]
fn derived_equal_is_recorded_on_its_own_attribute() {
    let spec = with_solver(|s| {
        let own = s.guides();
        s.right_equal(constant(50.0));
        s.center_y_equal(own.top() + 10.0);
    });
    assert_eq!(spec.equal(Attribute::Right), Some(constant(50.0)));
    let cy = spec.equal(Attribute::CenterY).unwrap();
    assert_eq!(cy.guide().map(|g| g.attribute()), Some(Attribute::Top));
    assert_eq!(cy.offset(), 10.0);
    assert_eq!(spec.equal(Attribute::Left), None);
}

#[test]
fn bounds_accumulate_in_order() {
    let spec = with_solver(|s| {
        s.width_less(constant(50.0));
        s.width_less(constant(40.0));
        s.width_greater(constant(10.0));
        s.bottom_greater(constant(5.0));
        s.center_x_less(constant(7.0));
    });
    let kinds: Vec<_> = spec.bounds(Attribute::Width).map(|c| c.relation).collect();
    assert_eq!(
        kinds,
        vec![Relation::AtMost, Relation::AtMost, Relation::AtLeast]
    );
    assert_eq!(spec.bounds(Attribute::Bottom).count(), 1);
    assert_eq!(spec.bounds(Attribute::CenterX).count(), 1);
    assert_eq!(spec.equal(Attribute::Width), None);
}

#[test]
fn second_equal_is_recorded_not_rejected() {
    let spec = with_solver(|s| {
        s.top(0.0);
        s.top(10.0);
    });
    assert_eq!(spec.constraints().len(), 2);
    assert_eq!(spec.duplicate_equal(), Some(Attribute::Top));
}
