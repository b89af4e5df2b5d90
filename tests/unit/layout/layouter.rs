use super::*;
use crate::foundation::core::{Frame, Size};
use crate::layout::guide::constant;

fn frame(l: &Layouter<&'static str>, g: &Guides) -> Frame {
    l.resolve().unwrap().frame(g).unwrap()
}

#[test]
fn views_keep_insertion_order() {
    let mut l = Layouter::new();
    l.add("a", |_| {});
    l.add("b", |_| {});
    l.add("c", |_| {});
    assert_eq!(l.views().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(l.len(), 3);
    assert_eq!(l.into_views(), vec!["a", "b", "c"]);
}

#[test]
fn right_and_width_pin_left() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.right_equal(constant(100.0));
        s.width(30.0);
        s.bottom_equal(constant(50.0));
        s.height(20.0);
    });
    assert_eq!(frame(&l, &g), Frame::new(70.0, 30.0, 30.0, 20.0));
}

#[test]
fn top_and_bottom_pin_height() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.top(10.0);
        s.bottom_equal(constant(60.0));
    });
    assert_eq!(frame(&l, &g).height, 50.0);
}

#[test]
fn center_and_size_pin_start() {
    let mut l = Layouter::new();
    l.solve(|s| {
        s.width(200.0);
        s.height(100.0);
    });
    let c = l.guides();
    let g = l.add("a", |s| {
        s.center_x_equal(c.center_x());
        s.center_y_equal(c.center_y());
        s.width(40.0);
        s.height(10.0);
    });
    assert_eq!(frame(&l, &g), Frame::new(80.0, 45.0, 40.0, 10.0));
}

#[test]
fn start_and_center_derive_size() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.left(10.0);
        s.center_x_equal(constant(30.0));
    });
    assert_eq!(frame(&l, &g).width, 40.0);
}

#[test]
fn single_pinned_edge_translates_other_edge_bounds_into_size() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.left(10.0);
        s.right_greater(constant(60.0));
    });
    assert_eq!(frame(&l, &g), Frame::new(10.0, 0.0, 50.0, 0.0));
}

#[test]
fn end_pinned_box_grows_from_width_bound() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.right_equal(constant(100.0));
        s.width_greater(constant(25.0));
    });
    assert_eq!(frame(&l, &g).x, 75.0);
}

#[test]
fn free_start_follows_edge_bounds() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.width(20.0);
        s.right_greater(constant(50.0));
        s.top_greater(constant(5.0));
    });
    let f = frame(&l, &g);
    assert_eq!(f.x, 30.0);
    assert_eq!(f.y, 5.0);
}

#[test]
fn equal_overrides_bounds() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.width(80.0);
        s.width_less(constant(50.0));
    });
    assert_eq!(frame(&l, &g).width, 80.0);
}

#[test]
fn bounds_may_reference_guides() {
    let mut l = Layouter::new();
    l.solve(|s| s.width(120.0));
    let c = l.guides();
    let g = l.add("a", |s| s.width_greater(c.width() - 20.0));
    assert_eq!(frame(&l, &g).width, 100.0);
}

#[test]
fn self_reference_resolves_per_attribute() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        let own = s.guides();
        s.left(10.0);
        s.width_equal(own.left() + 5.0);
        s.top_equal(own.left());
    });
    assert_eq!(frame(&l, &g), Frame::new(10.0, 10.0, 15.0, 0.0));
}

#[test]
fn container_can_size_to_children() {
    let mut l = Layouter::new();
    let c = l.guides();
    let a = l.add("a", |s| {
        s.left_equal(c.left() + 10.0);
        s.width(50.0);
    });
    l.solve(|s| s.width_equal(a.right() + 10.0));
    let r = l.resolve().unwrap();
    assert_eq!(r.container().width, 70.0);
    assert_eq!(r.frame(&a).unwrap().x, 10.0);
}

#[test]
fn constrain_reopens_existing_box() {
    let mut l = Layouter::new();
    let a = l.add("a", |s| s.width(10.0));
    let b = l.add("b", |s| s.width(20.0));
    l.constrain(&a, |s| s.left_equal(b.right())).unwrap();
    assert_eq!(frame(&l, &a).x, 20.0);
}

#[test]
fn constrain_rejects_foreign_guides() {
    let mut other: Layouter<&str> = Layouter::new();
    let foreign = other.add("x", |_| {});
    let mut l: Layouter<&str> = Layouter::new();
    let err = l.constrain(&foreign, |s| s.width(1.0)).unwrap_err();
    assert!(matches!(err, LayoutError::DanglingGuide { .. }));
}

#[test]
fn stale_guide_from_previous_rebuild_is_dangling() {
    let mut previous: Layouter<&str> = Layouter::new();
    let stale = previous.add("a", |_| {});

    let mut l = Layouter::new();
    l.add("a", |s| s.top_equal(stale.bottom()));
    let err = l.resolve().unwrap_err();
    match err {
        LayoutError::DanglingGuide { guide } => assert_eq!(guide, stale.bottom()),
        other => panic!("unexpected error {other}"),
    }
    assert!(!l.owns(stale.bottom()));
    assert!(l.owns(l.max_guide().width()));
    assert!(l.owns(l.guides().width()));
}

#[test]
fn duplicate_equal_on_derived_attribute_is_rejected() {
    let mut l = Layouter::new();
    l.add("a", |s| {
        s.right_equal(constant(1.0));
        s.right_equal(constant(1.0));
    });
    assert!(matches!(
        l.resolve().unwrap_err(),
        LayoutError::DuplicateEqual { .. }
    ));
}

#[test]
fn disagreeing_edges_are_overconstrained() {
    let mut l = Layouter::new();
    l.add("a", |s| {
        s.left(0.0);
        s.width(10.0);
        s.right_equal(constant(20.0));
    });
    match l.resolve().unwrap_err() {
        LayoutError::Overconstrained {
            constraint,
            expected,
            actual,
        } => {
            assert_eq!(constraint, "box#0.right == 20");
            assert_eq!(expected, 20.0);
            assert_eq!(actual, 10.0);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn agreeing_redundant_edges_resolve() {
    let mut l = Layouter::new();
    let g = l.add("a", |s| {
        s.left(0.0);
        s.width(10.0);
        s.right_equal(constant(10.0 + 1e-9));
        s.center_x_equal(constant(5.0));
    });
    assert_eq!(frame(&l, &g).width, 10.0);
}

#[test]
fn inverted_edges_are_overconstrained() {
    let mut l = Layouter::new();
    l.add("a", |s| {
        s.left(50.0);
        s.right_equal(constant(10.0));
    });
    assert!(matches!(
        l.resolve().unwrap_err(),
        LayoutError::Overconstrained { .. }
    ));
}

#[test]
fn self_cycle_is_detected() {
    let mut l = Layouter::new();
    l.add("a", |s| {
        let own = s.guides();
        s.left_equal(own.right());
    });
    assert!(matches!(l.resolve().unwrap_err(), LayoutError::Cycle { .. }));
}

#[test]
fn container_fills_offered_width() {
    let mut l: Layouter<&str> = Layouter::with_max(Size::new(320.0, 480.0));
    let max = l.max_guide();
    l.solve(|s| {
        s.height(50.0);
        s.width_equal(max.width());
    });
    let r = l.resolve().unwrap();
    assert_eq!(r.container(), Frame::new(0.0, 0.0, 320.0, 50.0));
    assert_eq!(r.available(), Frame::new(0.0, 0.0, 320.0, 480.0));
}

#[test]
fn max_guide_is_not_narrowed_by_container_constraints() {
    let mut l = Layouter::with_max(Size::new(300.0, 600.0));
    let max = l.max_guide();
    l.solve(|s| s.height(100.0));
    let g = l.add("a", |s| {
        s.width_less(max.width());
        s.width_greater(constant(1000.0));
        s.height_equal(max.height() - 64.0);
    });
    let r = l.resolve().unwrap();
    assert_eq!(r.container().height, 100.0);
    // crossed bounds: the lower one wins
    assert_eq!(r.frame(&g).unwrap().width, 1000.0);
    assert_eq!(r.frame(&g).unwrap().height, 536.0);
}

#[test]
fn max_guide_defaults_to_zero_without_input() {
    let mut l: Layouter<&str> = Layouter::new();
    let max = l.max_guide();
    l.solve(|s| s.width_equal(max.width()));
    assert_eq!(l.max(), None);
    assert_eq!(l.resolve().unwrap().container().width, 0.0);
}

#[test]
fn available_space_cannot_be_constrained() {
    let mut l: Layouter<&str> = Layouter::with_max(Size::new(10.0, 10.0));
    let max = l.max_guide();
    let err = l.constrain(&max, |s| s.width(1.0)).unwrap_err();
    assert!(matches!(err, LayoutError::Validation(_)));
    assert_eq!(l.max(), Some(Size::new(10.0, 10.0)));
}
