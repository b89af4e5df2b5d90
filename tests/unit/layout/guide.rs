use super::*;

fn guides() -> Guides {
    Guides::new(LayouterTag::for_tests(1), BoxId::child(1))
}

#[test]
fn offsets_compose_additively() {
    let g = guides().bottom();
    assert_eq!((g + 3.0) + 4.0, g + 7.0);
    assert_eq!((g - 2.0) + 2.0, Expr::from(g));
}

#[test]
fn constant_has_no_guide() {
    let e = constant(12.5);
    assert_eq!(e.guide(), None);
    assert_eq!(e.offset(), 12.5);
    assert_eq!(Expr::from(12.5), e);
}

#[test]
fn display_names_box_and_attribute() {
    let g = guides();
    assert_eq!(g.center_x().to_string(), "box#1.center_x");
    assert_eq!((g.right() + 4.0).to_string(), "box#1.right + 4");
    assert_eq!((g.right() - 4.0).to_string(), "box#1.right - 4");
    assert_eq!(constant(3.0).to_string(), "3");

    let container = Guides::new(LayouterTag::for_tests(1), BoxId::CONTAINER);
    assert_eq!(container.width().to_string(), "container.width");
    let max = Guides::new(LayouterTag::for_tests(1), BoxId::AVAILABLE);
    assert_eq!(max.height().to_string(), "max.height");
}

#[test]
fn attributes_map_to_axis_and_role() {
    for a in Attribute::ALL {
        assert_eq!(Attribute::of(a.axis(), a.role()), a);
        assert_eq!(Attribute::from_name(a.name()), Some(a));
        assert_eq!(Attribute::ALL[a.index()], a);
    }
    assert!(Attribute::Width.is_primary());
    assert!(!Attribute::CenterY.is_primary());
    assert_eq!(Role::Center.coefficient(), Some(0.5));
    assert_eq!(Role::Size.coefficient(), None);
}

#[test]
fn box_ids_reserve_container_and_available_space() {
    assert!(BoxId::CONTAINER.is_container());
    assert_eq!(BoxId::CONTAINER.child_index(), None);
    assert_eq!(BoxId::AVAILABLE.child_index(), None);
    assert!(BoxId::AVAILABLE.is_available());
    assert!(!BoxId::AVAILABLE.is_container());
    assert_eq!(BoxId::child(0).child_index(), Some(0));
    assert!(!BoxId::child(0).is_container());
    assert!(BoxId::child(0) > BoxId::AVAILABLE);
}

#[test]
fn tags_are_unique() {
    assert_ne!(LayouterTag::next(), LayouterTag::next());
}
