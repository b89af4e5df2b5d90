use super::*;
use crate::layout::guide::{Attribute, BoxId, LayouterTag};

fn guide(idx: u32, attribute: Attribute) -> Guide {
    Guide::new(LayouterTag::for_tests(7), BoxId::child(idx), attribute)
}

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayoutError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayoutError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        LayoutError::DuplicateEqual {
            guide: guide(0, Attribute::Top)
        }
        .to_string()
        .contains("duplicate equal constraint on box#0.top")
    );
}

#[test]
fn cycle_renders_path() {
    let err = LayoutError::Cycle {
        path: vec![
            guide(0, Attribute::Left),
            guide(1, Attribute::Right),
            guide(0, Attribute::Left),
        ],
    };
    assert_eq!(
        err.to_string(),
        "dependency cycle: box#0.left -> box#1.right -> box#0.left"
    );
}

#[test]
fn configuration_kinds_are_classified() {
    assert!(
        LayoutError::DanglingGuide {
            guide: guide(3, Attribute::Width)
        }
        .is_configuration()
    );
    assert!(!LayoutError::validation("x").is_configuration());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
