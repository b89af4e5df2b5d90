use crate::layout::guide::Guide;

/// Convenience result type used across the resolver.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Error taxonomy for constraint registration, resolution and program loading.
///
/// The first four variants are configuration defects detected while resolving a
/// [`Layouter`](crate::Layouter). They are deterministic: resolving the same program
/// again fails the same way.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Two `Equal` constraints target the same attribute of the same box.
    #[error("duplicate equal constraint on {guide}")]
    DuplicateEqual {
        /// The attribute that was pinned twice.
        guide: Guide,
    },

    /// An `Equal` constraint disagrees with the value its box resolved to.
    #[error("overconstrained: {constraint} expects {expected} but resolved to {actual}")]
    Overconstrained {
        /// Rendered constraint, e.g. `box#1.right == box#0.left + 4`.
        constraint: String,
        /// Value demanded by the constraint's expression.
        expected: f64,
        /// Value the attribute resolved to.
        actual: f64,
    },

    /// The dependency graph has no valid evaluation order.
    #[error("dependency cycle: {}", render_path(.path))]
    Cycle {
        /// Attributes along one cycle; the first entry is repeated at the end.
        path: Vec<Guide>,
    },

    /// A guide refers to a box that does not belong to this layouter.
    #[error("dangling guide {guide}: box was not added to this layouter")]
    DanglingGuide {
        /// The offending guide.
        guide: Guide,
    },

    /// Invalid user-provided program data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error is one of the resolution-time configuration defects.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEqual { .. }
                | Self::Overconstrained { .. }
                | Self::Cycle { .. }
                | Self::DanglingGuide { .. }
        )
    }
}

fn render_path(path: &[Guide]) -> String {
    let mut s = String::new();
    for (i, g) in path.iter().enumerate() {
        if i > 0 {
            s.push_str(" -> ");
        }
        s.push_str(&g.to_string());
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
