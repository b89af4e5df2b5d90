use std::collections::BTreeMap;

use crate::foundation::error::{LayoutError, LayoutResult};
use crate::layout::constraint::Relation;
use crate::layout::guide::{Attribute, Expr, Guides, constant};
use crate::layout::layouter::Layouter;
use crate::program::model::{
    ConstraintDef, LayoutProgram, NamedFrame, ResolvedProgram, ValueDef,
};

/// Reserved name for the container's guides inside a program.
pub const CONTAINER_NAME: &str = "container";

/// Reserved name for the guides of the space offered to the container.
pub const MAX_NAME: &str = "max";

/// Guides visible to the constraint being lowered.
struct Scope {
    guides: BTreeMap<String, Guides>,
}

impl Scope {
    fn lookup(&self, path: &str) -> LayoutResult<Expr> {
        let Some((name, attr)) = path.rsplit_once('.') else {
            return Err(LayoutError::validation(format!(
                "guide '{path}' must be written as '<box>.<attribute>'"
            )));
        };
        let Some(attribute) = Attribute::from_name(attr) else {
            return Err(LayoutError::validation(format!(
                "unknown attribute '{attr}' in guide '{path}'"
            )));
        };
        let Some(guides) = self.guides.get(name) else {
            return Err(LayoutError::validation(format!(
                "unknown box '{name}' in guide '{path}' (only earlier boxes, '{CONTAINER_NAME}' and '{MAX_NAME}' are visible)"
            )));
        };
        Ok(guides.get(attribute).into())
    }

    fn lower(&self, c: &ConstraintDef) -> LayoutResult<(Attribute, Relation, Expr)> {
        let expr = match &c.value {
            ValueDef::Const(v) => constant(*v),
            ValueDef::Guide { guide, offset } => self.lookup(guide)? + *offset,
        };
        Ok((c.attribute, c.relation, expr))
    }

    fn lower_all(&self, defs: &[ConstraintDef]) -> LayoutResult<Vec<(Attribute, Relation, Expr)>> {
        defs.iter().map(|c| self.lower(c)).collect()
    }
}

/// Build a layouter whose views are the box names, in program order.
///
/// A box may reference the container, the offered space, earlier boxes and itself.
/// Container constraints are registered last and may reference any box.
pub fn build_layouter(program: &LayoutProgram) -> LayoutResult<Layouter<String>> {
    let mut layouter = match program.max {
        Some(max) => Layouter::with_max(max),
        None => Layouter::new(),
    };
    let mut scope = Scope {
        guides: BTreeMap::new(),
    };
    scope
        .guides
        .insert(CONTAINER_NAME.to_owned(), layouter.guides());
    scope.guides.insert(MAX_NAME.to_owned(), layouter.max_guide());

    for def in &program.boxes {
        if def.name.is_empty() || def.name.contains('.') {
            return Err(LayoutError::validation(format!(
                "invalid box name '{}'",
                def.name
            )));
        }
        if def.name == CONTAINER_NAME || def.name == MAX_NAME {
            return Err(LayoutError::validation(format!(
                "box name '{}' is reserved",
                def.name
            )));
        }
        if scope.guides.contains_key(&def.name) {
            return Err(LayoutError::validation(format!(
                "duplicate box name '{}'",
                def.name
            )));
        }
        let guides = layouter.add(def.name.clone(), |_| {});
        scope.guides.insert(def.name.clone(), guides);

        let lowered = scope.lower_all(&def.constraints)?;
        layouter.constrain(&guides, |s| {
            for (attribute, relation, expr) in lowered {
                s.constrain(attribute, relation, expr);
            }
        })?;
    }

    let lowered = scope.lower_all(&program.container.constraints)?;
    layouter.solve(|s| {
        for (attribute, relation, expr) in lowered {
            s.constrain(attribute, relation, expr);
        }
    });
    Ok(layouter)
}

#[tracing::instrument(skip(program), fields(boxes = program.boxes.len()))]
pub fn resolve_program(program: &LayoutProgram) -> LayoutResult<ResolvedProgram> {
    let layouter = build_layouter(program)?;
    let resolution = layouter.resolve()?;
    let boxes = layouter
        .views()
        .zip(resolution.frames())
        .map(|(name, frame)| NamedFrame {
            name: name.clone(),
            frame,
        })
        .collect();
    Ok(ResolvedProgram {
        max: program.max.map(|_| resolution.available()),
        container: resolution.container(),
        boxes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/program/build.rs"]
mod tests;
