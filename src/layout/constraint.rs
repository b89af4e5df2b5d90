use std::fmt;

use crate::layout::guide::{Attribute, BoxId, Expr, Guide};

/// How a constrained attribute relates to its expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Relation {
    #[serde(rename = "eq")]
    Equal,
    #[serde(rename = "le")]
    AtMost,
    #[serde(rename = "ge")]
    AtLeast,
}

impl Relation {
    fn symbol(self) -> &'static str {
        match self {
            Relation::Equal => "==",
            Relation::AtMost => "<=",
            Relation::AtLeast => ">=",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraint {
    pub attribute: Attribute,
    pub relation: Relation,
    pub expr: Expr,
}

impl Constraint {
    /// Render with the owning box spelled out, e.g. `box#2.top == box#1.bottom + 8`.
    pub fn describe(&self, owner: BoxId) -> String {
        format!(
            "{owner}.{} {} {}",
            self.attribute,
            self.relation.symbol(),
            self.expr
        )
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.attribute,
            self.relation.symbol(),
            self.expr
        )
    }
}

/// Constraint record of one box, in registration order.
#[derive(Clone, Debug)]
pub struct BoxSpec {
    id: BoxId,
    constraints: Vec<Constraint>,
}

impl BoxSpec {
    pub(crate) fn new(id: BoxId) -> Self {
        Self {
            id,
            constraints: Vec::new(),
        }
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub(crate) fn push(&mut self, c: Constraint) {
        self.constraints.push(c);
    }

    /// First `Equal` registered on `attribute`.
    pub fn equal(&self, attribute: Attribute) -> Option<Expr> {
        self.constraints
            .iter()
            .find(|c| c.attribute == attribute && c.relation == Relation::Equal)
            .map(|c| c.expr)
    }

    pub fn bounds(&self, attribute: Attribute) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints
            .iter()
            .filter(move |c| c.attribute == attribute && c.relation != Relation::Equal)
    }

    /// Attribute pinned twice by `Equal`, if any.
    pub(crate) fn duplicate_equal(&self) -> Option<Attribute> {
        let mut seen = [false; Attribute::COUNT];
        for c in &self.constraints {
            if c.relation != Relation::Equal {
                continue;
            }
            let slot = &mut seen[c.attribute.index()];
            if *slot {
                return Some(c.attribute);
            }
            *slot = true;
        }
        None
    }

    /// Every guide referenced by any constraint of this box.
    pub(crate) fn referenced_guides(&self) -> impl Iterator<Item = Guide> + '_ {
        self.constraints.iter().filter_map(|c| c.expr.guide())
    }
}
