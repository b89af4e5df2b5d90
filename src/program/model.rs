use serde::{Deserialize, Serialize};

use crate::foundation::core::{Frame, Size};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::layout::constraint::Relation;
use crate::layout::guide::Attribute;

/// Declarative constraint program: the container plus an ordered list of named boxes.
///
/// `max` is the space offered to the container, visible to constraints as `max.<attr>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutProgram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Size>,
    #[serde(default)]
    pub container: ContainerDef,
    #[serde(default)]
    pub boxes: Vec<BoxDef>,
}

impl LayoutProgram {
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        serde_json::from_str(s).map_err(|e| LayoutError::serde(e.to_string()))
    }

    pub fn to_json_string(&self) -> LayoutResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LayoutError::serde(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerDef {
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxDef {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintDef {
    pub attribute: Attribute,
    #[serde(default = "default_relation")]
    pub relation: Relation,
    pub value: ValueDef,
}

fn default_relation() -> Relation {
    Relation::Equal
}

/// Right-hand side of a constraint.
///
/// Accepts a number (`12`), a guide path (`"header.bottom"`), or an object
/// (`{ "guide": "header.bottom", "offset": 8 }`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueDef {
    Const(f64),
    Guide {
        guide: String,
        #[serde(skip_serializing_if = "is_zero")]
        offset: f64,
    },
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl<'de> Deserialize<'de> for ValueDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Path(String),
            Obj {
                guide: String,
                #[serde(default)]
                offset: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(Self::Const(v)),
            Repr::Path(guide) => Ok(Self::Guide { guide, offset: 0.0 }),
            Repr::Obj { guide, offset } => Ok(Self::Guide { guide, offset }),
        }
    }
}

/// Frame table produced by resolving a [`LayoutProgram`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProgram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Frame>,
    pub container: Frame,
    pub boxes: Vec<NamedFrame>,
}

impl ResolvedProgram {
    pub fn get(&self, name: &str) -> Option<Frame> {
        self.boxes.iter().find(|b| b.name == name).map(|b| b.frame)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFrame {
    pub name: String,
    pub frame: Frame,
}
