/// Label modifiers consulted after the static label table

pub mod jlist;

pub use jlist::JlistModifier;

use serde::{Deserialize, Serialize};

use crate::parser::FieldMap;

pub trait LabelModifier: Send + Sync {
    /// Replacement label for this record, or `None` to leave it alone.
    fn modify_label(&self, message_id: &str, fields: &FieldMap) -> Option<String>;

    fn name(&self) -> &'static str;
}

/// Modifiers that can be registered from configuration, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// JLIST (DC-JUST block/detect lists)
    Jlist,
}

impl ModifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKind::Jlist => "jlist",
        }
    }

    pub fn build(&self) -> Box<dyn LabelModifier> {
        match self {
            ModifierKind::Jlist => Box::new(JlistModifier),
        }
    }
}
