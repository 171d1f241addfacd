//! # Diffs
//!
//! A [`Diff`] is the structured reading of one instruction: an intent, a
//! scope and an ordered list of [`Operation`]s. Diffs are plain data so they
//! can be stored in history and shipped as JSON.

use refine_schema::{Component, StyleMap};
use serde::{Deserialize, Serialize};

/// Which components an update reaches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Only the resolved component
    #[default]
    CurrentPage,
    /// Every component sharing the resolved component's role, on any page
    SameRoleAcrossPages,
}

/// What the instruction asks for; exactly one per instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Add,
    Remove,
    Move,
    Resize,
    Update,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Add => "add",
            Intent::Remove => "remove",
            Intent::Move => "move",
            Intent::Resize => "resize",
            Intent::Update => "update",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural edit applied by the diff applier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Operation {
    /// Append a component to a section, named by id or role
    #[serde(rename_all = "camelCase")]
    AddNode {
        target_section_id: String,
        component: Component,
        #[serde(default)]
        page_id: Option<String>,
    },

    /// Remove the first component with this id
    #[serde(rename_all = "camelCase")]
    RemoveNode {
        component_id: String,
        #[serde(default)]
        page_id: Option<String>,
    },

    /// Move, resize or restyle a component
    #[serde(rename_all = "camelCase")]
    UpdateProps {
        component_id: String,
        changes: PropChanges,
    },

    /// Put a section's children in the given order, unnamed ones last
    #[serde(rename_all = "camelCase")]
    ReorderChildren {
        section_id: String,
        new_order: Vec<String>,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddNode { .. } => "AddNode",
            Operation::RemoveNode { .. } => "RemoveNode",
            Operation::UpdateProps { .. } => "UpdateProps",
            Operation::ReorderChildren { .. } => "ReorderChildren",
        }
    }
}

/// Partial changes carried by [`Operation::UpdateProps`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropChanges {
    /// Destination section id or role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_section_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutChange>,

    /// Shallow-merged into the component style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutChange {
    pub col_span_delta: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    #[serde(default)]
    pub scope: Scope,

    /// Absent for diffs not produced by the parser
    #[serde(default)]
    pub intent: Option<Intent>,

    #[serde(default)]
    pub operations: Vec<Operation>,

    /// The instruction text the diff was read from
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub page_id: Option<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_wire_shape() {
        let op = Operation::UpdateProps {
            component_id: "KPIOverview_1a2b".to_string(),
            changes: PropChanges {
                layout: Some(LayoutChange { col_span_delta: -2 }),
                ..PropChanges::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "op": "UpdateProps",
                "componentId": "KPIOverview_1a2b",
                "changes": {"layout": {"colSpanDelta": -2}}
            })
        );
    }

    #[test]
    fn test_diff_from_external_json() {
        let diff: Diff = serde_json::from_value(json!({
            "scope": "same_role_across_pages",
            "operations": [
                {"op": "ReorderChildren", "sectionId": "plan_main_2", "newOrder": ["b", "a"]},
                {"op": "RemoveNode", "componentId": "a"}
            ]
        }))
        .unwrap();
        assert_eq!(diff.scope, Scope::SameRoleAcrossPages);
        assert_eq!(diff.intent, None);
        assert_eq!(diff.operations[1].name(), "RemoveNode");
    }
}
