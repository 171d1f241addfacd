//! # Grid Conflict Resolution
//!
//! Every section declares a column capacity (`layout.colSpan`, at most 12).
//! When the children's summed `colSpan` exceeds it, children are shrunk
//! largest-first, each by `min(overflow, max(1, span - 3))`, never below 3.
//! A section that still overflows once every child sits at the floor is
//! marked `scrollable` instead.

use crate::model::{Schema, Section};
use crate::visitor::VisitorMut;
use tracing::debug;

/// Smallest span a component is shrunk to during conflict resolution
pub const MIN_RESOLVED_SPAN: u32 = 3;

/// A change made while resolving a section overflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutAdjustment {
    Shrunk {
        section_id: String,
        component_id: String,
        from: u32,
        to: u32,
    },
    MarkedScrollable {
        section_id: String,
        overflow: u32,
    },
}

impl std::fmt::Display for LayoutAdjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutAdjustment::Shrunk {
                section_id,
                component_id,
                from,
                to,
            } => write!(
                f,
                "Shrunk {} in {} from {} to {} columns",
                component_id, section_id, from, to
            ),
            LayoutAdjustment::MarkedScrollable {
                section_id,
                overflow,
            } => write!(
                f,
                "Marked {} scrollable ({} columns over capacity)",
                section_id, overflow
            ),
        }
    }
}

/// Resolve overflow in every section of the schema
pub fn resolve_layout_conflicts(schema: &mut Schema) -> Vec<LayoutAdjustment> {
    let mut resolver = LayoutResolver::default();
    resolver.visit_schema_mut(schema);
    resolver.adjustments
}

#[derive(Default)]
struct LayoutResolver {
    adjustments: Vec<LayoutAdjustment>,
}

impl VisitorMut for LayoutResolver {
    fn visit_section_mut(&mut self, section: &mut Section) {
        self.adjustments.extend(resolve_section(section));
    }
}

/// Resolve overflow in a single section
pub fn resolve_section(section: &mut Section) -> Vec<LayoutAdjustment> {
    let mut adjustments = Vec::new();
    let limit = section.layout.col_span;
    let total = section.used_span();

    if total <= limit {
        section.layout.scrollable = false;
        return adjustments;
    }

    let mut overflow = total - limit;

    // Largest first; the sort is stable so equal spans keep document order
    let mut by_span: Vec<usize> = (0..section.components.len()).collect();
    by_span.sort_by(|&a, &b| {
        section.components[b]
            .layout
            .col_span
            .cmp(&section.components[a].layout.col_span)
    });

    for index in by_span {
        if overflow == 0 {
            break;
        }
        let component = &mut section.components[index];
        let current = component.layout.col_span;
        if current <= MIN_RESOLVED_SPAN {
            continue;
        }

        let deduction = overflow.min((current - MIN_RESOLVED_SPAN).max(1));
        let next = current.saturating_sub(deduction).max(MIN_RESOLVED_SPAN);
        component.layout.col_span = next;
        overflow -= current - next;

        debug!(
            section_id = %section.id,
            component_id = %component.id,
            from = current,
            to = next,
            "Shrunk component to fit section"
        );
        adjustments.push(LayoutAdjustment::Shrunk {
            section_id: section.id.clone(),
            component_id: component.id.clone(),
            from: current,
            to: next,
        });
    }

    if overflow > 0 {
        section.layout.scrollable = true;
        debug!(section_id = %section.id, overflow, "Section still overflows, marked scrollable");
        adjustments.push(LayoutAdjustment::MarkedScrollable {
            section_id: section.id.clone(),
            overflow,
        });
    } else {
        section.layout.scrollable = false;
    }

    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(capacity: u32, spans: &[u32]) -> Section {
        let components: Vec<_> = spans
            .iter()
            .enumerate()
            .map(|(i, span)| json!({"id": format!("c{}", i), "layout": {"colSpan": span}}))
            .collect();
        serde_json::from_value(json!({
            "id": "s",
            "role": "main",
            "layout": {"colSpan": capacity},
            "components": components
        }))
        .unwrap()
    }

    fn spans(section: &Section) -> Vec<u32> {
        section.components.iter().map(|c| c.layout.col_span).collect()
    }

    #[test]
    fn test_fitting_section_untouched() {
        let mut s = section(12, &[6, 6]);
        assert!(resolve_section(&mut s).is_empty());
        assert_eq!(spans(&s), vec![6, 6]);
        assert!(!s.layout.scrollable);
    }

    #[test]
    fn test_shrinks_largest_first() {
        let mut s = section(8, &[4, 8]);
        let adjustments = resolve_section(&mut s);
        // overflow 4: the 8 gives min(4, 5) = 4
        assert_eq!(spans(&s), vec![4, 4]);
        assert_eq!(adjustments.len(), 1);
        assert!(!s.layout.scrollable);
    }

    #[test]
    fn test_shrink_spreads_over_children() {
        let mut s = section(8, &[6, 6, 4]);
        resolve_section(&mut s);
        // overflow 8: 6→3 (3), 6→3 (3), 4→3 (1), still 1 over
        assert_eq!(spans(&s), vec![3, 3, 3]);
        assert!(s.layout.scrollable);
    }

    #[test]
    fn test_floor_reached_marks_scrollable() {
        let mut s = section(4, &[3, 3, 3]);
        let adjustments = resolve_section(&mut s);
        assert_eq!(spans(&s), vec![3, 3, 3]);
        assert!(s.layout.scrollable);
        assert!(matches!(
            adjustments.last(),
            Some(LayoutAdjustment::MarkedScrollable { overflow: 5, .. })
        ));
    }

    #[test]
    fn test_small_components_never_grow() {
        let mut s = section(4, &[2, 6]);
        resolve_section(&mut s);
        assert_eq!(spans(&s), vec![2, 3]);
        assert!(s.layout.scrollable);
    }

    #[test]
    fn test_fit_clears_stale_scrollable() {
        let mut s = section(12, &[4]);
        s.layout.scrollable = true;
        resolve_section(&mut s);
        assert!(!s.layout.scrollable);
    }
}
