//! # Refine Schema
//!
//! The document model edited by Refine: pages of sections of components laid
//! out on a 12-column grid, plus the priority-ordered info queue the UI is
//! meant to surface.
//!
//! Also home to the read-only template inputs (component library, scenario
//! templates, personas) with their built-in defaults, deterministic id
//! generation, and grid conflict resolution shared by generation and diff
//! application.

mod error;
mod id_generator;
mod layout;
mod library;
mod model;
pub mod visitor;

pub use error::SchemaError;
pub use id_generator::{seed_hash, IdGenerator};
pub use layout::{resolve_layout_conflicts, resolve_section, LayoutAdjustment, MIN_RESOLVED_SPAN};
pub use library::{
    ComponentLibrary, ComponentTemplate, Persona, ScenarioLibrary, ScenarioTemplate,
    SectionTemplate, StageTemplate,
};
pub use model::{
    Bindings, Component, ComponentLayout, ComponentPath, InfoItem, MetaMap, Page, Schema,
    SchemaMetadata, Section, SectionLayout, SectionPath, SectionRole, StagePlanEntry, StyleMap,
    DEFAULT_COMPONENT_SPAN, GRID_COLUMNS,
};
