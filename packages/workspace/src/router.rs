//! # Mode Router
//!
//! Front door for instruction-driven edits. An instruction is classified
//! (unless the caller forces a mode) and either parsed into a diff and
//! applied locally, or handed to a [`Rewriter`] whose replacement schema is
//! validated before it is committed.

use crate::config::WorkspaceConfig;
use crate::rewrite::{clean_response, RewriteError, Rewriter};
use crate::store::{lock, SessionStore};
use crate::WorkspaceError;
use refine_classifier::{classify, Classification, Mode};
use refine_editor::{
    apply_diff, Diff, EditSession, HistoryEntry, HistorySummary, InstructionParser,
    NO_OPERATION_WARNING,
};
use refine_generator::{Generation, GenerationContext, SchemaGenerator};
use refine_linter::{lint_schema, DiagnosticLevel, LintOptions};
use refine_schema::{resolve_layout_conflicts, Schema};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of one routed instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyOutcome {
    /// Mode that produced `schema`
    pub mode: Mode,

    /// Auto-routed to fast, then handed to the rewriter
    pub escalated: bool,

    /// Absent when the caller forced the mode
    pub classification: Option<Classification>,

    /// The parsed diff, for fast-mode attempts
    pub diff: Option<Diff>,

    pub schema: Schema,
    pub log: Vec<String>,
    pub warnings: Vec<String>,

    /// Whether a new version was committed
    pub committed: bool,
}

pub struct Workspace {
    config: WorkspaceConfig,
    generator: SchemaGenerator,
    parser: InstructionParser,
    sessions: SessionStore,
}

impl Workspace {
    /// Workspace configured from `refine.config.json` in `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let dir = dir.as_ref();
        let config = WorkspaceConfig::load(dir)?;
        Ok(Self::with_config(config, dir))
    }

    /// Library paths in `config` resolve against `base`
    pub fn with_config(config: WorkspaceConfig, base: &Path) -> Self {
        let library = config.component_library(base);
        let scenarios = config.scenario_library(base);
        Self {
            sessions: SessionStore::new(config.max_history, config.max_undo_levels),
            parser: InstructionParser::new(library.clone()),
            generator: SchemaGenerator::new(library, scenarios),
            config,
        }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn create_session(&self) -> String {
        self.sessions.create()
    }

    pub fn close_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id)
    }

    /// Generate the initial schema for a session, replacing whatever it held
    pub fn generate(
        &self,
        session_id: &str,
        context: &GenerationContext,
    ) -> Result<Generation, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let mut context = context.clone();
        if context.scenario_id.is_none() {
            context.scenario_id = self.config.default_scenario.clone();
        }

        let generation = self.generator.generate(&context);
        lock(&session).load(generation.schema.clone());
        Ok(generation)
    }

    /// Load an existing schema into a session
    pub fn load(&self, session_id: &str, schema: Schema) -> Result<(), WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        lock(&session).load(schema);
        Ok(())
    }

    pub fn current(&self, session_id: &str) -> Result<Schema, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let schema = lock(&session).current()?.clone();
        Ok(schema)
    }

    /// Route one instruction and commit its result
    pub fn modify(
        &self,
        session_id: &str,
        instruction: &str,
        force_mode: Option<Mode>,
        rewriter: &dyn Rewriter,
    ) -> Result<ModifyOutcome, WorkspaceError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(WorkspaceError::EmptyInstruction);
        }

        let session = self.sessions.get(session_id)?;
        let mut session = lock(&session);
        let current = session.current()?.clone();

        let classification = match force_mode {
            Some(_) => None,
            None => Some(classify(instruction)),
        };
        let mode = force_mode
            .or(classification.as_ref().map(|c| c.mode))
            .unwrap_or(Mode::Full);
        info!(session_id, mode = %mode, forced = force_mode.is_some(), "Routing instruction");

        if mode == Mode::Full {
            return self.rewrite(&mut session, &current, instruction, rewriter, classification, None);
        }

        let parsed = self.parser.parse(instruction, &current);
        if parsed.diff.is_empty() {
            if force_mode.is_none() && self.config.auto_escalate {
                info!(session_id, "Fast mode found nothing to do, escalating to full mode");
                let mut outcome = self.rewrite(
                    &mut session,
                    &current,
                    instruction,
                    rewriter,
                    classification,
                    Some(parsed.diff),
                )?;
                outcome.escalated = true;
                let mut warnings = parsed.warnings;
                warnings.append(&mut outcome.warnings);
                outcome.warnings = warnings;
                return Ok(outcome);
            }

            let mut warnings = parsed.warnings;
            warnings.push(NO_OPERATION_WARNING.to_string());
            return Ok(ModifyOutcome {
                mode: Mode::Fast,
                escalated: false,
                classification,
                diff: Some(parsed.diff),
                schema: current,
                log: Vec::new(),
                warnings,
                committed: false,
            });
        }

        let result = apply_diff(&current, &parsed.diff);
        session.commit(result.schema.clone(), instruction, Mode::Fast, None)?;

        let mut warnings = parsed.warnings;
        warnings.extend(result.warnings);
        Ok(ModifyOutcome {
            mode: Mode::Fast,
            escalated: false,
            classification,
            diff: Some(parsed.diff),
            schema: result.schema,
            log: result.log,
            warnings,
            committed: true,
        })
    }

    fn rewrite(
        &self,
        session: &mut EditSession,
        current: &Schema,
        instruction: &str,
        rewriter: &dyn Rewriter,
        classification: Option<Classification>,
        diff: Option<Diff>,
    ) -> Result<ModifyOutcome, WorkspaceError> {
        let raw = rewriter.rewrite(instruction, current).map_err(|e| {
            warn!(rewriter = rewriter.name(), error = %e, "Rewrite failed");
            WorkspaceError::from(e)
        })?;

        let cleaned = clean_response(&raw);
        if cleaned.is_empty() {
            warn!(rewriter = rewriter.name(), "Rewrite returned nothing");
            return Err(RewriteError::EmptyResponse.into());
        }

        let mut schema = validate_rewrite(cleaned)?;
        let log: Vec<String> = resolve_layout_conflicts(&mut schema)
            .iter()
            .map(|adjustment| adjustment.to_string())
            .collect();
        let warnings: Vec<String> = lint_schema(&schema, LintOptions::default())
            .iter()
            .map(|diagnostic| diagnostic.to_string())
            .collect();

        schema.version = current.version + 1;
        if schema.task_id.is_none() {
            schema.task_id = current.task_id.clone();
        }
        schema.metadata.last_updated_at = Some(chrono::Utc::now().to_rfc3339());

        session.commit(schema.clone(), instruction, Mode::Full, Some(rewriter.name()))?;
        debug!(version = schema.version, adjustments = log.len(), "Committed rewrite");

        Ok(ModifyOutcome {
            mode: Mode::Full,
            escalated: false,
            classification,
            diff,
            schema,
            log,
            warnings,
            committed: true,
        })
    }

    pub fn undo(&self, session_id: &str) -> Result<Schema, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let schema = lock(&session).pop_undo()?.clone();
        Ok(schema)
    }

    pub fn redo(&self, session_id: &str) -> Result<Schema, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let schema = lock(&session).redo()?.clone();
        Ok(schema)
    }

    pub fn history(&self, session_id: &str) -> Result<Vec<HistorySummary>, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let summaries = lock(&session).history_summaries();
        Ok(summaries)
    }

    pub fn history_entry(
        &self,
        session_id: &str,
        entry_id: &str,
    ) -> Result<HistoryEntry, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let entry = lock(&session)
            .history_entry(entry_id)
            .cloned()
            .ok_or_else(|| refine_editor::EditorError::UnknownHistoryEntry(entry_id.to_string()))?;
        Ok(entry)
    }

    pub fn revert(&self, session_id: &str, entry_id: &str) -> Result<Schema, WorkspaceError> {
        let session = self.sessions.get(session_id)?;
        let schema = lock(&session).revert(entry_id)?.clone();
        Ok(schema)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::with_config(WorkspaceConfig::default(), Path::new("."))
    }
}

/// Parse and lint a cleaned rewrite reply; any error-level diagnostic rejects it
fn validate_rewrite(cleaned: &str) -> Result<Schema, WorkspaceError> {
    let schema = Schema::from_json(cleaned)
        .map_err(|e| WorkspaceError::InvalidRewrite(format!("not a schema: {}", e)))?;

    let errors: Vec<String> = lint_schema(&schema, LintOptions::default())
        .into_iter()
        .filter(|diagnostic| diagnostic.level == DiagnosticLevel::Error)
        .map(|diagnostic| diagnostic.message)
        .collect();
    if !errors.is_empty() {
        return Err(WorkspaceError::InvalidRewrite(errors.join("; ")));
    }

    Ok(schema)
}
