use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use polyedit_editor::{
    Coordinate, EditSession, EditorConfig, RecordingSurface, Ring, RingEvent, RingId, ScreenPosition,
    TextField,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file holding a list of events
    pub script: PathBuf,

    /// Text the field holds when the session opens
    #[arg(short, long)]
    pub initial: Option<String>,

    /// Keep going after a step fails
    #[arg(long)]
    pub keep_going: bool,
}

/// One scripted gesture
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptStep {
    Created {
        path: Ring,
    },
    VertexSet {
        ring: RingId,
        index: usize,
        coordinate: Coordinate,
    },
    VertexInsert {
        ring: RingId,
        index: usize,
        coordinate: Coordinate,
    },
    VertexRemove {
        ring: RingId,
        index: usize,
    },
    DragEnd {
        ring: RingId,
        path: Ring,
    },
    Delete {
        ring: RingId,
        #[serde(default)]
        position: ScreenPosition,
    },
}

impl ScriptStep {
    fn label(&self) -> &'static str {
        match self {
            ScriptStep::Created { .. } => "created",
            ScriptStep::VertexSet { .. } => "vertex_set",
            ScriptStep::VertexInsert { .. } => "vertex_insert",
            ScriptStep::VertexRemove { .. } => "vertex_remove",
            ScriptStep::DragEnd { .. } => "drag_end",
            ScriptStep::Delete { .. } => "delete",
        }
    }

    fn into_action(self) -> Action {
        match self {
            ScriptStep::Created { path } => Action::Create(path),
            ScriptStep::VertexSet { ring, index, coordinate } => {
                Action::Dispatch(ring, RingEvent::VertexSet { index, coordinate })
            }
            ScriptStep::VertexInsert { ring, index, coordinate } => {
                Action::Dispatch(ring, RingEvent::VertexInsert { index, coordinate })
            }
            ScriptStep::VertexRemove { ring, index } => {
                Action::Dispatch(ring, RingEvent::VertexRemove { index })
            }
            ScriptStep::DragEnd { ring, path } => Action::Dispatch(ring, RingEvent::DragEnd { path }),
            ScriptStep::Delete { ring, position } => {
                Action::Dispatch(ring, RingEvent::DeleteRequested { position })
            }
        }
    }
}

enum Action {
    Create(Ring),
    Dispatch(RingId, RingEvent),
}

/// What happened at one step of a replay
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub label: &'static str,
    pub result: std::result::Result<String, String>,
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read script {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid script {}", path.display()))
}

/// Run steps against a fresh session, recording the field after each one
pub fn run_script(
    steps: Vec<ScriptStep>,
    initial: Option<&str>,
    config: EditorConfig,
    keep_going: bool,
) -> Vec<StepOutcome> {
    let field = initial.map(TextField::with_value).unwrap_or_default();
    let mut session = EditSession::new(RecordingSurface::new(), field, config);
    let mut outcomes = Vec::with_capacity(steps.len());

    for step in steps {
        let label = step.label();
        let result = match step.into_action() {
            Action::Create(ring) => {
                let id = session.on_polygon_created(ring);
                debug!(%id, "Scripted polygon created");
                Ok(())
            }
            Action::Dispatch(id, event) => session.dispatch(id, event).map(|_| ()),
        };

        let failed = result.is_err();
        outcomes.push(StepOutcome {
            label,
            result: result
                .map(|()| session.field().value().unwrap_or("").to_string())
                .map_err(|e| e.to_string()),
        });

        if failed && !keep_going {
            break;
        }
    }

    outcomes
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = EditorConfig::load(Path::new(cwd))?;
    let steps = load_script(&args.script)?;

    println!("▶ {} {}", "Replaying".green().bold(), args.script.display());
    println!("   Steps: {}", steps.len());
    println!();

    let outcomes = run_script(steps, args.initial.as_deref(), config, args.keep_going);
    let mut failures = 0;

    for (i, outcome) in outcomes.iter().enumerate() {
        match &outcome.result {
            Ok(text) => println!("   {} {:>3} {:<14} {}", "✓".green(), i + 1, outcome.label, text),
            Err(e) => {
                failures += 1;
                println!("   {} {:>3} {:<14} {}", "✗".red(), i + 1, outcome.label, e.as_str().red());
            }
        }
    }

    println!();
    if failures > 0 {
        return Err(anyhow::anyhow!("{} step(s) failed", failures));
    }

    println!("✨ {} Replay complete!", "Done".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(json: &str) -> Vec<ScriptStep> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let script = steps(
            r#"[
                { "event": "created", "path": [{ "lng": 0, "lat": 0 }, { "lng": 1, "lat": 0 }] },
                { "event": "vertex_set", "ring": 0, "index": 1, "coordinate": { "lng": 2, "lat": 0 } },
                { "event": "delete", "ring": 0 }
            ]"#,
        );

        assert_eq!(script.len(), 3);
        assert_eq!(script[2].label(), "delete");
    }

    #[test]
    fn test_run_script_records_text_after_each_step() {
        let script = steps(
            r#"[
                { "event": "created", "path": [{ "lng": 0, "lat": 0 }, { "lng": 1, "lat": 0 }] },
                { "event": "vertex_insert", "ring": 1, "index": 2, "coordinate": { "lng": 1, "lat": 1 } },
                { "event": "delete", "ring": 0 }
            ]"#,
        );

        let outcomes = run_script(script, Some("POLYGON((5 5))"), EditorConfig::default(), false);
        let texts: Vec<_> = outcomes.into_iter().map(|o| o.result.unwrap()).collect();

        assert_eq!(
            texts,
            vec![
                "POLYGON((5 5), (0 0,1 0))",
                "POLYGON((5 5), (0 0,1 0,1 1))",
                "POLYGON((0 0,1 0,1 1))",
            ]
        );
    }

    #[test]
    fn test_run_script_stops_on_failure() {
        let script = steps(
            r#"[
                { "event": "vertex_remove", "ring": 3, "index": 0 },
                { "event": "created", "path": [] }
            ]"#,
        );

        let outcomes = run_script(script.clone(), None, EditorConfig::default(), false);
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].result.is_err());

        let outcomes = run_script(script, None, EditorConfig::default(), true);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[1].result, Ok("POLYGON(())".to_string()));
    }
}
