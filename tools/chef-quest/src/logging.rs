use crate::errors::QuestError;
use crate::fsm::QuestSession;
use crate::log_retention::{enforce_total_budget, rotate_if_needed};
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_DISK_BUDGET_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 2048;

pub const EVENT_TRANSITION: &str = "quest.transition";
pub const EVENT_FAULT: &str = "quest.fault";
pub const EVENT_CONTACT: &str = "contact.open";

#[derive(Debug, Clone)]
pub struct JsonlLogger {
    pub path: PathBuf,
    pub max_payload_bytes: usize,
    pub budget_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent<'a> {
    pub level: &'a str,
    pub event_type: &'a str,
    pub payload: Value,
}

impl JsonlLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            budget_bytes: DEFAULT_DISK_BUDGET_BYTES,
        }
    }

    pub fn append(&self, event: &LogEvent<'_>) -> Result<(), QuestError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| QuestError::Io(e.to_string()))?;
            }
        }
        let truncated = truncate_json(event.payload.clone(), self.max_payload_bytes);
        let line = serde_json::to_string(&LogEvent {
            level: event.level,
            event_type: event.event_type,
            payload: truncated,
        })
        .map_err(|e| QuestError::Io(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| QuestError::Io(e.to_string()))?;
        file.write_all(line.as_bytes())
            .map_err(|e| QuestError::Io(e.to_string()))?;
        file.write_all(b"\n")
            .map_err(|e| QuestError::Io(e.to_string()))?;

        drop(file);

        // Half the budget per file keeps the active log plus one rotation inside it.
        rotate_if_needed(&self.path, (self.budget_bytes / 2).max(1))?;
        enforce_total_budget(&self.path, self.budget_bytes)?;

        Ok(())
    }
}

pub fn structured_fallback_line(session: &QuestSession, message: &str) -> String {
    let recipe = session
        .selected_recipe
        .map(|index| index.to_string())
        .unwrap_or_else(|| "none".to_string());
    format!(
        "phase={} recipe={recipe} step={} message={} ",
        session.phase.as_str(),
        session.current_step,
        message.replace('\n', "\\n")
    )
}

fn truncate_json(value: Value, max_bytes: usize) -> Value {
    let rendered = serde_json::to_string(&value).unwrap_or_default();
    if rendered.len() <= max_bytes {
        return value;
    }
    let mut cut = max_bytes.saturating_sub(3);
    while cut > 0 && !rendered.is_char_boundary(cut) {
        cut -= 1;
    }
    let mut truncated = rendered;
    truncated.truncate(cut);
    Value::String(format!("{truncated}..."))
}
