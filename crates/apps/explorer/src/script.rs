//! Recorded input scripts for headless replay.
//!
//! A script is a JSON array of timestamped steps:
//!
//! ```json
//! [
//!   { "at_ms": 0,   "input": { "type": "pointer_down", "x": 400, "y": 300 } },
//!   { "at_ms": 40,  "input": { "type": "pointer_up", "x": 400, "y": 300 } },
//!   { "at_ms": 100, "input": { "type": "category_press", "category": "funny" } },
//!   { "at_ms": 180, "input": { "type": "category_release" } }
//! ]
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use catalog::Category;
use foundation::time::Time;
use serde::{Deserialize, Serialize};

/// One host event delivered to a session.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerLeave,
    Wheel { delta_y: f64 },
    CategoryPress { category: Category },
    CategoryRelease,
    /// Pointer left a category control mid-press.
    CategoryCancel,
    /// Timer tick; advances any live hold.
    Tick,
    Resize { width: f64, height: f64 },
    Reset,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: f64,
    pub input: Input,
}

impl ScriptStep {
    pub fn time(&self) -> Time {
        Time::from_millis(self.at_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

#[derive(Debug)]
pub enum ScriptError {
    Io(String),
    Parse(String),
    /// Timestamps must be finite and must not decrease.
    OutOfOrder { step: usize, at_ms: f64 },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(msg) => write!(f, "script io error: {msg}"),
            ScriptError::Parse(msg) => write!(f, "script parse error: {msg}"),
            ScriptError::OutOfOrder { step, at_ms } => {
                write!(f, "script step {step} is out of order (at_ms={at_ms})")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

impl Script {
    pub fn new(steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        let mut previous = f64::NEG_INFINITY;
        for (step, s) in steps.iter().enumerate() {
            if !s.at_ms.is_finite() || s.at_ms < previous {
                return Err(ScriptError::OutOfOrder {
                    step,
                    at_ms: s.at_ms,
                });
            }
            previous = s.at_ms;
        }
        Ok(Self { steps })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        let steps: Vec<ScriptStep> =
            serde_json::from_str(json).map_err(|e| ScriptError::Parse(e.to_string()))?;
        Self::new(steps)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
