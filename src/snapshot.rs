//! Saving what was entered so it survives a restart.

use crate::{Brain, Evaluation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("unable to access snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("malformed snapshot: {0}")]
    Format(#[from] serde_json::Error),
}

/// A [`Brain`]'s program, as stored on disk
///
/// Variable values are not part of a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub program: Vec<String>,
}

impl Snapshot {
    pub fn capture(brain: &Brain) -> Self {
        Self {
            program: brain.program(),
        }
    }

    /// Replace the brain's stack with this program, see [`Brain::restore`]
    pub fn apply(&self, brain: &mut Brain) -> Evaluation {
        brain.restore(&self.program)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), entries = snapshot.program.len(), "snapshot loaded");
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), entries = self.program.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rpncalc-{}-{name}.json", std::process::id()))
    }

    fn sample() -> Brain {
        let mut brain = Brain::new();
        brain.push_operand(2.0);
        brain.push_operand(3.0);
        brain.perform_operation("+");
        brain.push_operand(0.1);
        brain.perform_operation("*");
        brain.perform_operation("π");
        brain
    }

    #[test]
    fn json() {
        let snapshot = Snapshot::capture(&sample());
        let text = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(text, r#"{"program":["2","3","+","0.1","*","π"]}"#);
    }

    #[test]
    fn file_round_trip() {
        let original = sample();
        let path = scratch("round-trip");
        Snapshot::capture(&original).save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let mut restored = Brain::new();
        assert_eq!(loaded.apply(&mut restored), original.evaluate());
        assert_eq!(restored.describe(), original.describe());
        assert_eq!(restored.describe(), "(2+3)*0.1, π");
    }

    #[test]
    fn tolerant_of_unknown_entries() {
        let snapshot: Snapshot =
            serde_json::from_str(r##"{"program":["9","??","√","#1"]}"##).unwrap();
        let mut brain = Brain::new();
        assert_eq!(snapshot.apply(&mut brain), Evaluation::Complete(3.0));
    }

    #[test]
    fn variables_survive() {
        let mut original = Brain::new();
        original.push_operand(3.0);
        original.push_variable("y");
        original.perform_operation("*");
        let path = scratch("variables");
        Snapshot::capture(&original).save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let mut restored = Brain::new();
        loaded.apply(&mut restored);
        assert_eq!(restored.describe(), "3*y");
        assert_eq!(restored.set_variable("y", 14.0), Evaluation::Complete(42.0));
    }

    #[test]
    fn missing_file() {
        let result = Snapshot::load(&scratch("missing"));
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }

    #[test]
    fn malformed_file() {
        let path = scratch("malformed");
        fs::write(&path, "[1, 2").unwrap();
        let result = Snapshot::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SnapshotError::Format(_))));
    }
}
