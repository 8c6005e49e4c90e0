use std::ops::Deref;

use crate::foundation::error::{VizError, VizResult};
use crate::step::model::{Snapshot, Step, StepKind};

/// Ordered, finite, read-only trace of one generation run.
///
/// Produced by a generator through [`StepRecorder`]; there is no way to patch a sequence in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Sequence with no steps.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Borrow the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Give up the sequence and take its steps.
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a sequence previously written by [`StepSequence::to_json_pretty`].
    ///
    /// Rejects steps whose narration is blank or whose snapshot family does not match the kind.
    pub fn from_json_str(s: &str) -> VizResult<Self> {
        let steps: Vec<Step> = serde_json::from_str(s)?;
        for (i, step) in steps.iter().enumerate() {
            if step.narration().trim().is_empty() {
                return Err(VizError::invalid_input(format!(
                    "step {i} has an empty narration"
                )));
            }
            if step.kind().family() != step.snapshot().family() {
                return Err(VizError::invalid_input(format!(
                    "step {i} kind '{}' does not match its snapshot family",
                    step.kind()
                )));
            }
        }
        Ok(Self { steps })
    }
}

impl Deref for StepSequence {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.steps
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Append-only step builder used by generators.
///
/// Every pushed snapshot is moved in, so later mutation of the generator's working state cannot
/// reach a recorded step.
#[derive(Debug, Default)]
pub(crate) struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, kind: StepKind, snapshot: Snapshot, narration: impl Into<String>) {
        debug_assert_eq!(
            kind.family(),
            snapshot.family(),
            "step kind '{kind}' recorded with a foreign snapshot"
        );
        let mut narration = narration.into();
        if narration.trim().is_empty() {
            narration = kind.default_narration().to_owned();
        }
        tracing::trace!(kind = kind.as_str(), index = self.steps.len(), "record step");
        self.steps.push(Step::new(kind, snapshot, narration));
    }

    pub(crate) fn finish(self) -> StepSequence {
        StepSequence { steps: self.steps }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/step/sequence.rs"]
mod tests;
