//! Per-visualizer configuration: input ceilings and default tick intervals.
//!
//! Nothing in the generators or the controller hardcodes these; callers pass the relevant
//! [`VisualizerSettings`] in.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::SpeedMs;
use crate::foundation::error::{VizError, VizResult};
use crate::generate::Algorithm;

/// Settings for one visualizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisualizerSettings {
    /// Largest accepted input: array length, `n`, disk count, capacity or node count.
    pub max_input: usize,
    /// Default tick interval in milliseconds.
    pub speed_ms: u64,
}

impl VisualizerSettings {
    /// Default tick interval as a validated [`SpeedMs`].
    pub fn speed(&self) -> VizResult<SpeedMs> {
        SpeedMs::new(self.speed_ms)
    }
}

/// Effective configuration for every visualizer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VizConfig {
    /// Settings keyed by algorithm; entries absent from a loaded file fall back to defaults.
    #[serde(default)]
    pub visualizers: BTreeMap<Algorithm, VisualizerSettings>,
}

impl Default for VizConfig {
    fn default() -> Self {
        let visualizers = Algorithm::ALL
            .iter()
            .map(|&a| (a, default_settings(a)))
            .collect();
        Self { visualizers }
    }
}

impl VizConfig {
    /// Settings for `algorithm`, falling back to the built-in default.
    pub fn settings(&self, algorithm: Algorithm) -> VisualizerSettings {
        self.visualizers
            .get(&algorithm)
            .copied()
            .unwrap_or_else(|| default_settings(algorithm))
    }

    /// Replace the settings of one visualizer.
    pub fn set(&mut self, algorithm: Algorithm, settings: VisualizerSettings) {
        self.visualizers.insert(algorithm, settings);
    }

    /// Reject zero ceilings and zero tick intervals.
    pub fn validate(&self) -> VizResult<()> {
        for (algorithm, s) in &self.visualizers {
            if s.max_input == 0 {
                return Err(VizError::invalid_input(format!(
                    "{}: max_input must be > 0",
                    algorithm.as_str()
                )));
            }
            if s.speed_ms == 0 {
                return Err(VizError::invalid_input(format!(
                    "{}: speed_ms must be > 0",
                    algorithm.as_str()
                )));
            }
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config and fill in defaults.
    pub fn from_json_str(s: &str) -> VizResult<Self> {
        let parsed: VizConfig = serde_json::from_str(s)?;
        let mut cfg = Self::default();
        cfg.visualizers.extend(parsed.visualizers);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize the full effective configuration.
    pub fn to_json_pretty(&self) -> VizResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_settings(algorithm: Algorithm) -> VisualizerSettings {
    use Algorithm::*;
    let (max_input, speed_ms) = match algorithm {
        LinearSearch => (15, 800),
        BinarySearch => (15, 1500),
        BubbleSort => (15, 400),
        SelectionSort => (15, 400),
        InsertionSort => (15, 600),
        MergeSort => (15, 400),
        QuickSort => (15, 500),
        HeapSort => (15, 400),
        Factorial => (12, 700),
        Fibonacci => (9, 700),
        TowerOfHanoi => (5, 700),
        Stack => (8, 500),
        Queue => (8, 500),
        LinkedList => (9, 500),
        TreeTraversal => (15, 600),
    };
    VisualizerSettings {
        max_input,
        speed_ms,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
