use crate::foundation::error::{VizError, VizResult};
use crate::generate::check_len;
use crate::step::model::{SearchSnapshot, SearchWindow, Snapshot, StepKind};
use crate::step::sequence::{StepRecorder, StepSequence};

/// Search algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchAlgorithm {
    /// Scan left to right; the array may be unordered.
    Linear,
    /// Halve a sorted window; lower midpoint on even spans.
    Binary,
}

impl SearchAlgorithm {
    fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear-search",
            Self::Binary => "binary-search",
        }
    }
}

/// Trace a search of `values` for `target`.
///
/// Binary search requires a non-decreasing array and rejects anything else rather than producing
/// meaningless probes. `max_len` is the visualizer's configured array ceiling.
#[tracing::instrument(skip(values), fields(len = values.len()))]
pub fn generate(
    algorithm: SearchAlgorithm,
    values: &[i64],
    target: i64,
    max_len: usize,
) -> VizResult<StepSequence> {
    check_len(algorithm.name(), values.len(), max_len)?;
    match algorithm {
        SearchAlgorithm::Linear => Ok(linear(values, target)),
        SearchAlgorithm::Binary => {
            ensure_sorted(values)?;
            Ok(binary(values, target))
        }
    }
}

fn ensure_sorted(values: &[i64]) -> VizResult<()> {
    if let Some(i) = values.windows(2).position(|w| w[0] > w[1]) {
        return Err(VizError::invalid_input(format!(
            "array must be sorted in ascending order for binary search (index {}: {} > {})",
            i,
            values[i],
            values[i + 1]
        )));
    }
    Ok(())
}

struct SearchTrace<'a> {
    values: &'a [i64],
    target: i64,
    rec: StepRecorder,
}

impl SearchTrace<'_> {
    fn emit(
        &mut self,
        kind: StepKind,
        window: Option<SearchWindow>,
        mid: Option<usize>,
        current: Option<usize>,
        found: Option<usize>,
        narration: String,
    ) {
        let snap = SearchSnapshot {
            values: self.values.to_vec(),
            target: self.target,
            window,
            mid,
            current,
            found,
        };
        self.rec.push(kind, Snapshot::Search(snap), narration);
    }
}

fn linear(values: &[i64], target: i64) -> StepSequence {
    let mut t = SearchTrace {
        values,
        target,
        rec: StepRecorder::new(),
    };
    t.emit(
        StepKind::SearchStart,
        None,
        None,
        None,
        None,
        format!("Starting linear search for target: {target}."),
    );

    for (i, &v) in values.iter().enumerate() {
        t.emit(
            StepKind::SearchProbe,
            None,
            None,
            Some(i),
            None,
            format!("Checking index {i}. Value: {v}."),
        );
        if v == target {
            t.emit(
                StepKind::SearchFound,
                None,
                None,
                Some(i),
                Some(i),
                format!("Target found at index {i}!"),
            );
            return t.rec.finish();
        }
    }

    t.emit(
        StepKind::SearchMiss,
        None,
        None,
        None,
        None,
        format!("Target {target} not found after checking all elements."),
    );
    t.rec.finish()
}

fn binary(values: &[i64], target: i64) -> StepSequence {
    let mut t = SearchTrace {
        values,
        target,
        rec: StepRecorder::new(),
    };

    let mut window = (!values.is_empty()).then(|| SearchWindow {
        low: 0,
        high: values.len() - 1,
    });
    let start = match window {
        Some(w) => format!(
            "Starting search for target: {target}. Range: {} to {}.",
            w.low, w.high
        ),
        None => format!("Starting search for target: {target}. The array is empty."),
    };
    t.emit(StepKind::SearchStart, window, None, None, None, start);

    while let Some(w) = window {
        let mid = w.low + (w.high - w.low) / 2;
        let v = values[mid];
        t.emit(
            StepKind::SearchProbe,
            window,
            Some(mid),
            None,
            None,
            format!("Mid index: {mid}. Checking value: {v}."),
        );

        if v == target {
            t.emit(
                StepKind::SearchFound,
                window,
                Some(mid),
                None,
                Some(mid),
                format!("Target found at index {mid}!"),
            );
            return t.rec.finish();
        }

        let (next, discarded) = if v < target {
            let next = (mid < w.high).then(|| SearchWindow {
                low: mid + 1,
                high: w.high,
            });
            (next, format!("{v} < {target}. Discarding left half."))
        } else {
            let next = (mid > w.low).then(|| SearchWindow {
                low: w.low,
                high: mid - 1,
            });
            (next, format!("{v} > {target}. Discarding right half."))
        };
        let range = match next {
            Some(n) => format!(" New range. Low: {}, High: {}.", n.low, n.high),
            None => " The range is now empty.".to_owned(),
        };
        t.emit(
            StepKind::SearchDiscard,
            next,
            Some(mid),
            None,
            None,
            format!("{discarded}{range}"),
        );
        window = next;
    }

    t.emit(
        StepKind::SearchMiss,
        None,
        None,
        None,
        None,
        format!("Target {target} not found."),
    );
    t.rec.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/generate/search.rs"]
mod tests;
