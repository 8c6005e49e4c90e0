use std::collections::BTreeSet;

use crate::foundation::core::IndexRange;
use crate::foundation::error::VizResult;
use crate::generate::check_len;
use crate::step::model::{IndexRoles, MergeBuffers, Snapshot, SortSnapshot, StepKind};
use crate::step::sequence::{StepRecorder, StepSequence};

/// Comparison sorts, all ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortAlgorithm {
    /// Adjacent swaps with early exit on a swap-free pass.
    Bubble,
    /// Running minimum swapped into the front.
    Selection,
    /// Shift larger elements right, insert the key.
    Insertion,
    /// Top-down merge sort; stable.
    Merge,
    /// Lomuto partition, last element as pivot.
    Quick,
    /// In-place max-heap.
    Heap,
}

impl SortAlgorithm {
    fn name(self) -> &'static str {
        match self {
            Self::Bubble => "bubble-sort",
            Self::Selection => "selection-sort",
            Self::Insertion => "insertion-sort",
            Self::Merge => "merge-sort",
            Self::Quick => "quick-sort",
            Self::Heap => "heap-sort",
        }
    }
}

/// Trace sorting `values` ascending.
///
/// The last step is always [`StepKind::SortComplete`] with every index marked sorted and values
/// equal to the sorted input.
#[tracing::instrument(skip(values), fields(len = values.len()))]
pub fn generate(
    algorithm: SortAlgorithm,
    values: &[i64],
    max_len: usize,
) -> VizResult<StepSequence> {
    check_len(algorithm.name(), values.len(), max_len)?;

    let n = values.len();
    let mut t = SortTrace::new(values);
    match algorithm {
        SortAlgorithm::Bubble => bubble(&mut t),
        SortAlgorithm::Selection => selection(&mut t),
        SortAlgorithm::Insertion => insertion(&mut t),
        SortAlgorithm::Merge => {
            if n > 0 {
                merge_sort(&mut t, 0, n - 1);
            }
        }
        SortAlgorithm::Quick => quick(&mut t, 0, n),
        SortAlgorithm::Heap => heap(&mut t),
    }

    t.sorted = (0..n).collect();
    t.emit(
        StepKind::SortComplete,
        IndexRoles::default(),
        "Sorting complete!".to_owned(),
    );
    Ok(t.rec.finish())
}

struct SortTrace {
    values: Vec<i64>,
    sorted: BTreeSet<usize>,
    rec: StepRecorder,
}

impl SortTrace {
    fn new(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
            sorted: BTreeSet::new(),
            rec: StepRecorder::new(),
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn emit(&mut self, kind: StepKind, roles: IndexRoles, narration: String) {
        self.emit_with(kind, roles, None, narration);
    }

    fn emit_with(
        &mut self,
        kind: StepKind,
        mut roles: IndexRoles,
        merge: Option<MergeBuffers>,
        narration: String,
    ) {
        roles.sorted = self.sorted.clone();
        let snap = SortSnapshot {
            values: self.values.clone(),
            roles,
            merge,
        };
        self.rec.push(kind, Snapshot::Sort(snap), narration);
    }

    fn compare(&mut self, i: usize, j: usize, narration: String) {
        self.emit(
            StepKind::SortCompare,
            IndexRoles {
                comparing: vec![i, j],
                ..IndexRoles::default()
            },
            narration,
        );
    }

    fn swap(&mut self, i: usize, j: usize, roles: IndexRoles, narration: String) {
        self.values.swap(i, j);
        self.emit(
            StepKind::SortSwap,
            IndexRoles {
                swapped: vec![i, j],
                ..roles
            },
            narration,
        );
    }

    fn mark(&mut self, i: usize, roles: IndexRoles, narration: String) {
        self.sorted.insert(i);
        self.emit(StepKind::SortMark, roles, narration);
    }
}

fn bubble(t: &mut SortTrace) {
    let n = t.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - pass - 1 {
            let (a, b) = (t.values[j], t.values[j + 1]);
            t.compare(j, j + 1, format!("Comparing {a} and {b}."));
            if a > b {
                t.swap(
                    j,
                    j + 1,
                    IndexRoles::default(),
                    format!("{a} > {b}. Swapping them."),
                );
                swapped = true;
            }
        }

        let last = n - 1 - pass;
        let v = t.values[last];
        t.mark(
            last,
            IndexRoles::default(),
            format!(
                "Pass {} complete. {v} is in its final position.",
                pass + 1
            ),
        );

        if !swapped && pass + 2 < n {
            t.sorted.extend(0..n);
            t.emit(
                StepKind::SortMark,
                IndexRoles::default(),
                format!("No swaps in pass {}. The array is already sorted.", pass + 1),
            );
            break;
        }
    }
}

fn selection(t: &mut SortTrace) {
    let n = t.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        let unsorted = Some(IndexRange::new(i, n - 1));
        t.emit(
            StepKind::SortKey,
            IndexRoles {
                key: Some(i),
                range: unsorted,
                ..IndexRoles::default()
            },
            format!(
                "Pass {}: assuming {} at index {i} is the minimum.",
                i + 1,
                t.values[i]
            ),
        );

        for j in i + 1..n {
            let (cand, cur) = (t.values[j], t.values[min]);
            t.emit(
                StepKind::SortCompare,
                IndexRoles {
                    comparing: vec![min, j],
                    key: Some(min),
                    range: unsorted,
                    ..IndexRoles::default()
                },
                format!("Comparing {cand} with current minimum {cur}."),
            );
            if cand < cur {
                min = j;
                t.emit(
                    StepKind::SortKey,
                    IndexRoles {
                        key: Some(min),
                        range: unsorted,
                        ..IndexRoles::default()
                    },
                    format!("New minimum {cand} found at index {j}."),
                );
            }
        }

        if min != i {
            let (a, b) = (t.values[i], t.values[min]);
            t.swap(
                i,
                min,
                IndexRoles::default(),
                format!("Swapping minimum {b} into index {i} (was {a})."),
            );
        }
        let v = t.values[i];
        t.mark(
            i,
            IndexRoles::default(),
            format!("{v} is in its final position at index {i}."),
        );
    }
}

fn insertion(t: &mut SortTrace) {
    for i in 1..t.len() {
        let key = t.values[i];
        t.emit(
            StepKind::SortKey,
            IndexRoles {
                key: Some(i),
                range: Some(IndexRange::new(0, i - 1)),
                ..IndexRoles::default()
            },
            format!("Selecting {key} as the key to insert."),
        );

        let mut hole = i;
        while hole > 0 {
            let left = t.values[hole - 1];
            t.emit(
                StepKind::SortCompare,
                IndexRoles {
                    comparing: vec![hole - 1],
                    key: Some(hole),
                    ..IndexRoles::default()
                },
                format!("Comparing key {key} with {left}."),
            );
            if left <= key {
                break;
            }
            t.values[hole] = left;
            t.emit(
                StepKind::SortOverwrite,
                IndexRoles {
                    placed: Some(hole),
                    ..IndexRoles::default()
                },
                format!("{left} > {key}. Shifting {left} to the right."),
            );
            hole -= 1;
        }

        t.values[hole] = key;
        t.emit(
            StepKind::SortOverwrite,
            IndexRoles {
                placed: Some(hole),
                range: Some(IndexRange::new(0, i)),
                ..IndexRoles::default()
            },
            format!("Inserted {key} at index {hole}."),
        );
    }
}

fn merge_sort(t: &mut SortTrace, lo: usize, hi: usize) {
    if lo >= hi {
        return;
    }
    t.emit(
        StepKind::SortDivide,
        IndexRoles {
            range: Some(IndexRange::new(lo, hi)),
            ..IndexRoles::default()
        },
        format!("Dividing array from index {lo} to {hi}."),
    );
    let mid = lo + (hi - lo) / 2;
    merge_sort(t, lo, mid);
    merge_sort(t, mid + 1, hi);
    merge(t, lo, mid, hi);
}

fn merge(t: &mut SortTrace, lo: usize, mid: usize, hi: usize) {
    let left = t.values[lo..=mid].to_vec();
    let right = t.values[mid + 1..=hi].to_vec();
    let range = Some(IndexRange::new(lo, hi));
    let final_merge = lo == 0 && hi + 1 == t.len();
    let buffers = |i: usize, j: usize| MergeBuffers {
        left: left.clone(),
        right: right.clone(),
        left_next: i,
        right_next: j,
    };

    t.emit_with(
        StepKind::SortMerge,
        IndexRoles {
            range,
            ..IndexRoles::default()
        },
        Some(buffers(0, 0)),
        format!(
            "Merging subarrays [{lo}..{mid}] and [{}..{hi}].",
            mid + 1
        ),
    );

    let (mut i, mut j, mut k) = (0, 0, lo);
    while i < left.len() || j < right.len() {
        let take_left = if i < left.len() && j < right.len() {
            t.emit_with(
                StepKind::SortCompare,
                IndexRoles {
                    range,
                    ..IndexRoles::default()
                },
                Some(buffers(i, j)),
                format!("Comparing {} and {}.", left[i], right[j]),
            );
            left[i] <= right[j]
        } else {
            i < left.len()
        };

        let v = if take_left {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        t.values[k] = v;
        if final_merge {
            t.sorted.insert(k);
        }
        t.emit_with(
            StepKind::SortOverwrite,
            IndexRoles {
                placed: Some(k),
                range,
                ..IndexRoles::default()
            },
            Some(buffers(i, j)),
            format!("Placing {v} at index {k}."),
        );
        k += 1;
    }
}

/// Sorts the half-open range `[lo, hi)`.
fn quick(t: &mut SortTrace, lo: usize, hi: usize) {
    match hi.saturating_sub(lo) {
        0 => {}
        1 => {
            if !t.sorted.contains(&lo) {
                let v = t.values[lo];
                t.mark(
                    lo,
                    IndexRoles::default(),
                    format!("Single element {v} at index {lo} is in its final position."),
                );
            }
        }
        _ => {
            let p = partition(t, lo, hi - 1);
            let v = t.values[p];
            t.mark(
                p,
                IndexRoles {
                    pivot: Some(p),
                    ..IndexRoles::default()
                },
                format!("Pivot {v} is sorted at index {p}. Sorting the sub-arrays on each side."),
            );
            quick(t, lo, p);
            quick(t, p + 1, hi);
        }
    }
}

/// Lomuto partition of `[lo, hi]` around `values[hi]`; returns the pivot's final index.
fn partition(t: &mut SortTrace, lo: usize, hi: usize) -> usize {
    let pivot = t.values[hi];
    let range = Some(IndexRange::new(lo, hi));
    t.emit(
        StepKind::SortPivot,
        IndexRoles {
            pivot: Some(hi),
            range,
            ..IndexRoles::default()
        },
        format!("Choosing {pivot} as pivot for range [{lo}, {hi}]."),
    );

    let mut store = lo;
    for j in lo..hi {
        let v = t.values[j];
        t.emit(
            StepKind::SortCompare,
            IndexRoles {
                comparing: vec![j, hi],
                pivot: Some(hi),
                range,
                ..IndexRoles::default()
            },
            format!("Comparing {v} with pivot {pivot}."),
        );
        if v < pivot {
            if store != j {
                let s = t.values[store];
                t.swap(
                    store,
                    j,
                    IndexRoles {
                        pivot: Some(hi),
                        range,
                        ..IndexRoles::default()
                    },
                    format!("{v} < {pivot}. Swapping {s} and {v}."),
                );
            }
            store += 1;
        }
    }

    if store != hi {
        t.swap(
            store,
            hi,
            IndexRoles {
                pivot: Some(store),
                range,
                ..IndexRoles::default()
            },
            format!("Placing pivot {pivot} at index {store}."),
        );
    }
    store
}

fn heap(t: &mut SortTrace) {
    let n = t.len();
    if n < 2 {
        return;
    }
    for root in (0..n / 2).rev() {
        sift_down(t, root, n);
    }
    let max = t.values[0];
    t.emit(
        StepKind::SortKey,
        IndexRoles {
            key: Some(0),
            range: Some(IndexRange::new(0, n - 1)),
            ..IndexRoles::default()
        },
        format!("Max-heap built. The largest element {max} is at the root."),
    );

    for end in (1..n).rev() {
        let top = t.values[0];
        t.sorted.insert(end);
        t.swap(
            0,
            end,
            IndexRoles {
                range: Some(IndexRange::new(0, end - 1)),
                ..IndexRoles::default()
            },
            format!("Moving max {top} to index {end}. It is in its final position."),
        );
        sift_down(t, 0, end);
    }
}

/// Restores the max-heap property for the subtree at `root` within `[0, len)`.
fn sift_down(t: &mut SortTrace, mut root: usize, len: usize) {
    let heap_range = Some(IndexRange::new(0, len - 1));
    loop {
        let left = 2 * root + 1;
        if left >= len {
            return;
        }
        let mut child = left;
        let right = left + 1;
        if right < len {
            let (a, b) = (t.values[left], t.values[right]);
            t.emit(
                StepKind::SortCompare,
                IndexRoles {
                    comparing: vec![left, right],
                    range: heap_range,
                    ..IndexRoles::default()
                },
                format!("Comparing children {a} and {b}."),
            );
            if b > a {
                child = right;
            }
        }

        let (parent, larger) = (t.values[root], t.values[child]);
        t.emit(
            StepKind::SortCompare,
            IndexRoles {
                comparing: vec![root, child],
                range: heap_range,
                ..IndexRoles::default()
            },
            format!("Comparing parent {parent} with larger child {larger}."),
        );
        if larger <= parent {
            return;
        }
        t.swap(
            root,
            child,
            IndexRoles {
                range: heap_range,
                ..IndexRoles::default()
            },
            format!("{larger} > {parent}. Sifting {parent} down."),
        );
        root = child;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/sort.rs"]
mod tests;
