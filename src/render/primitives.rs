use crate::foundation::error::VizResult;
use crate::render::layout::{self, Point};
use crate::step::model::{
    CallStatus, MergeBuffers, Pegs, RecursionSnapshot, SearchSnapshot, Snapshot, SortSnapshot,
    Step, StepKind, StructureKind, StructureSnapshot, TraversalSnapshot,
};

/// Visual emphasis of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Highlight {
    /// Default styling.
    None,
    /// Outside the active window or range.
    Dimmed,
    /// Being compared or probed.
    Compare,
    /// Just swapped.
    Swap,
    /// Just written.
    Placed,
    /// Partition pivot.
    Pivot,
    /// Key or running minimum.
    Key,
    /// In its final sorted position.
    Sorted,
    /// Search target located here.
    Found,
    /// Acted on by this step (current call, visited node, touched cell).
    Active,
    /// Suspended call.
    Waiting,
    /// Call resolved by its base case.
    BaseCase,
    /// Finished: returned call or visited tree node.
    Done,
    /// Waiting in the level-order queue.
    Queued,
}

/// One bar of an array chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Bar {
    /// Element value.
    pub value: i64,
    /// Height in `[0.1, 1.0]`, relative to the array's range.
    pub height: f32,
    /// Emphasis.
    pub highlight: Highlight,
}

/// The two runs of a merge in progress, drawn under the main array.
///
/// Consumed elements are dimmed; on a comparison the two run heads are highlighted.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MergeRuns {
    /// Left run.
    pub left: Vec<Bar>,
    /// Right run.
    pub right: Vec<Bar>,
}

/// Positioned node of a call tree or binary tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlacedNode {
    /// Display text, with the result appended once known.
    pub label: String,
    /// Distance from the root.
    pub depth: u32,
    /// Layout position.
    pub pos: Point,
    /// Emphasis.
    pub highlight: Highlight,
}

/// One box of a linear structure.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Cell {
    /// Element text.
    pub value: String,
    /// Emphasis.
    pub highlight: Highlight,
    /// Carries the head (front / bottom) marker.
    pub head: bool,
    /// Carries the tail (rear / top) marker.
    pub tail: bool,
}

/// Family-specific drawing payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FrameBody {
    /// Search and sort arrays.
    Bars {
        /// One bar per index.
        bars: Vec<Bar>,
        /// Merge runs (merge sort only).
        #[serde(skip_serializing_if = "Option::is_none")]
        merge: Option<MergeRuns>,
    },
    /// Recursion call trees and traversal trees.
    Tree {
        /// Nodes in snapshot order.
        nodes: Vec<PlacedNode>,
        /// `(parent, child)` index pairs into `nodes`.
        edges: Vec<(usize, usize)>,
        /// Live call stack, outermost first (recursion only).
        stack: Vec<String>,
        /// Rod contents (Tower of Hanoi only).
        pegs: Option<Pegs>,
    },
    /// Stack, queue and list cells.
    Cells {
        /// Structure variant.
        kind: StructureKind,
        /// Cells head first.
        cells: Vec<Cell>,
        /// Configured maximum size.
        capacity: usize,
    },
}

/// Backend-agnostic picture of one step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct VisualFrame {
    /// The step's narration.
    pub caption: String,
    /// What to draw.
    pub body: FrameBody,
}

/// Something that can draw a [`VisualFrame`].
pub trait FrameRenderer {
    /// Rendered output, e.g. a `String` for a terminal.
    type Output;

    /// Draw one frame.
    fn render(&mut self, frame: &VisualFrame) -> VizResult<Self::Output>;
}

/// Map a step to drawable primitives. Reads only the step itself.
pub fn to_visual(step: &Step) -> VisualFrame {
    let body = match step.snapshot() {
        Snapshot::Search(s) => FrameBody::Bars {
            bars: search_bars(s),
            merge: None,
        },
        Snapshot::Sort(s) => FrameBody::Bars {
            bars: sort_bars(s),
            merge: s
                .merge
                .as_ref()
                .map(|m| merge_runs(m, step.kind() == StepKind::SortCompare)),
        },
        Snapshot::Recursion(s) => call_tree(s),
        Snapshot::Traversal(s) => traversal_tree(s),
        Snapshot::Structure(s) => cells(s),
    };
    VisualFrame {
        caption: step.narration().to_owned(),
        body,
    }
}

fn bars(values: &[i64], mut highlight: impl FnMut(usize) -> Highlight) -> Vec<Bar> {
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);
    let span = max as f64 - min as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let height = if span == 0.0 {
                1.0
            } else {
                0.1 + 0.9 * ((v as f64 - min as f64) / span)
            };
            Bar {
                value: v,
                height: height as f32,
                highlight: highlight(i),
            }
        })
        .collect()
}

fn search_bars(s: &SearchSnapshot) -> Vec<Bar> {
    bars(&s.values, |i| {
        if s.found == Some(i) {
            Highlight::Found
        } else if s.mid == Some(i) || s.current == Some(i) {
            Highlight::Compare
        } else if s.window.is_some_and(|w| i < w.low || i > w.high) {
            Highlight::Dimmed
        } else {
            Highlight::None
        }
    })
}

fn sort_bars(s: &SortSnapshot) -> Vec<Bar> {
    let r = &s.roles;
    bars(&s.values, |i| {
        if r.swapped.contains(&i) {
            Highlight::Swap
        } else if r.placed == Some(i) {
            Highlight::Placed
        } else if r.pivot == Some(i) {
            Highlight::Pivot
        } else if r.key == Some(i) {
            Highlight::Key
        } else if r.comparing.contains(&i) {
            Highlight::Compare
        } else if r.sorted.contains(&i) {
            Highlight::Sorted
        } else if r.range.is_some_and(|range| !range.contains(i)) {
            Highlight::Dimmed
        } else {
            Highlight::None
        }
    })
}

fn merge_runs(m: &MergeBuffers, comparing: bool) -> MergeRuns {
    let run = |values: &[i64], next: usize| {
        bars(values, |i| {
            if i < next {
                Highlight::Dimmed
            } else if comparing && i == next {
                Highlight::Compare
            } else {
                Highlight::None
            }
        })
    };
    MergeRuns {
        left: run(m.left.as_slice(), m.left_next),
        right: run(m.right.as_slice(), m.right_next),
    }
}

fn edges(parents: &[Option<usize>]) -> Vec<(usize, usize)> {
    parents
        .iter()
        .enumerate()
        .filter_map(|(child, p)| p.map(|p| (p, child)))
        .collect()
}

fn call_tree(s: &RecursionSnapshot) -> FrameBody {
    let parents: Vec<Option<usize>> = s
        .nodes
        .iter()
        .map(|n| n.parent.map(|p| p.0 as usize))
        .collect();
    let pos = layout::tidy(&parents);

    let nodes = s
        .nodes
        .iter()
        .zip(pos)
        .map(|(n, pos)| PlacedNode {
            label: match n.result {
                Some(r) => format!("{} = {r}", n.label),
                None => n.label.clone(),
            },
            depth: n.depth,
            pos,
            highlight: match n.status {
                CallStatus::Calling => Highlight::Active,
                CallStatus::Waiting => Highlight::Waiting,
                CallStatus::BaseCase => Highlight::BaseCase,
                CallStatus::Returning => Highlight::Done,
            },
        })
        .collect();

    FrameBody::Tree {
        nodes,
        edges: edges(&parents),
        stack: s.stack.clone(),
        pegs: s.pegs.clone(),
    }
}

fn traversal_tree(s: &TraversalSnapshot) -> FrameBody {
    let parents: Vec<Option<usize>> = s
        .nodes
        .iter()
        .map(|n| n.parent.map(|p| p.0 as usize))
        .collect();
    let pos = layout::tidy(&parents);

    let nodes = s
        .nodes
        .iter()
        .zip(pos)
        .map(|(n, pos)| PlacedNode {
            label: n.label.clone(),
            depth: n.depth,
            pos,
            highlight: if s.current == Some(n.id) {
                Highlight::Active
            } else if s.visited.contains(&n.id) {
                Highlight::Done
            } else if s.frontier.contains(&n.id) {
                Highlight::Queued
            } else {
                Highlight::None
            },
        })
        .collect();

    FrameBody::Tree {
        nodes,
        edges: edges(&parents),
        stack: Vec::new(),
        pegs: None,
    }
}

fn cells(s: &StructureSnapshot) -> FrameBody {
    let cells = s
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| Cell {
            value: v.clone(),
            highlight: if s.highlight == Some(i) {
                Highlight::Active
            } else {
                Highlight::None
            },
            head: s.head == Some(i),
            tail: s.tail == Some(i),
        })
        .collect();
    FrameBody::Cells {
        kind: s.kind,
        cells,
        capacity: s.capacity,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/primitives.rs"]
mod tests;
