//! Step generators, one per algorithm family.
//!
//! Generators are pure: the same input always yields an identical [`StepSequence`], and a
//! generator never observes playback.

pub(crate) mod random;
pub(crate) mod recursion;
pub(crate) mod search;
pub(crate) mod sort;
pub(crate) mod structure;
pub(crate) mod traversal;

use std::fmt;
use std::str::FromStr;

use crate::config::VizConfig;
use crate::foundation::error::{VizError, VizResult};
use crate::step::model::{Family, StructureKind, TraversalOrder};
use crate::step::sequence::StepSequence;

use self::recursion::RecursionAlgorithm;
use self::search::SearchAlgorithm;
use self::sort::SortAlgorithm;
use self::structure::Structure;
use self::traversal::BinaryTree;

/// Every visualizer the engine can drive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Algorithm {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    Factorial,
    Fibonacci,
    TowerOfHanoi,
    Stack,
    Queue,
    LinkedList,
    TreeTraversal,
}

impl Algorithm {
    /// All visualizers, in menu order.
    pub const ALL: &'static [Algorithm] = &[
        Self::LinearSearch,
        Self::BinarySearch,
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::HeapSort,
        Self::Factorial,
        Self::Fibonacci,
        Self::TowerOfHanoi,
        Self::Stack,
        Self::Queue,
        Self::LinkedList,
        Self::TreeTraversal,
    ];

    /// Kebab-case name, e.g. `bubble-sort`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LinearSearch => "linear-search",
            Self::BinarySearch => "binary-search",
            Self::BubbleSort => "bubble-sort",
            Self::SelectionSort => "selection-sort",
            Self::InsertionSort => "insertion-sort",
            Self::MergeSort => "merge-sort",
            Self::QuickSort => "quick-sort",
            Self::HeapSort => "heap-sort",
            Self::Factorial => "factorial",
            Self::Fibonacci => "fibonacci",
            Self::TowerOfHanoi => "tower-of-hanoi",
            Self::Stack => "stack",
            Self::Queue => "queue",
            Self::LinkedList => "linked-list",
            Self::TreeTraversal => "tree-traversal",
        }
    }

    /// Family whose renderer draws this visualizer.
    pub fn family(self) -> Family {
        match self {
            Self::LinearSearch | Self::BinarySearch => Family::Search,
            Self::BubbleSort
            | Self::SelectionSort
            | Self::InsertionSort
            | Self::MergeSort
            | Self::QuickSort
            | Self::HeapSort => Family::Sort,
            Self::Factorial | Self::Fibonacci | Self::TowerOfHanoi => Family::Recursion,
            Self::Stack | Self::Queue | Self::LinkedList => Family::Structure,
            Self::TreeTraversal => Family::Traversal,
        }
    }

    /// Visualizer backing a linear structure.
    pub fn for_structure(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Stack => Self::Stack,
            StructureKind::Queue => Self::Queue,
            StructureKind::LinkedList => Self::LinkedList,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = VizError;

    fn from_str(s: &str) -> VizResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| VizError::invalid_input(format!("unknown algorithm '{s}'")))
    }
}

/// One generation request, tagged by `algorithm` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "algorithm", rename_all = "kebab-case")]
#[allow(missing_docs)]
pub enum GenerateRequest {
    LinearSearch {
        array: Vec<i64>,
        target: i64,
    },
    BinarySearch {
        array: Vec<i64>,
        target: i64,
    },
    BubbleSort {
        array: Vec<i64>,
    },
    SelectionSort {
        array: Vec<i64>,
    },
    InsertionSort {
        array: Vec<i64>,
    },
    MergeSort {
        array: Vec<i64>,
    },
    QuickSort {
        array: Vec<i64>,
    },
    HeapSort {
        array: Vec<i64>,
    },
    Factorial {
        n: u32,
    },
    Fibonacci {
        n: u32,
    },
    TowerOfHanoi {
        disks: u32,
    },
    /// Traverses `tree`, or the built-in sample tree when absent.
    TreeTraversal {
        order: TraversalOrder,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tree: Option<BinaryTree>,
    },
}

impl GenerateRequest {
    /// Visualizer this request drives.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::LinearSearch { .. } => Algorithm::LinearSearch,
            Self::BinarySearch { .. } => Algorithm::BinarySearch,
            Self::BubbleSort { .. } => Algorithm::BubbleSort,
            Self::SelectionSort { .. } => Algorithm::SelectionSort,
            Self::InsertionSort { .. } => Algorithm::InsertionSort,
            Self::MergeSort { .. } => Algorithm::MergeSort,
            Self::QuickSort { .. } => Algorithm::QuickSort,
            Self::HeapSort { .. } => Algorithm::HeapSort,
            Self::Factorial { .. } => Algorithm::Factorial,
            Self::Fibonacci { .. } => Algorithm::Fibonacci,
            Self::TowerOfHanoi { .. } => Algorithm::TowerOfHanoi,
            Self::TreeTraversal { .. } => Algorithm::TreeTraversal,
        }
    }

    /// Parse a JSON request.
    pub fn from_json_str(s: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Run the generator for `request` with the ceilings in `config`.
///
/// Linear structures are stateful and go through [`apply`](structure::apply) instead.
#[tracing::instrument(skip_all, fields(algorithm = %request.algorithm()))]
pub fn generate(request: &GenerateRequest, config: &VizConfig) -> VizResult<StepSequence> {
    let max = config.settings(request.algorithm()).max_input;
    let seq = match request {
        GenerateRequest::LinearSearch { array, target } => {
            search::generate(SearchAlgorithm::Linear, array, *target, max)
        }
        GenerateRequest::BinarySearch { array, target } => {
            search::generate(SearchAlgorithm::Binary, array, *target, max)
        }
        GenerateRequest::BubbleSort { array } => sort::generate(SortAlgorithm::Bubble, array, max),
        GenerateRequest::SelectionSort { array } => {
            sort::generate(SortAlgorithm::Selection, array, max)
        }
        GenerateRequest::InsertionSort { array } => {
            sort::generate(SortAlgorithm::Insertion, array, max)
        }
        GenerateRequest::MergeSort { array } => sort::generate(SortAlgorithm::Merge, array, max),
        GenerateRequest::QuickSort { array } => sort::generate(SortAlgorithm::Quick, array, max),
        GenerateRequest::HeapSort { array } => sort::generate(SortAlgorithm::Heap, array, max),
        GenerateRequest::Factorial { n } => {
            recursion::generate(RecursionAlgorithm::Factorial, *n, ceiling_u32(max))
        }
        GenerateRequest::Fibonacci { n } => {
            recursion::generate(RecursionAlgorithm::Fibonacci, *n, ceiling_u32(max))
        }
        GenerateRequest::TowerOfHanoi { disks } => {
            recursion::generate(RecursionAlgorithm::TowerOfHanoi, *disks, ceiling_u32(max))
        }
        GenerateRequest::TreeTraversal { order, tree } => match tree {
            Some(t) => traversal::generate(*order, t, max),
            None => traversal::generate(*order, &BinaryTree::sample(), max),
        },
    }?;
    tracing::debug!(steps = seq.len(), "generated sequence");
    Ok(seq)
}

/// Empty structure of `kind` sized by its configured capacity.
pub fn new_structure(kind: StructureKind, config: &VizConfig) -> VizResult<Structure> {
    let capacity = config.settings(Algorithm::for_structure(kind)).max_input;
    Structure::new(kind, capacity)
}

fn ceiling_u32(max: usize) -> u32 {
    u32::try_from(max).unwrap_or(u32::MAX)
}

pub(crate) fn check_len(name: &str, len: usize, max: usize) -> VizResult<()> {
    if len > max {
        return Err(VizError::limit_exceeded(format!(
            "{name} accepts at most {max} elements, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/mod.rs"]
mod tests;
