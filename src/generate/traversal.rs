use std::collections::VecDeque;

use crate::foundation::core::NodeId;
use crate::foundation::error::{VizError, VizResult};
use crate::step::model::{
    Snapshot, StepKind, TraversalOrder, TraversalSnapshot, TreeNodeView, TreeSide,
};
use crate::step::sequence::{StepRecorder, StepSequence};

/// Owned binary tree with string labels.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BinaryTree {
    /// Node label.
    pub value: String,
    /// Left subtree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<BinaryTree>>,
    /// Right subtree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<BinaryTree>>,
}

impl BinaryTree {
    /// Node without children.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            left: None,
            right: None,
        }
    }

    /// Node with optional children.
    pub fn node(
        value: impl Into<String>,
        left: Option<BinaryTree>,
        right: Option<BinaryTree>,
    ) -> Self {
        Self {
            value: value.into(),
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// The nine-node demo tree rooted at `F`.
    ///
    /// ```text
    ///         F
    ///       /   \
    ///      B     G
    ///     / \     \
    ///    A   D     I
    ///       / \   /
    ///      C   E H
    /// ```
    pub fn sample() -> Self {
        use BinaryTree as T;
        T::node(
            "F",
            Some(T::node(
                "B",
                Some(T::leaf("A")),
                Some(T::node("D", Some(T::leaf("C")), Some(T::leaf("E")))),
            )),
            Some(T::node(
                "G",
                None,
                Some(T::node("I", Some(T::leaf("H")), None)),
            )),
        )
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |t| t.len()) + self.right.as_ref().map_or(0, |t| t.len())
    }

    /// Always `false`; a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Pre-order flattening with child links by index.
struct Flat {
    views: Vec<TreeNodeView>,
    children: Vec<[Option<usize>; 2]>,
}

impl Flat {
    fn build(tree: &BinaryTree) -> VizResult<Self> {
        let mut flat = Self {
            views: Vec::new(),
            children: Vec::new(),
        };
        flat.push(tree, None, None, 0)?;
        Ok(flat)
    }

    fn push(
        &mut self,
        tree: &BinaryTree,
        parent: Option<usize>,
        side: Option<TreeSide>,
        depth: u32,
    ) -> VizResult<usize> {
        if tree.value.trim().is_empty() {
            return Err(VizError::invalid_input("tree node labels cannot be empty"));
        }
        let idx = self.views.len();
        self.views.push(TreeNodeView {
            id: NodeId(idx as u32),
            label: tree.value.clone(),
            parent: parent.map(|p| NodeId(p as u32)),
            side,
            depth,
        });
        self.children.push([None, None]);

        if let Some(l) = &tree.left {
            let c = self.push(l, Some(idx), Some(TreeSide::Left), depth + 1)?;
            self.children[idx][0] = Some(c);
        }
        if let Some(r) = &tree.right {
            let c = self.push(r, Some(idx), Some(TreeSide::Right), depth + 1)?;
            self.children[idx][1] = Some(c);
        }
        Ok(idx)
    }

    fn depth_first(&self, order: TraversalOrder, at: Option<usize>, out: &mut Vec<usize>) {
        let Some(i) = at else { return };
        let [l, r] = self.children[i];
        match order {
            TraversalOrder::PreOrder => {
                out.push(i);
                self.depth_first(order, l, out);
                self.depth_first(order, r, out);
            }
            TraversalOrder::InOrder => {
                self.depth_first(order, l, out);
                out.push(i);
                self.depth_first(order, r, out);
            }
            TraversalOrder::PostOrder | TraversalOrder::LevelOrder => {
                self.depth_first(order, l, out);
                self.depth_first(order, r, out);
                out.push(i);
            }
        }
    }
}

/// Trace visiting every node of `tree` in `order`.
///
/// Emits a start step, one visit step per node and a completion step. Level order also records
/// the pending queue after each visit.
#[tracing::instrument(skip(tree))]
pub fn generate(
    order: TraversalOrder,
    tree: &BinaryTree,
    max_nodes: usize,
) -> VizResult<StepSequence> {
    let count = tree.len();
    if count > max_nodes {
        return Err(VizError::limit_exceeded(format!(
            "tree-traversal accepts at most {max_nodes} nodes, got {count}"
        )));
    }
    let flat = Flat::build(tree)?;

    // (visited node, queue after the visit)
    let visits: Vec<(usize, Vec<usize>)> = match order {
        TraversalOrder::LevelOrder => {
            let mut queue = VecDeque::from([0]);
            let mut out = Vec::with_capacity(count);
            while let Some(i) = queue.pop_front() {
                queue.extend(flat.children[i].iter().flatten());
                out.push((i, queue.iter().copied().collect()));
            }
            out
        }
        _ => {
            let mut path = Vec::with_capacity(count);
            flat.depth_first(order, Some(0), &mut path);
            path.into_iter().map(|i| (i, Vec::new())).collect()
        }
    };

    let mut rec = StepRecorder::new();
    let snapshot = |visited: &[usize], current: Option<usize>, frontier: &[usize]| {
        Snapshot::Traversal(TraversalSnapshot {
            order,
            nodes: flat.views.clone(),
            visited: visited.iter().map(|&i| NodeId(i as u32)).collect(),
            current: current.map(|i| NodeId(i as u32)),
            frontier: frontier.iter().map(|&i| NodeId(i as u32)).collect(),
        })
    };

    let queued: &[usize] = if order == TraversalOrder::LevelOrder {
        &[0]
    } else {
        &[]
    };
    rec.push(
        StepKind::TraversalStart,
        snapshot(&[], None, queued),
        format!("Starting {} traversal {}.", order.label(), order.rule()),
    );

    let mut visited = Vec::with_capacity(count);
    for (i, frontier) in &visits {
        visited.push(*i);
        rec.push(
            StepKind::TraversalVisit,
            snapshot(visited.as_slice(), Some(*i), frontier.as_slice()),
            format!(
                "Visiting '{}' ({} of {count}).",
                flat.views[*i].label,
                visited.len()
            ),
        );
    }

    let path = visited
        .iter()
        .map(|&i| flat.views[i].label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    rec.push(
        StepKind::TraversalComplete,
        snapshot(visited.as_slice(), None, &[]),
        format!("{} traversal complete: {path}.", order.label()),
    );
    Ok(rec.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/generate/traversal.rs"]
mod tests;
