/// Horizontal distance between neighbouring leaves.
pub const LEAF_GAP: f64 = 60.0;
/// Vertical distance between tree levels.
pub const LEVEL_GAP: f64 = 80.0;

/// 2D position in layout units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal offset from the leftmost leaf.
    pub x: f64,
    /// Vertical offset from the root level.
    pub y: f64,
}

/// Deterministic tree layout over a parent table.
///
/// `parents[i]` is the parent of node `i`; children keep their index order. Leaves are spaced
/// [`LEAF_GAP`] apart left to right, each parent sits midway between its first and last child, and
/// `y` is `depth * LEVEL_GAP`. A parent index that does not precede its child is treated as a root.
pub fn tidy(parents: &[Option<usize>]) -> Vec<Point> {
    let n = parents.len();
    let mut children = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for (i, p) in parents.iter().enumerate() {
        match *p {
            Some(p) if p < i => children[p].push(i),
            _ => roots.push(i),
        }
    }

    let mut pos = vec![Point::default(); n];
    let mut next_leaf = 0.0;
    for root in roots {
        place(root, 0, &children, &mut pos, &mut next_leaf);
    }
    pos
}

fn place(
    node: usize,
    depth: u32,
    children: &[Vec<usize>],
    pos: &mut [Point],
    next_leaf: &mut f64,
) {
    let kids = &children[node];
    let x = match (kids.first(), kids.last()) {
        (Some(&first), Some(&last)) => {
            for &k in kids {
                place(k, depth + 1, children, pos, next_leaf);
            }
            (pos[first].x + pos[last].x) / 2.0
        }
        _ => {
            let x = *next_leaf;
            *next_leaf += LEAF_GAP;
            x
        }
    };
    pos[node] = Point {
        x,
        y: f64::from(depth) * LEVEL_GAP,
    };
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
