//! Hierarchical (ranked) layout engine
//!
//! Every node gets a rank: 0 for nodes without incoming edges, otherwise
//! one more than the highest rank among its predecessors. Ranks are laid
//! out along the primary axis (x for left-to-right, y for top-to-bottom);
//! nodes sharing a rank are spread evenly across the cross axis in
//! insertion order.

use petgraph::graph::NodeIndex;

use tessera_core::{
    geometry::{Point, Size},
    semantic::LayoutDirection,
};

use crate::{
    graph::DiagramGraph,
    layout::{EdgeRouting, LayoutError},
};

/// Minimum free space between neighboring node boxes.
const MIN_GAP: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done(usize),
}

/// Computes the rank of every node, indexed like `graph.node_indices()`.
///
/// # Errors
///
/// Returns [`LayoutError::Cycle`] naming a node on the first cycle found.
pub fn compute_ranks(graph: &DiagramGraph<'_>) -> Result<Vec<usize>, LayoutError> {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];
    for idx in graph.node_indices() {
        rank_of(graph, idx, &mut marks)?;
    }

    Ok(marks
        .into_iter()
        .map(|mark| match mark {
            Mark::Done(rank) => rank,
            Mark::Unvisited | Mark::InProgress => 0,
        })
        .collect())
}

/// Depth-first walk over predecessors.
///
/// Reaching a node that is still in progress means the walk went around a
/// cycle back onto its own path.
fn rank_of(
    graph: &DiagramGraph<'_>,
    idx: NodeIndex,
    marks: &mut [Mark],
) -> Result<usize, LayoutError> {
    match marks[idx.index()] {
        Mark::Done(rank) => return Ok(rank),
        Mark::InProgress => {
            return Err(LayoutError::Cycle {
                node: graph.node(idx).id().clone(),
            });
        }
        Mark::Unvisited => {}
    }

    marks[idx.index()] = Mark::InProgress;
    let mut rank = 0;
    let predecessors: Vec<NodeIndex> = graph.predecessors(idx).collect();
    for pred in predecessors {
        rank = rank.max(rank_of(graph, pred, marks)? + 1);
    }
    marks[idx.index()] = Mark::Done(rank);

    Ok(rank)
}

/// Hierarchical layout engine implementation
#[derive(Debug, Default)]
pub struct Engine {
    direction: LayoutDirection,
    rank_spacing: f64,
    sibling_spacing: f64,
    padding: f64,
}

impl Engine {
    /// Create a new hierarchical layout engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis carrying the ranks
    pub fn set_direction(&mut self, direction: LayoutDirection) -> &mut Self {
        self.direction = direction;
        self
    }

    /// Set the distance between consecutive ranks
    pub fn set_rank_spacing(&mut self, spacing: f64) -> &mut Self {
        self.rank_spacing = spacing;
        self
    }

    /// Set the minimum slot size of nodes within a rank
    pub fn set_sibling_spacing(&mut self, spacing: f64) -> &mut Self {
        self.sibling_spacing = spacing;
        self
    }

    /// Set the space kept free around the nodes
    pub fn set_padding(&mut self, padding: f64) -> &mut Self {
        self.padding = padding;
        self
    }

    /// Splits a size into its (primary, cross) extents for this direction.
    fn extents(&self, size: Size) -> (f64, f64) {
        match self.direction {
            LayoutDirection::LeftToRight => (size.width(), size.height()),
            LayoutDirection::TopToBottom => (size.height(), size.width()),
        }
    }

    fn to_point(&self, primary: f64, cross: f64) -> Point {
        match self.direction {
            LayoutDirection::LeftToRight => Point::new(primary, cross),
            LayoutDirection::TopToBottom => Point::new(cross, primary),
        }
    }
}

impl super::Engine for Engine {
    fn calculate(
        &self,
        graph: &DiagramGraph<'_>,
        sizes: &[Size],
        canvas: Size,
    ) -> Result<Vec<Point>, LayoutError> {
        let ranks = compute_ranks(graph)?;
        let rank_count = ranks.iter().max().map_or(0, |max| max + 1);

        // Members of each rank, in insertion order
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        for (i, &rank) in ranks.iter().enumerate() {
            members[rank].push(i);
        }

        let (max_primary, max_cross) = sizes
            .iter()
            .map(|&size| self.extents(size))
            .fold((0.0_f64, 0.0_f64), |(p, c), (sp, sc)| (p.max(sp), c.max(sc)));

        let rank_step = self.rank_spacing.max(max_primary + MIN_GAP);
        let slot = self.sibling_spacing.max(max_cross + MIN_GAP);
        let widest_rank = members.iter().map(Vec::len).max().unwrap_or(0);
        let (_, canvas_cross) = self.extents(canvas);
        let cross_extent = (canvas_cross - 2.0 * self.padding).max(widest_rank as f64 * slot);

        let mut centers = vec![Point::default(); sizes.len()];
        for (rank, nodes) in members.iter().enumerate() {
            let primary = self.padding + max_primary / 2.0 + rank as f64 * rank_step;
            let rank_slot = cross_extent / nodes.len() as f64;
            for (j, &i) in nodes.iter().enumerate() {
                let cross = self.padding + rank_slot * (j as f64 + 0.5);
                centers[i] = self.to_point(primary, cross);
            }
        }

        Ok(centers)
    }

    fn routing(&self) -> EdgeRouting {
        EdgeRouting::Orthogonal
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::semantic::{DiagramBuilder, NodeId};

    use super::*;
    use crate::layout::{engines::Engine as _, node_size};

    fn engine(direction: LayoutDirection) -> Engine {
        let mut e = Engine::new();
        e.set_direction(direction)
            .set_rank_spacing(160.0)
            .set_sibling_spacing(80.0)
            .set_padding(40.0);
        e
    }

    fn chain() -> tessera_core::semantic::Diagram {
        DiagramBuilder::default()
            .node("input", "Input")
            .node("process", "Process")
            .node("validate", "Validate")
            .node("output", "Output")
            .edge("input", "process", None)
            .edge("process", "validate", None)
            .edge("validate", "output", None)
            .build()
            .unwrap()
    }

    fn sizes(graph: &DiagramGraph<'_>) -> Vec<Size> {
        graph.nodes().map(|n| node_size(n.label())).collect()
    }

    #[test]
    fn test_chain_ranks() {
        let diagram = chain();
        let graph = DiagramGraph::from_diagram(&diagram);
        assert_eq!(compute_ranks(&graph).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_rank_is_longest_path() {
        let diagram = DiagramBuilder::default()
            .node("a", "A")
            .node("b", "B")
            .node("c", "C")
            .edge("a", "b", None)
            .edge("b", "c", None)
            .edge("a", "c", None)
            .build()
            .unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        assert_eq!(compute_ranks(&graph).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_detected() {
        let diagram = DiagramBuilder::default()
            .node("a", "A")
            .node("b", "B")
            .node("c", "C")
            .edge("a", "b", None)
            .edge("b", "c", None)
            .edge("c", "a", None)
            .build()
            .unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        let err = compute_ranks(&graph).unwrap_err();
        assert!(matches!(err, LayoutError::Cycle { .. }));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let diagram = DiagramBuilder::default()
            .node("a", "A")
            .edge("a", "a", None)
            .build()
            .unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        assert_eq!(
            compute_ranks(&graph),
            Err(LayoutError::Cycle {
                node: NodeId::from("a")
            })
        );
    }

    #[test]
    fn test_left_to_right_positions() {
        let diagram = chain();
        let graph = DiagramGraph::from_diagram(&diagram);
        let centers = engine(LayoutDirection::LeftToRight)
            .calculate(&graph, &sizes(&graph), Size::new(600.0, 400.0))
            .unwrap();

        assert!(centers.windows(2).all(|w| w[0].x() < w[1].x()));
        // Single-node ranks sit in the middle of the cross extent
        assert!(centers.iter().all(|c| c.y() == 200.0));
    }

    #[test]
    fn test_top_to_bottom_siblings_spread() {
        let diagram = DiagramBuilder::default()
            .node("root", "Root")
            .node("left", "Left")
            .node("right", "Right")
            .edge("root", "left", None)
            .edge("root", "right", None)
            .build()
            .unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        let centers = engine(LayoutDirection::TopToBottom)
            .calculate(&graph, &sizes(&graph), Size::new(600.0, 400.0))
            .unwrap();

        assert!(centers[0].y() < centers[1].y());
        assert_eq!(centers[1].y(), centers[2].y());
        // Cross extent 520 split into two slots of 260
        assert_eq!(centers[1].x(), 170.0);
        assert_eq!(centers[2].x(), 430.0);
    }
}
