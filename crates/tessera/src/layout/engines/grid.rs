//! Manual layout engine with grid fallback
//!
//! Nodes that carry a user position keep it. The remaining nodes fill a
//! grid of `ceil(sqrt(n))` columns below every manually placed node, so the
//! two groups never overlap.

use tessera_core::geometry::{Point, Size};

use crate::{graph::DiagramGraph, layout::LayoutError};

/// Manual layout engine implementation
#[derive(Debug, Default)]
pub struct Engine {
    spacing: f64,
    padding: f64,
}

impl Engine {
    /// Create a new manual layout engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap between grid cells
    pub fn set_spacing(&mut self, spacing: f64) -> &mut Self {
        self.spacing = spacing;
        self
    }

    /// Set the offset of the grid from the canvas origin
    pub fn set_padding(&mut self, padding: f64) -> &mut Self {
        self.padding = padding;
        self
    }
}

impl super::Engine for Engine {
    fn calculate(
        &self,
        graph: &DiagramGraph<'_>,
        sizes: &[Size],
        _canvas: Size,
    ) -> Result<Vec<Point>, LayoutError> {
        let positions: Vec<Option<Point>> = graph.nodes().map(|n| n.position()).collect();

        let placed_bottom = positions
            .iter()
            .zip(sizes)
            .filter_map(|(position, size)| position.map(|p| p.y() + size.height() / 2.0))
            .reduce(f64::max);
        let top = placed_bottom.map_or(self.padding, |bottom| bottom + self.spacing);

        let unplaced = positions.iter().filter(|p| p.is_none()).count();
        let columns = (unplaced as f64).sqrt().ceil().max(1.0) as usize;

        let cell = sizes
            .iter()
            .zip(&positions)
            .filter(|(_, position)| position.is_none())
            .fold(Size::default(), |acc, (size, _)| acc.max(*size));
        let cell_width = cell.width() + self.spacing;
        let cell_height = cell.height() + self.spacing;

        let mut slot = 0;
        Ok(positions
            .into_iter()
            .map(|position| {
                position.unwrap_or_else(|| {
                    let (row, column) = (slot / columns, slot % columns);
                    slot += 1;
                    Point::new(
                        self.padding + cell.width() / 2.0 + column as f64 * cell_width,
                        top + cell.height() / 2.0 + row as f64 * cell_height,
                    )
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::{geometry::Bounds, semantic::DiagramBuilder};

    use super::*;
    use crate::layout::{engines::Engine as _, node_size};

    fn engine() -> Engine {
        let mut e = Engine::new();
        e.set_spacing(80.0).set_padding(40.0);
        e
    }

    fn layout(builder: DiagramBuilder) -> (Vec<Point>, Vec<Size>) {
        let diagram = builder.build().unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        let sizes: Vec<Size> = graph.nodes().map(|n| node_size(n.label())).collect();
        let centers = engine()
            .calculate(&graph, &sizes, Size::new(600.0, 400.0))
            .unwrap();
        (centers, sizes)
    }

    #[test]
    fn test_grid_fallback_columns() {
        let builder = ["a", "b", "c", "d", "e"]
            .into_iter()
            .fold(DiagramBuilder::default(), |b, id| b.node(id, id));
        let (centers, _) = layout(builder);

        // ceil(sqrt(5)) = 3 columns, cells 160 x 120
        assert_eq!(centers[0], Point::new(80.0, 60.0));
        assert_eq!(centers[1], Point::new(240.0, 60.0));
        assert_eq!(centers[2], Point::new(400.0, 60.0));
        assert_eq!(centers[3], Point::new(80.0, 180.0));
        assert_eq!(centers[4], Point::new(240.0, 180.0));
    }

    #[test]
    fn test_manual_positions_kept_and_grid_below() {
        let builder = DiagramBuilder::default()
            .node_at("fixed", "Fixed", Point::new(300.0, 100.0))
            .node("loose1", "Loose 1")
            .node("loose2", "Loose 2");
        let (centers, sizes) = layout(builder);

        assert_eq!(centers[0], Point::new(300.0, 100.0));
        // Grid starts below the fixed node's bottom edge (120) plus spacing
        assert_eq!(centers[1].y(), 220.0);

        let bounds: Vec<Bounds> = centers
            .iter()
            .zip(&sizes)
            .map(|(c, s)| c.to_bounds(*s))
            .collect();
        for (i, a) in bounds.iter().enumerate() {
            for b in &bounds[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let build = || {
            DiagramBuilder::default()
                .node("x", "X")
                .node("y", "Y")
                .node_at("z", "Z", Point::new(50.0, 50.0))
        };
        assert_eq!(layout(build()).0, layout(build()).0);
    }
}
