//! Circular layout engine
//!
//! Places nodes evenly on a circle centered on the canvas, in insertion
//! order, starting at 3 o'clock and going clockwise.

use std::f64::consts::TAU;

use tessera_core::geometry::{Point, Size};

use crate::{graph::DiagramGraph, layout::LayoutError};

/// Distance kept between the circle and the canvas edge.
pub const DEFAULT_MARGIN: f64 = 60.0;

/// Circular layout engine implementation
#[derive(Debug, Default)]
pub struct Engine {
    margin: f64,
}

impl Engine {
    /// Create a new circular layout engine
    pub fn new() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
        }
    }

    /// Set the distance between the circle and the canvas edge
    pub fn set_margin(&mut self, margin: f64) -> &mut Self {
        self.margin = margin;
        self
    }

    /// Radius of the circle on a canvas of `canvas` size.
    pub fn radius(&self, canvas: Size) -> f64 {
        (canvas.width().min(canvas.height()) / 2.0 - self.margin).max(0.0)
    }
}

impl super::Engine for Engine {
    fn calculate(
        &self,
        graph: &DiagramGraph<'_>,
        _sizes: &[Size],
        canvas: Size,
    ) -> Result<Vec<Point>, LayoutError> {
        let count = graph.node_count();
        let center = Point::new(canvas.width() / 2.0, canvas.height() / 2.0);
        let radius = self.radius(canvas);

        Ok((0..count)
            .map(|i| Point::on_circle(center, radius, TAU * i as f64 / count as f64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use tessera_core::semantic::DiagramBuilder;

    use super::*;
    use crate::layout::engines::Engine as _;

    #[test]
    fn test_five_nodes_evenly_spaced() {
        let diagram = ["a", "b", "c", "d", "e"]
            .into_iter()
            .fold(DiagramBuilder::default(), |builder, id| builder.node(id, id))
            .build()
            .unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        let canvas = Size::new(600.0, 400.0);
        let centers = Engine::new().calculate(&graph, &[], canvas).unwrap();

        let center = Point::new(300.0, 200.0);
        assert_eq!(centers.len(), 5);
        for (i, point) in centers.iter().enumerate() {
            assert!(approx_eq!(f64, point.distance(center), 140.0, epsilon = 1e-9));

            let offset = point.sub_point(center);
            let angle = offset.y().atan2(offset.x()).to_degrees().rem_euclid(360.0);
            let expected = 72.0 * i as f64;
            assert!(
                approx_eq!(f64, angle, expected, epsilon = 1e-6)
                    || approx_eq!(f64, angle, expected + 360.0, epsilon = 1e-6)
            );
        }
    }

    #[test]
    fn test_single_node_at_angle_zero() {
        let diagram = DiagramBuilder::default().node("solo", "Solo").build().unwrap();
        let graph = DiagramGraph::from_diagram(&diagram);
        let centers = Engine::new()
            .calculate(&graph, &[], Size::new(600.0, 400.0))
            .unwrap();
        assert_eq!(centers, vec![Point::new(440.0, 200.0)]);
    }

    #[test]
    fn test_radius_never_negative() {
        assert_eq!(Engine::new().radius(Size::new(100.0, 80.0)), 0.0);
    }
}
