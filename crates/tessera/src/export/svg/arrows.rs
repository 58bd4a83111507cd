use svg::node::element::{Definitions, Marker, Path};

use tessera_core::{color::Paint, geometry::Point};

/// Id of the arrowhead marker shared by every diagram edge.
pub const ARROW_MARKER_ID: &str = "ts-arrow";

/// Creates the arrowhead marker definition, filled with `paint`.
pub fn create_marker_definitions(paint: &Paint) -> Definitions {
    let arrow = Marker::new()
        .set("id", ARROW_MARKER_ID)
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", paint),
        );

    Definitions::new().add(arrow)
}

/// `marker-end` reference to the arrowhead marker.
pub fn marker_end() -> String {
    format!("url(#{ARROW_MARKER_ID})")
}

/// Create a path data string from two points
pub fn create_path_data_from_points(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

/// Create an orthogonal path data string from two points
///
/// The path leaves `start` along the dominant axis, turns halfway, and
/// enters `end` along the same axis.
pub fn create_orthogonal_path_data_from_points(start: Point, end: Point) -> String {
    let abs_dist = end.sub_point(start).abs();
    let mid = start.midpoint(end);

    if abs_dist.x() > abs_dist.y() {
        format!(
            "M {} {} L {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            mid.x(),
            start.y(),
            mid.x(),
            end.y(),
            end.x(),
            end.y()
        )
    } else {
        format!(
            "M {} {} L {} {} L {} {} L {} {}",
            start.x(),
            start.y(),
            start.x(),
            mid.y(),
            end.x(),
            mid.y(),
            end.x(),
            end.y()
        )
    }
}
