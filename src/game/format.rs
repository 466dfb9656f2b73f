use super::{GameCoord, Plane};

/// Render a vertex list as compact JSON, e.g. `[[100,200],[105,210],[98,215]]`.
pub fn format_vertex_list(vertices: &[GameCoord]) -> String {
    // A slice of integer pairs always serializes.
    serde_json::to_string(vertices).unwrap_or_else(|_| String::from("[]"))
}

/// Render a single tile address the way the click-copy readout does: `[x,y], plane`.
pub fn format_click_copy(coord: GameCoord, plane: Plane) -> String {
    format!("[{},{}], {}", coord.x, coord.y, plane)
}
