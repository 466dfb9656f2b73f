pub mod headless;

pub use headless::{HeadlessMap, ViewportConfig};

use crate::game::Plane;
use crate::geometry::{LatLng, ScreenPoint, point_to_segment_distance};

/// Handle to an overlay registered with a [`MapHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverlayId(pub u64);

/// Shapes the editor draws on top of the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Closed ring; the last vertex connects back to the first.
    Polygon(Vec<LatLng>),
    /// Draggable vertex handle.
    Vertex(LatLng),
}

/// What the editor needs from the map widget it draws on.
///
/// The widget owns rendering, pan/zoom and input; the editor only adds and
/// removes overlays and converts between pixel and display coordinates.
pub trait MapHost {
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId;

    /// Returns false if the overlay was not on the map.
    fn remove_overlay(&mut self, id: OverlayId) -> bool;

    /// Replace an overlay's geometry in place. Returns false if unknown.
    fn update_overlay(&mut self, id: OverlayId, overlay: Overlay) -> bool;

    fn container_point_to_lat_lng(&self, point: ScreenPoint) -> LatLng;

    fn lat_lng_to_layer_point(&self, latlng: LatLng) -> ScreenPoint;

    /// Size of the map container in pixels.
    fn size(&self) -> ScreenPoint;

    fn plane(&self) -> Plane;

    /// Show a transient message in the map's message box.
    fn add_message(&mut self, message: &str);

    fn point_to_segment_distance(&self, p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f64 {
        point_to_segment_distance(p, a, b)
    }

    /// Display position under the middle of the container.
    fn viewport_center(&self) -> LatLng {
        self.container_point_to_lat_lng(self.size().divide_by(2.0))
    }
}
