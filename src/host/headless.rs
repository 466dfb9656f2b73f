use std::collections::BTreeMap;

use serde::Deserialize;

use super::{MapHost, Overlay, OverlayId};
use crate::game::Plane;
use crate::geometry::{LatLng, ScreenPoint};

fn default_zoom() -> i32 {
    2
}
fn default_width() -> f64 {
    1024.0
}
fn default_height() -> f64 {
    768.0
}

/// Viewport a [`HeadlessMap`] starts with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewportConfig {
    #[serde(default)]
    pub center: LatLng,
    #[serde(default = "default_zoom")]
    pub zoom: i32,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub plane: Plane,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            center: LatLng::default(),
            zoom: default_zoom(),
            width: default_width(),
            height: default_height(),
            plane: Plane::default(),
        }
    }
}

/// In-memory map host using a flat CRS.
///
/// Layer points are display coordinates scaled by `2^zoom` with the lat
/// axis flipped, so north is up. Container points are layer points shifted
/// so the viewport centre sits in the middle of the container.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    center: LatLng,
    zoom: i32,
    size: ScreenPoint,
    plane: Plane,
    overlays: BTreeMap<OverlayId, Overlay>,
    next_id: u64,
    messages: Vec<String>,
}

impl HeadlessMap {
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            center: config.center,
            zoom: config.zoom,
            size: ScreenPoint::new(config.width, config.height),
            plane: config.plane,
            overlays: BTreeMap::new(),
            next_id: 0,
            messages: Vec::new(),
        }
    }

    pub fn set_view(&mut self, center: LatLng, zoom: i32) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.get(&id)
    }

    pub fn overlays(&self) -> impl Iterator<Item = (&OverlayId, &Overlay)> {
        self.overlays.iter()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    fn scale(&self) -> f64 {
        2f64.powi(self.zoom)
    }

    fn pixel_origin(&self) -> ScreenPoint {
        let c = self.lat_lng_to_layer_point(self.center);
        ScreenPoint::new(c.x - self.size.x / 2.0, c.y - self.size.y / 2.0)
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new(&ViewportConfig::default())
    }
}

impl MapHost for HeadlessMap {
    fn add_overlay(&mut self, overlay: Overlay) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.overlays.insert(id, overlay);
        id
    }

    fn remove_overlay(&mut self, id: OverlayId) -> bool {
        self.overlays.remove(&id).is_some()
    }

    fn update_overlay(&mut self, id: OverlayId, overlay: Overlay) -> bool {
        match self.overlays.get_mut(&id) {
            Some(slot) => {
                *slot = overlay;
                true
            }
            None => false,
        }
    }

    fn container_point_to_lat_lng(&self, point: ScreenPoint) -> LatLng {
        let origin = self.pixel_origin();
        let scale = self.scale();
        let layer = ScreenPoint::new(point.x + origin.x, point.y + origin.y);
        LatLng::new(-layer.y / scale, layer.x / scale)
    }

    fn lat_lng_to_layer_point(&self, latlng: LatLng) -> ScreenPoint {
        let scale = self.scale();
        ScreenPoint::new(latlng.lng * scale, -latlng.lat * scale)
    }

    fn size(&self) -> ScreenPoint {
        self.size
    }

    fn plane(&self) -> Plane {
        self.plane
    }

    fn add_message(&mut self, message: &str) {
        tracing::info!("{}", message);
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_center_round_trip() {
        let config = ViewportConfig {
            center: LatLng::new(800.0, 1600.0),
            zoom: 3,
            ..Default::default()
        };
        let map = HeadlessMap::new(&config);

        let c = map.viewport_center();
        assert!((c.lat - 800.0).abs() < 1e-9);
        assert!((c.lng - 1600.0).abs() < 1e-9);
    }

    #[test]
    fn test_layer_point_scales_with_zoom() {
        let mut map = HeadlessMap::default();
        map.set_view(LatLng::default(), 0);
        assert_eq!(
            map.lat_lng_to_layer_point(LatLng::new(1.0, 2.0)),
            ScreenPoint::new(2.0, -1.0)
        );

        map.set_view(LatLng::default(), 2);
        assert_eq!(
            map.lat_lng_to_layer_point(LatLng::new(1.0, 2.0)),
            ScreenPoint::new(8.0, -4.0)
        );
    }

    #[test]
    fn test_container_top_left_is_north_west() {
        let map = HeadlessMap::new(&ViewportConfig {
            zoom: 0,
            width: 100.0,
            height: 50.0,
            ..Default::default()
        });

        let nw = map.container_point_to_lat_lng(ScreenPoint::new(0.0, 0.0));
        assert_eq!(nw, LatLng::new(25.0, -50.0));
    }

    #[test]
    fn test_overlay_bookkeeping() {
        let mut map = HeadlessMap::default();
        let a = map.add_overlay(Overlay::Vertex(LatLng::new(1.0, 1.0)));
        let b = map.add_overlay(Overlay::Vertex(LatLng::new(2.0, 2.0)));
        assert_ne!(a, b);
        assert_eq!(map.overlay_count(), 2);

        assert!(map.update_overlay(a, Overlay::Vertex(LatLng::new(5.0, 5.0))));
        assert_eq!(map.overlay(a), Some(&Overlay::Vertex(LatLng::new(5.0, 5.0))));

        assert!(map.remove_overlay(a));
        assert!(!map.remove_overlay(a));
        assert!(!map.update_overlay(a, Overlay::Vertex(LatLng::default())));
        assert_eq!(map.overlay_count(), 1);
    }

    #[test]
    fn test_messages_are_recorded() {
        let mut map = HeadlessMap::default();
        map.add_message("hello");
        assert_eq!(map.messages(), ["hello".to_string()]);
    }
}
