use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, error};

use super::{Clipboard, Notifier};
use crate::error::PolygonError;
use crate::game::{GameCoord, Plane, format_vertex_list};
use crate::geometry::LatLng;
use crate::host::MapHost;
use crate::polygon::{DraggablePolygon, GeometryObserver, PolygonEvent, PolygonOptions};

/// Distance in display units from the viewport centre to the corners of
/// the polygon created on expand.
pub const DEFAULT_TRIANGLE_OFFSET: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    #[default]
    Collapsed,
    Expanded,
}

/// Text readout of the polygon's vertices in game coordinates.
#[derive(Debug, Default, Clone)]
pub struct VertexListPanel {
    vertices: Vec<GameCoord>,
    text: String,
}

impl VertexListPanel {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vertices(&self) -> &[GameCoord] {
        &self.vertices
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.text.clear();
    }
}

impl GeometryObserver for VertexListPanel {
    fn geometry_changed(&mut self, vertices: &[LatLng], plane: Plane) {
        self.vertices = vertices
            .iter()
            .map(|&p| GameCoord::from_display(p, plane))
            .collect();
        self.text = format_vertex_list(&self.vertices);
    }
}

/// Toggleable panel owning at most one editable polygon.
///
/// Expanding always starts from a fresh triangle around the viewport
/// centre; collapsing throws the polygon away.
#[derive(Debug)]
pub struct PolygonControl {
    state: ControlState,
    options: PolygonOptions,
    polygon: Option<DraggablePolygon>,
    panel: Rc<RefCell<VertexListPanel>>,
}

impl PolygonControl {
    pub fn new(options: PolygonOptions) -> Self {
        Self {
            state: ControlState::Collapsed,
            options,
            polygon: None,
            panel: Rc::new(RefCell::new(VertexListPanel::default())),
        }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn polygon(&self) -> Option<&DraggablePolygon> {
        self.polygon.as_ref()
    }

    pub fn vertices_text(&self) -> String {
        self.panel.borrow().text().to_string()
    }

    pub fn game_vertices(&self) -> Vec<GameCoord> {
        self.panel.borrow().vertices().to_vec()
    }

    /// Default triangle for a viewport centred on `center`.
    pub fn default_triangle(center: LatLng) -> [LatLng; 3] {
        let d = DEFAULT_TRIANGLE_OFFSET;
        [
            center.offset(-d, -d),
            center.offset(-d, d),
            center.offset(d, 0.0),
        ]
    }

    pub fn expand(&mut self, map: &mut dyn MapHost) -> Result<(), PolygonError> {
        self.discard_polygon(map);

        let center = map.viewport_center();
        let mut polygon = DraggablePolygon::new(&Self::default_triangle(center), self.options)?;
        polygon.attach(map)?;
        polygon.subscribe(self.panel.clone());
        self.polygon = Some(polygon);
        self.state = ControlState::Expanded;
        self.refresh(map);

        debug!(lat = center.lat, lng = center.lng, "polygon control expanded");
        Ok(())
    }

    pub fn collapse(&mut self, map: &mut dyn MapHost) {
        self.discard_polygon(map);
        self.panel.borrow_mut().clear();
        self.state = ControlState::Collapsed;
        debug!("polygon control collapsed");
    }

    pub fn toggle(&mut self, map: &mut dyn MapHost) -> Result<ControlState, PolygonError> {
        match self.state {
            ControlState::Collapsed => self.expand(map)?,
            ControlState::Expanded => self.collapse(map),
        }
        Ok(self.state)
    }

    /// Forward an input event to the polygon.
    ///
    /// A delete below the vertex minimum is reported through `notifier` and
    /// leaves the polygon untouched.
    pub fn handle(
        &mut self,
        map: &mut dyn MapHost,
        notifier: &mut dyn Notifier,
        event: PolygonEvent,
    ) -> Result<Option<usize>, PolygonError> {
        let polygon = self.polygon.as_mut().ok_or(PolygonError::NotAttached)?;
        match polygon.handle(map, event) {
            Err(err @ PolygonError::MinimumVertices) => {
                notifier.alert(&err.to_string());
                Ok(None)
            }
            other => other,
        }
    }

    /// Recompute the readout, e.g. after the map switched planes.
    pub fn refresh(&mut self, map: &dyn MapHost) {
        if let Some(polygon) = &self.polygon {
            self.panel
                .borrow_mut()
                .geometry_changed(&polygon.positions(), map.plane());
        }
    }

    /// Copy the readout. Failures are logged, never alerted.
    pub fn copy_vertices(&self, map: &mut dyn MapHost, clipboard: &mut dyn Clipboard) -> bool {
        let text = self.vertices_text();
        match clipboard.write_text(&text) {
            Ok(()) => {
                map.add_message(&format!("Copied to clipboard: {}", text));
                true
            }
            Err(err) => {
                error!(error = %err, "Cannot copy text to clipboard");
                false
            }
        }
    }

    fn discard_polygon(&mut self, map: &mut dyn MapHost) {
        if let Some(mut polygon) = self.polygon.take() {
            if let Err(err) = polygon.detach(map) {
                debug!(error = %err, "discarding unattached polygon");
            }
        }
    }
}

impl Default for PolygonControl {
    fn default() -> Self {
        Self::new(PolygonOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{FailingClipboard, MemoryClipboard, RecordingNotifier};
    use crate::host::{HeadlessMap, ViewportConfig};

    fn map_at(center: LatLng, plane: i64) -> HeadlessMap {
        HeadlessMap::new(&ViewportConfig {
            center,
            plane: Plane::new(plane).unwrap(),
            ..Default::default()
        })
    }

    #[test]
    fn test_expand_builds_default_triangle() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();

        assert_eq!(control.state(), ControlState::Expanded);
        let polygon = control.polygon().unwrap();
        assert_eq!(
            polygon.positions(),
            vec![
                LatLng::new(-32.0, -32.0),
                LatLng::new(-32.0, 32.0),
                LatLng::new(32.0, 0.0),
            ]
        );
        assert_eq!(control.game_vertices().len(), 3);
        assert_eq!(
            control.vertices_text(),
            "[[-4224,50558],[-3968,50558],[-4096,50302]]"
        );
    }

    #[test]
    fn test_collapse_discards_polygon() {
        let mut map = map_at(LatLng::new(100.0, 100.0), 0);
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();
        control.collapse(&mut map);

        assert_eq!(control.state(), ControlState::Collapsed);
        assert!(control.polygon().is_none());
        assert_eq!(map.overlay_count(), 0);
        assert!(control.vertices_text().is_empty());
    }

    #[test]
    fn test_re_expand_starts_fresh() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut notifier = RecordingNotifier::default();
        let mut control = PolygonControl::default();

        control.expand(&mut map).unwrap();
        control
            .handle(
                &mut map,
                &mut notifier,
                PolygonEvent::BodyClick {
                    position: LatLng::new(-32.0, 0.0),
                },
            )
            .unwrap();
        assert_eq!(control.polygon().unwrap().len(), 4);

        control.collapse(&mut map);
        control.expand(&mut map).unwrap();
        assert_eq!(
            control.polygon().unwrap().positions(),
            PolygonControl::default_triangle(LatLng::new(0.0, 0.0)).to_vec()
        );
        assert_eq!(map.overlay_count(), 4);
    }

    #[test]
    fn test_expand_twice_replaces_polygon() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();
        control.expand(&mut map).unwrap();
        assert_eq!(map.overlay_count(), 4);
    }

    #[test]
    fn test_minimum_delete_alerts_without_change() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut notifier = RecordingNotifier::default();
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();
        let before = control.vertices_text();

        let result = control.handle(&mut map, &mut notifier, PolygonEvent::VertexClick { index: 0 });
        assert_eq!(result, Ok(None));
        assert_eq!(
            notifier.alerts,
            vec!["A polygon must have at least 3 vertices.".to_string()]
        );
        assert_eq!(control.vertices_text(), before);
    }

    #[test]
    fn test_events_while_collapsed_fail() {
        let mut map = HeadlessMap::default();
        let mut notifier = RecordingNotifier::default();
        let mut control = PolygonControl::default();
        let result = control.handle(&mut map, &mut notifier, PolygonEvent::VertexClick { index: 0 });
        assert_eq!(result, Err(PolygonError::NotAttached));
    }

    #[test]
    fn test_readout_follows_drag_end() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut notifier = RecordingNotifier::default();
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();

        control
            .handle(
                &mut map,
                &mut notifier,
                PolygonEvent::VertexDragEnd {
                    index: 2,
                    position: LatLng::new(40.4, 0.6),
                },
            )
            .unwrap();
        assert_eq!(control.game_vertices()[2], GameCoord::new(-4092, 50270));
    }

    #[test]
    fn test_refresh_applies_plane_offset() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();
        let x0 = control.game_vertices()[0].x;

        map.set_plane(Plane::new(1).unwrap());
        control.refresh(&map);
        assert_eq!(control.game_vertices()[0].x, x0 + 13056);
    }

    #[test]
    fn test_copy_vertices_posts_message() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut clipboard = MemoryClipboard::new();
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();

        assert!(control.copy_vertices(&mut map, &mut clipboard));
        assert_eq!(clipboard.latest(), Some(control.vertices_text().as_str()));
        assert_eq!(
            map.messages().last().unwrap(),
            &format!("Copied to clipboard: {}", control.vertices_text())
        );
    }

    #[test]
    fn test_copy_failure_is_silent_for_user() {
        let mut map = map_at(LatLng::new(0.0, 0.0), 0);
        let mut clipboard = FailingClipboard::new("clipboard unavailable");
        let mut control = PolygonControl::default();
        control.expand(&mut map).unwrap();

        assert!(!control.copy_vertices(&mut map, &mut clipboard));
        assert!(map.messages().is_empty());
    }

    #[test]
    fn test_toggle_cycles_states() {
        let mut map = HeadlessMap::default();
        let mut control = PolygonControl::default();
        assert_eq!(control.toggle(&mut map), Ok(ControlState::Expanded));
        assert_eq!(control.toggle(&mut map), Ok(ControlState::Collapsed));
    }
}
