use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::Vertex;
use crate::error::PolygonError;
use crate::game::Plane;
use crate::geometry::{LatLng, ScreenPoint};
use crate::host::{MapHost, Overlay, OverlayId};

/// Fewest vertices a polygon may have.
pub const MIN_VERTICES: usize = 3;

/// Receives the polygon's geometry after every change.
pub trait GeometryObserver {
    fn geometry_changed(&mut self, vertices: &[LatLng], plane: Plane);
}

/// Space in which edge distances are measured when inserting a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMetric {
    /// Pixel distance in the map's layer space; depends on the zoom level.
    #[default]
    LayerPixels,
    /// Distance in display coordinates; the same at every zoom level.
    Display,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PolygonOptions {
    pub edge_metric: EdgeMetric,
}

/// Input the map widget forwards to the polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonEvent {
    VertexDrag { index: usize, position: LatLng },
    VertexDragEnd { index: usize, position: LatLng },
    VertexClick { index: usize },
    BodyClick { position: LatLng },
}

/// Closed polygon whose vertices can be dragged, inserted and deleted.
pub struct DraggablePolygon {
    vertices: Vec<Vertex>,
    options: PolygonOptions,
    shape: Option<OverlayId>,
    observer: Option<Rc<RefCell<dyn GeometryObserver>>>,
}

impl fmt::Debug for DraggablePolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggablePolygon")
            .field("vertices", &self.vertices)
            .field("options", &self.options)
            .field("shape", &self.shape)
            .field("subscribed", &self.observer.is_some())
            .finish()
    }
}

impl DraggablePolygon {
    /// Build a polygon and one vertex handle per position. Nothing is drawn
    /// until [`attach`](Self::attach) is called.
    pub fn new(positions: &[LatLng], options: PolygonOptions) -> Result<Self, PolygonError> {
        if positions.len() < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices {
                min: MIN_VERTICES,
                got: positions.len(),
            });
        }
        for &p in positions {
            check_position(p)?;
        }

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Vertex::new(p, i))
            .collect();

        Ok(Self {
            vertices,
            options,
            shape: None,
            observer: None,
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn positions(&self) -> Vec<LatLng> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn is_attached(&self) -> bool {
        self.shape.is_some()
    }

    pub fn shape_overlay(&self) -> Option<OverlayId> {
        self.shape
    }

    pub fn options(&self) -> PolygonOptions {
        self.options
    }

    /// Draw the shape and every vertex handle on `map`.
    pub fn attach(&mut self, map: &mut dyn MapHost) -> Result<(), PolygonError> {
        if self.is_attached() {
            return Err(PolygonError::AlreadyAttached);
        }

        self.shape = Some(map.add_overlay(Overlay::Polygon(self.positions())));
        for vertex in &mut self.vertices {
            vertex.overlay = Some(map.add_overlay(Overlay::Vertex(vertex.position)));
        }

        debug!(vertices = self.vertices.len(), "polygon attached");
        Ok(())
    }

    /// Remove the shape and all handles from `map` and drop the observer.
    pub fn detach(&mut self, map: &mut dyn MapHost) -> Result<(), PolygonError> {
        let shape = self.shape.take().ok_or(PolygonError::NotAttached)?;

        for vertex in &mut self.vertices {
            if let Some(id) = vertex.overlay.take() {
                map.remove_overlay(id);
            }
        }
        map.remove_overlay(shape);
        self.observer = None;

        debug!("polygon detached");
        Ok(())
    }

    /// Register the single geometry observer, replacing any previous one.
    pub fn subscribe(&mut self, observer: Rc<RefCell<dyn GeometryObserver>>) {
        self.observer = Some(observer);
    }

    pub fn unsubscribe(&mut self) {
        self.observer = None;
    }

    /// Route an input event to its handler.
    ///
    /// Returns the index of the vertex created by a body click, if any.
    pub fn handle(
        &mut self,
        map: &mut dyn MapHost,
        event: PolygonEvent,
    ) -> Result<Option<usize>, PolygonError> {
        match event {
            PolygonEvent::VertexDrag { index, position } => {
                self.on_vertex_drag(map, index, position).map(|_| None)
            }
            PolygonEvent::VertexDragEnd { index, position } => {
                self.on_vertex_drag_end(map, index, position).map(|_| None)
            }
            PolygonEvent::VertexClick { index } => {
                self.on_vertex_click(map, index).map(|_| None)
            }
            PolygonEvent::BodyClick { position } => self.on_body_click(map, position).map(Some),
        }
    }

    /// Follow a vertex mid-drag. The position is not snapped.
    pub fn on_vertex_drag(
        &mut self,
        map: &mut dyn MapHost,
        index: usize,
        position: LatLng,
    ) -> Result<(), PolygonError> {
        self.check_vertex(index)?;
        check_position(position)?;
        self.move_vertex(map, index, position);
        self.notify(map.plane());
        Ok(())
    }

    /// Commit a finished drag, snapping the vertex onto the integer grid.
    pub fn on_vertex_drag_end(
        &mut self,
        map: &mut dyn MapHost,
        index: usize,
        position: LatLng,
    ) -> Result<(), PolygonError> {
        self.check_vertex(index)?;
        check_position(position)?;
        let snapped = position.snapped();
        self.move_vertex(map, index, snapped);

        debug!(index, lat = snapped.lat, lng = snapped.lng, "vertex moved");
        self.notify(map.plane());
        Ok(())
    }

    /// Delete a vertex, unless that would leave fewer than three.
    pub fn on_vertex_click(
        &mut self,
        map: &mut dyn MapHost,
        index: usize,
    ) -> Result<(), PolygonError> {
        self.check_vertex(index)?;
        if self.vertices.len() <= MIN_VERTICES {
            warn!(index, "refusing to delete vertex of a minimal polygon");
            return Err(PolygonError::MinimumVertices);
        }

        let removed = self.vertices.remove(index);
        if let Some(id) = removed.overlay {
            map.remove_overlay(id);
        }
        self.reindex();
        self.redraw_shape(map);

        debug!(index, remaining = self.vertices.len(), "vertex deleted");
        self.notify(map.plane());
        Ok(())
    }

    /// Insert a vertex at the snapped click position, on the nearest edge.
    ///
    /// Ties go to the lowest edge index. Returns the new vertex's index.
    pub fn on_body_click(
        &mut self,
        map: &mut dyn MapHost,
        position: LatLng,
    ) -> Result<usize, PolygonError> {
        if !self.is_attached() {
            return Err(PolygonError::NotAttached);
        }
        check_position(position)?;

        let snapped = position.snapped();
        let insert_at = self.nearest_edge(map, snapped);

        let mut vertex = Vertex::new(snapped, insert_at);
        vertex.overlay = Some(map.add_overlay(Overlay::Vertex(snapped)));
        self.vertices.insert(insert_at, vertex);
        self.reindex();
        self.redraw_shape(map);

        debug!(index = insert_at, lat = snapped.lat, lng = snapped.lng, "vertex inserted");
        self.notify(map.plane());
        Ok(insert_at)
    }

    /// Insertion index `i + 1` after the edge `v[i] -> v[(i + 1) % n]`
    /// closest to `point`.
    fn nearest_edge(&self, map: &dyn MapHost, point: LatLng) -> usize {
        let project = |p: LatLng| match self.options.edge_metric {
            EdgeMetric::LayerPixels => map.lat_lng_to_layer_point(p),
            EdgeMetric::Display => ScreenPoint::new(p.lng, p.lat),
        };

        let target = project(point);
        let n = self.vertices.len();
        let mut insert_at = 0;
        let mut min_distance = f64::INFINITY;

        for i in 0..n {
            let a = project(self.vertices[i].position);
            let b = project(self.vertices[(i + 1) % n].position);
            let distance = map.point_to_segment_distance(target, a, b);
            if distance < min_distance {
                min_distance = distance;
                insert_at = i + 1;
            }
        }

        insert_at
    }

    fn check_vertex(&self, index: usize) -> Result<(), PolygonError> {
        if !self.is_attached() {
            return Err(PolygonError::NotAttached);
        }
        if index >= self.vertices.len() {
            return Err(PolygonError::NoSuchVertex {
                index,
                len: self.vertices.len(),
            });
        }
        Ok(())
    }

    fn move_vertex(&mut self, map: &mut dyn MapHost, index: usize, position: LatLng) {
        let vertex = &mut self.vertices[index];
        vertex.position = position;
        if let Some(id) = vertex.overlay {
            map.update_overlay(id, Overlay::Vertex(position));
        }
        self.redraw_shape(map);
    }

    fn redraw_shape(&self, map: &mut dyn MapHost) {
        if let Some(id) = self.shape {
            map.update_overlay(id, Overlay::Polygon(self.positions()));
        }
    }

    fn reindex(&mut self) {
        for (i, vertex) in self.vertices.iter_mut().enumerate() {
            vertex.index = i;
        }
    }

    fn notify(&self, plane: Plane) {
        if let Some(observer) = &self.observer {
            let positions = self.positions();
            observer.borrow_mut().geometry_changed(&positions, plane);
        }
    }
}

fn check_position(position: LatLng) -> Result<(), PolygonError> {
    if position.is_within_bounds() {
        Ok(())
    } else {
        Err(PolygonError::InvalidPosition {
            lat: position.lat,
            lng: position.lng,
        })
    }
}
