use crate::geometry::LatLng;
use crate::host::OverlayId;

/// A draggable corner of a [`super::DraggablePolygon`].
///
/// `index` always equals the vertex's position in the owning polygon's
/// sequence. Events coming from the handle carry that index back to the
/// polygon, so the vertex itself holds no reference to its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub(crate) position: LatLng,
    pub(crate) index: usize,
    pub(crate) overlay: Option<OverlayId>,
}

impl Vertex {
    pub(crate) fn new(position: LatLng, index: usize) -> Self {
        Self {
            position,
            index,
            overlay: None,
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Handle on the map, if the owning polygon is attached.
    pub fn overlay(&self) -> Option<OverlayId> {
        self.overlay
    }
}
