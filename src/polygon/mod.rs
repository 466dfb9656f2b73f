pub mod draggable;
pub mod vertex;

pub use draggable::{
    DraggablePolygon, EdgeMetric, GeometryObserver, MIN_VERTICES, PolygonEvent, PolygonOptions,
};
pub use vertex::Vertex;
