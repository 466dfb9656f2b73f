pub mod latlng;
pub mod segment;

pub use latlng::{LatLng, ScreenPoint};
pub use segment::point_to_segment_distance;
