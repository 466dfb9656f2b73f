pub mod coord;
pub mod format;

pub use coord::{GameCoord, Plane};
pub use format::{format_click_copy, format_vertex_list};
