pub mod clickcopy;
pub mod clipboard;
pub mod polygon_control;

pub use clickcopy::ClickCopy;
pub use clipboard::{
    Clipboard, FailingClipboard, FileClipboard, MemoryClipboard, Notifier, RecordingNotifier,
    StderrNotifier,
};
pub use polygon_control::{ControlState, DEFAULT_TRIANGLE_OFFSET, PolygonControl, VertexListPanel};
