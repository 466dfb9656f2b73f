use tracing::{error, warn};

use super::Clipboard;
use crate::game::{GameCoord, format_click_copy};
use crate::geometry::LatLng;
use crate::host::MapHost;

/// Copies the tile under a ctrl+double-click as `[x,y], plane`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClickCopy;

impl ClickCopy {
    /// Handle a double-click at `position`. Without ctrl this does nothing.
    ///
    /// Returns the copied text when the clipboard accepted it.
    pub fn on_double_click(
        &self,
        map: &mut dyn MapHost,
        clipboard: &mut dyn Clipboard,
        position: LatLng,
        ctrl: bool,
    ) -> Option<String> {
        if !ctrl {
            return None;
        }
        if !position.is_within_bounds() {
            warn!(lat = position.lat, lng = position.lng, "double-click outside the map");
            return None;
        }

        let plane = map.plane();
        let text = format_click_copy(GameCoord::from_display_unshifted(position), plane);
        match clipboard.write_text(&text) {
            Ok(()) => {
                map.add_message(&format!("Copied to clipboard: {}", text));
                Some(text)
            }
            Err(err) => {
                error!(error = %err, "Cannot copy text to clipboard");
                None
            }
        }
    }
}
