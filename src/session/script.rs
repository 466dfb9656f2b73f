use serde::Deserialize;

use crate::error::SessionError;
use crate::game::Plane;
use crate::geometry::LatLng;
use crate::host::ViewportConfig;
use crate::polygon::EdgeMetric;

/// One user input in a session script.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Expand,
    Collapse,
    Drag { index: usize, at: LatLng },
    DragEnd { index: usize, at: LatLng },
    ClickVertex { index: usize },
    ClickBody { at: LatLng },
    SetPlane { plane: Plane },
    Copy,
    DoubleClick {
        at: LatLng,
        #[serde(default)]
        ctrl: bool,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Expand => "expand",
            Action::Collapse => "collapse",
            Action::Drag { .. } => "drag",
            Action::DragEnd { .. } => "drag_end",
            Action::ClickVertex { .. } => "click_vertex",
            Action::ClickBody { .. } => "click_body",
            Action::SetPlane { .. } => "set_plane",
            Action::Copy => "copy",
            Action::DoubleClick { .. } => "double_click",
        }
    }
}

/// A replayable list of actions with optional viewport overrides.
///
/// ```toml
/// [viewport]
/// center = [800.0, 1824.0]
/// zoom = 3
///
/// [[actions]]
/// type = "expand"
///
/// [[actions]]
/// type = "drag_end"
/// index = 0
/// at = [770.4, 1790.6]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionScript {
    #[serde(default)]
    pub viewport: Option<ViewportConfig>,
    #[serde(default)]
    pub edge_metric: Option<EdgeMetric>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl SessionScript {
    pub fn from_toml(contents: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(contents)?)
    }
}
