pub mod script;

pub use script::{Action, SessionScript};

use serde::Serialize;
use tracing::{debug, info};

use crate::control::{ClickCopy, Clipboard, ControlState, Notifier, PolygonControl};
use crate::error::SessionError;
use crate::game::{GameCoord, Plane};
use crate::error::ClipboardError;
use crate::host::{HeadlessMap, MapHost, ViewportConfig};
use crate::polygon::{PolygonEvent, PolygonOptions};

/// Outcome of replaying a script.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub state: ControlState,
    pub plane: Plane,
    pub vertex_count: usize,
    pub vertices: Vec<GameCoord>,
    pub vertices_text: String,
    pub messages: Vec<String>,
    /// Blocking warnings shown to the user, e.g. a rejected delete.
    pub alerts: Vec<String>,
    /// Texts the clipboard accepted, oldest first.
    pub copied: Vec<String>,
}

/// Passes writes through to the caller's clipboard and keeps the accepted ones.
struct RecordingClipboard<'a> {
    inner: &'a mut dyn Clipboard,
    copied: &'a mut Vec<String>,
}

impl Clipboard for RecordingClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.write_text(text)?;
        self.copied.push(text.to_string());
        Ok(())
    }
}

/// Passes alerts through to the caller's notifier and keeps a copy.
struct RecordingAlerts<'a> {
    inner: &'a mut dyn Notifier,
    alerts: &'a mut Vec<String>,
}

impl Notifier for RecordingAlerts<'_> {
    fn alert(&mut self, message: &str) {
        self.inner.alert(message);
        self.alerts.push(message.to_string());
    }
}

/// A headless map with the polygon and click-copy controls installed.
#[derive(Debug)]
pub struct Session {
    map: HeadlessMap,
    control: PolygonControl,
    click_copy: ClickCopy,
    alerts: Vec<String>,
    copied: Vec<String>,
}

impl Session {
    pub fn new(viewport: &ViewportConfig, options: PolygonOptions) -> Self {
        Self {
            map: HeadlessMap::new(viewport),
            control: PolygonControl::new(options),
            click_copy: ClickCopy,
            alerts: Vec::new(),
            copied: Vec::new(),
        }
    }

    pub fn map(&self) -> &HeadlessMap {
        &self.map
    }

    pub fn control(&self) -> &PolygonControl {
        &self.control
    }

    /// Replay every action in order, stopping at the first failure.
    pub fn run(
        &mut self,
        actions: &[Action],
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> Result<SessionReport, SessionError> {
        info!(actions = actions.len(), "replaying session");
        for (step, action) in actions.iter().enumerate() {
            self.apply(step, action, clipboard, notifier)?;
        }
        Ok(self.report())
    }

    pub fn apply(
        &mut self,
        step: usize,
        action: &Action,
        clipboard: &mut dyn Clipboard,
        notifier: &mut dyn Notifier,
    ) -> Result<(), SessionError> {
        debug!(step, ?action, "applying action");

        let event = match *action {
            Action::Expand => {
                self.control
                    .expand(&mut self.map)
                    .map_err(|source| SessionError::Polygon { step, source })?;
                return Ok(());
            }
            Action::Collapse => {
                self.control.collapse(&mut self.map);
                return Ok(());
            }
            Action::SetPlane { plane } => {
                self.map.set_plane(plane);
                self.control.refresh(&self.map);
                return Ok(());
            }
            Action::Copy => {
                self.require_expanded(step, action)?;
                let mut clipboard = RecordingClipboard {
                    inner: clipboard,
                    copied: &mut self.copied,
                };
                self.control.copy_vertices(&mut self.map, &mut clipboard);
                return Ok(());
            }
            Action::DoubleClick { at, ctrl } => {
                let mut clipboard = RecordingClipboard {
                    inner: clipboard,
                    copied: &mut self.copied,
                };
                self.click_copy
                    .on_double_click(&mut self.map, &mut clipboard, at, ctrl);
                return Ok(());
            }
            Action::Drag { index, at } => PolygonEvent::VertexDrag { index, position: at },
            Action::DragEnd { index, at } => PolygonEvent::VertexDragEnd { index, position: at },
            Action::ClickVertex { index } => PolygonEvent::VertexClick { index },
            Action::ClickBody { at } => PolygonEvent::BodyClick { position: at },
        };

        self.require_expanded(step, action)?;
        let mut notifier = RecordingAlerts {
            inner: notifier,
            alerts: &mut self.alerts,
        };
        self.control
            .handle(&mut self.map, &mut notifier, event)
            .map_err(|source| SessionError::Polygon { step, source })?;
        Ok(())
    }

    pub fn report(&self) -> SessionReport {
        let vertices = self.control.game_vertices();
        SessionReport {
            state: self.control.state(),
            plane: self.map.plane(),
            vertex_count: self.control.polygon().map_or(0, |p| p.len()),
            vertices,
            vertices_text: self.control.vertices_text(),
            messages: self.map.messages().to_vec(),
            alerts: self.alerts.clone(),
            copied: self.copied.clone(),
        }
    }

    fn require_expanded(&self, step: usize, action: &Action) -> Result<(), SessionError> {
        if self.control.state() == ControlState::Expanded {
            Ok(())
        } else {
            Err(SessionError::ControlCollapsed {
                step,
                action: action.name(),
            })
        }
    }
}
