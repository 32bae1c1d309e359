//! Single input router for an editor.
//!
//! The browser forwards raw pointer, drag and key events; the router hit-tests
//! against the block list and returns what the surface should show next: a cursor
//! affordance and, sometimes, a toast notice.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::{Editor, EditorError};
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerHover { x: f64, y: f64 },
    DragStart { block_id: Uuid },
    DragMove { block_id: Uuid, x: f64, y: f64 },
    DragEnd { block_id: Uuid },
    DragCancel { block_id: Uuid },
    EditStart { block_id: Uuid },
    EditEnd {
        block_id: Uuid,
        #[serde(default)]
        text: Option<String>,
    },
    Key { key: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Dragging,
    SnapAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity, duration_ms: u64) -> Self {
        Notice {
            message: message.into(),
            severity,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Feedback {
    pub cursor: Cursor,
    pub notice: Option<Notice>,
}

impl Feedback {
    fn cursor(cursor: Cursor) -> Self {
        Feedback {
            cursor,
            notice: None,
        }
    }

    fn notice(notice: Notice) -> Self {
        Feedback {
            cursor: Cursor::Default,
            notice: Some(notice),
        }
    }
}

impl Editor {
    /// Routes one input event. Errors leave the editor unchanged.
    pub fn dispatch(&mut self, event: InputEvent) -> Result<Feedback, EditorError> {
        match event {
            InputEvent::PointerDown { x, y } => {
                match self.hit_test(Point::new(x, y)) {
                    Some(id) => {
                        self.select(id)?;
                        Ok(Feedback::cursor(Cursor::Pointer))
                    }
                    None => {
                        self.deselect();
                        Ok(Feedback::default())
                    }
                }
            }
            InputEvent::PointerHover { x, y } => {
                let hit = self.hit_test(Point::new(x, y));
                self.hover(hit);
                Ok(Feedback::cursor(if hit.is_some() {
                    Cursor::Pointer
                } else {
                    Cursor::Default
                }))
            }
            InputEvent::DragStart { block_id } => {
                self.begin_drag(block_id)?;
                Ok(Feedback::cursor(Cursor::Dragging))
            }
            InputEvent::DragMove { block_id, x, y } => {
                let can_snap = self.drag_move(block_id, Point::new(x, y))?;
                Ok(Feedback::cursor(if can_snap {
                    Cursor::SnapAvailable
                } else {
                    Cursor::Dragging
                }))
            }
            InputEvent::DragEnd { block_id } => {
                self.end_drag(block_id)?;
                Ok(Feedback::default())
            }
            InputEvent::DragCancel { block_id } => {
                self.cancel_drag(block_id)?;
                Ok(Feedback::default())
            }
            InputEvent::EditStart { block_id } => {
                self.begin_edit(block_id)?;
                Ok(Feedback::default())
            }
            InputEvent::EditEnd { block_id, text } => match self.end_edit(block_id, text)? {
                Some(_) => Ok(Feedback::notice(Notice::new(
                    "Text updated!",
                    Severity::Success,
                    2000,
                ))),
                None => Ok(Feedback::default()),
            },
            InputEvent::Key { key } => self.handle_key(&key),
        }
    }

    fn handle_key(&mut self, key: &str) -> Result<Feedback, EditorError> {
        // shortcuts are suspended while text is being edited
        if self.editing().is_some() {
            return Ok(Feedback::default());
        }

        match key {
            "Delete" => {
                let Some(id) = self.selected() else {
                    return Ok(Feedback::default());
                };
                let removed = self.delete_block(id)?;
                Ok(Feedback::notice(Notice::new(
                    format!("{} deleted!", capitalize(&removed.section_type)),
                    Severity::Success,
                    3000,
                )))
            }
            "g" | "G" => {
                let message = if self.toggle_guides() {
                    "Guides enabled"
                } else {
                    "Guides disabled"
                };
                Ok(Feedback::notice(Notice::new(message, Severity::Info, 1500)))
            }
            _ => Ok(Feedback::default()),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
