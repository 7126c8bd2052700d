use crate::anchor::{AnchorPlacement, place_polygon_label};
use crate::capture::{DiscardReason, PathCapture};
use crate::config::CaptureConfig;
use crate::geometry::{Point, Polygon};
use crate::log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Everything the drawing surface can report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    #[serde(rename = "down")]
    PointerDown(Point),
    #[serde(rename = "move")]
    PointerMove(Point),
    #[serde(rename = "up")]
    PointerUp,
    #[serde(rename = "cancel")]
    PointerCancel,
    #[serde(rename = "text")]
    TextChanged { value: String },
    Reset,
}

/// What an event did to the session, so callers know whether to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nothing changed.
    Ignored,
    /// State changed; the drawing needs a repaint.
    Redraw,
    ShapeClosed { id: usize },
    PathDiscarded(DiscardReason),
}

/// A closed polygon and the anchor its label is centered on. The label text
/// itself lives on the [`Session`] and is shared by every shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledShape {
    pub id: usize,
    pub polygon: Polygon,
    pub anchor: AnchorPlacement,
}

#[derive(Debug, Clone)]
pub struct Session {
    capture: PathCapture,
    shapes: Vec<LabeledShape>,
    label_text: String,
    next_id: usize,
}

impl Session {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            capture: PathCapture::new(config),
            shapes: Vec::new(),
            label_text: String::new(),
            next_id: 0,
        }
    }

    pub fn with_label_text(mut self, text: impl Into<String>) -> Self {
        self.label_text = text.into();
        self
    }

    pub fn shapes(&self) -> &[LabeledShape] {
        &self.shapes
    }

    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    /// Samples of the path being drawn, if any.
    pub fn in_progress(&self) -> Option<&[Point]> {
        self.capture.in_progress()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_active()
    }

    /// Drops every shape and any unfinished path. The label text survives.
    pub fn reset(&mut self) {
        self.shapes.clear();
        self.capture.abort();
        self.next_id = 0;
    }

    /// Applies events in order and returns the outcome of each.
    pub fn apply_all<I>(&mut self, events: I) -> Vec<EventOutcome>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        events.into_iter().map(|event| self.apply(event)).collect()
    }

    /// The single state transition for every input event.
    pub fn apply(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PointerDown(point) => {
                if self.capture.is_active() {
                    warn!("pointer down while drawing; restarting path");
                }
                self.capture.begin(point);
                EventOutcome::Redraw
            }
            InputEvent::PointerMove(point) => {
                if self.capture.extend(point) {
                    EventOutcome::Redraw
                } else {
                    EventOutcome::Ignored
                }
            }
            InputEvent::PointerUp => {
                if !self.capture.is_active() {
                    return EventOutcome::Ignored;
                }
                match self.capture.try_close() {
                    Ok(polygon) => EventOutcome::ShapeClosed {
                        id: self.push_shape(polygon),
                    },
                    Err(reason) => EventOutcome::PathDiscarded(reason),
                }
            }
            InputEvent::PointerCancel => {
                if !self.capture.is_active() {
                    return EventOutcome::Ignored;
                }
                self.capture.abort();
                EventOutcome::Redraw
            }
            InputEvent::TextChanged { value } => {
                if value == self.label_text {
                    return EventOutcome::Ignored;
                }
                self.label_text = value;
                EventOutcome::Redraw
            }
            InputEvent::Reset => {
                self.reset();
                EventOutcome::Redraw
            }
        }
    }

    fn push_shape(&mut self, polygon: Polygon) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let anchor = place_polygon_label(&polygon);
        debug!(id, vertices = polygon.len(), "shape closed");
        self.shapes.push(LabeledShape {
            id,
            polygon,
            anchor,
        });
        id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
