//! Seam to the drawing that owns the text entities.
//!
//! The pipeline only talks to a drawing through [`Drawing`]; connecting to a
//! CAD session, selecting entities and undo bookkeeping live behind it.

use glam::DVec3;

use crate::errors::DrawingError;
use crate::types::{Angle, Height};

/// A single-line text entity, as read from the drawing
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntity {
    /// Stable identifier within the drawing
    pub handle: String,
    pub text: String,
    pub insertion: DVec3,
    pub height: Height,
    pub rotation: Angle,
    pub layer: String,
}

/// A text entity to be created next to an existing one
#[derive(Debug, Clone, PartialEq)]
pub struct NewText {
    pub text: String,
    pub insertion: DVec3,
    pub height: Height,
    pub rotation: Angle,
    pub layer: String,
}

/// Operations the pipeline needs from a drawing
pub trait Drawing {
    /// Human-readable name of the document
    fn name(&self) -> &str;

    /// All text entities on visible layers
    fn text_entities(&mut self) -> Result<Vec<TextEntity>, DrawingError>;

    fn set_text(&mut self, handle: &str, text: &str) -> Result<(), DrawingError>;

    /// Create `text`, copying the visual properties (style, color) of the
    /// entity identified by `template`. Returns the new handle.
    fn add_text(&mut self, template: &str, text: NewText) -> Result<String, DrawingError>;

    fn delete(&mut self, handle: &str) -> Result<(), DrawingError>;

    /// Open an undo group around the edits that follow
    fn begin_undo_mark(&mut self) {}

    fn end_undo_mark(&mut self) {}
}
