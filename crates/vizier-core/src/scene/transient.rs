//! Transient presentation state.
//!
//! Entry animations, hover transitions and transforms affect how a scene
//! looks while it is live, but must not leak into exported images: a clone
//! rasterized mid-animation would bake in an inconsistent visual state. The
//! renderers therefore record this state here, next to but separate from
//! layout, and the isolated-clone export strategy strips it wholesale.

use crate::geometry::Point;

/// A one-shot entry animation with a staggered delay.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryAnimation {
    pub name: String,
    pub delay_s: f32,
    pub duration_s: f32,
}

/// A geometric transform applied on top of laid-out bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(Point),
    Scale(f32),
}

impl Transform {
    /// Returns the SVG `transform` attribute value.
    pub fn to_svg_value(self) -> String {
        match self {
            Self::Translate(offset) => format!("translate({} {})", offset.x(), offset.y()),
            Self::Scale(factor) => format!("scale({factor})"),
        }
    }
}

/// The transient presentation state of one scene node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transient {
    pub entry: Option<EntryAnimation>,
    pub transition: Option<String>,
    pub transform: Option<Transform>,
}

impl Transient {
    /// The staggered slide-in used by card-style renderers.
    pub fn slide_in_up(delay_s: f32) -> Self {
        Self {
            entry: Some(EntryAnimation {
                name: "slide-in-up".to_string(),
                delay_s,
                duration_s: 0.6,
            }),
            ..Self::default()
        }
    }

    /// The hover lift transition card-style renderers attach to boxes.
    pub fn hover_lift() -> Self {
        Self {
            transition: Some("transform 0.3s ease, box-shadow 0.3s ease".to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.transition.is_none() && self.transform.is_none()
    }

    /// Drops every transient attribute.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Merges another transient's attributes into this one, keeping existing
    /// values where both are set.
    pub fn merge(&mut self, other: Transient) {
        if self.entry.is_none() {
            self.entry = other.entry;
        }
        if self.transition.is_none() {
            self.transition = other.transition;
        }
        if self.transform.is_none() {
            self.transform = other.transform;
        }
    }
}
