use serde::{Deserialize, Serialize};

use crate::core::buffer::{ObjectWriter, number_value};
use crate::core::identity::{IdRegistry, PartId};

/// One layout coordinate of a positioned part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Size {
    Pixels(f64),
    Percent(f64),
    Auto,
    Center,
}

impl Size {
    fn to_json(self) -> serde_json::Value {
        match self {
            Self::Pixels(px) => number_value(px),
            Self::Percent(percent) => {
                serde_json::Value::from(format!("{}%", number_value(percent)))
            }
            Self::Auto => serde_json::Value::from("auto"),
            Self::Center => serde_json::Value::from("center"),
        }
    }
}

/// Placement of a part inside the chart canvas. Unset edges emit nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub left: Option<Size>,
    pub top: Option<Size>,
    pub right: Option<Size>,
    pub bottom: Option<Size>,
    pub width: Option<Size>,
    pub height: Option<Size>,
}

impl Position {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_left(mut self, left: Size) -> Self {
        self.left = Some(left);
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: Size) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: Size) -> Self {
        self.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_bottom(mut self, bottom: Size) -> Self {
        self.bottom = Some(bottom);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: Size) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: Size) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the set edges as members of the enclosing part object.
    pub fn encode(&self, out: &mut ObjectWriter<'_>) {
        for (key, size) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("width", self.width),
            ("height", self.height),
        ] {
            out.optional(key, size.map(Size::to_json));
        }
    }
}

/// Identity, name, visibility and layout shared by every part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartCore {
    id: PartId,
    name: Option<String>,
    visible: bool,
    position: Option<Position>,
}

impl Default for PartCore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartCore {
    /// Creates a core with an id from the process-wide registry.
    #[must_use]
    pub fn new() -> Self {
        Self::from_registry(&IdRegistry::global())
    }

    #[must_use]
    pub fn from_registry(registry: &IdRegistry) -> Self {
        Self {
            id: registry.next_id(),
            name: None,
            visible: true,
            position: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PartId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }
}

/// Anything that carries a [`PartCore`].
pub trait Part {
    fn core(&self) -> &PartCore;

    fn id(&self) -> PartId {
        self.core().id()
    }

    fn visible(&self) -> bool {
        self.core().visible()
    }
}

pub trait Named: Part {
    fn name(&self) -> Option<&str> {
        self.core().name()
    }
}

pub trait Positioned: Part {
    fn position(&self) -> Option<&Position> {
        self.core().position()
    }
}
