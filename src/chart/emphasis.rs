use serde::{Deserialize, Serialize};

use crate::core::ObjectWriter;
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    None,
    SelfOnly,
    Series,
}

impl Focus {
    fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SelfOnly => "self",
            Self::Series => "series",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub color: Option<String>,
    pub border_width: Option<f64>,
    pub opacity: Option<f64>,
}

impl ItemStyle {
    pub fn encode(&self, out: &mut ObjectWriter<'_>) -> ChartResult<()> {
        out.optional("color", self.color.as_deref());
        out.optional_number("borderWidth", self.border_width);
        out.optional_number("opacity", self.opacity);
        Ok(())
    }
}

/// Highlight styling applied while a series is hovered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    pub focus: Option<Focus>,
    pub scale: Option<bool>,
    pub item_style: ItemStyle,
}

impl Emphasis {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_item_style(mut self, item_style: ItemStyle) -> Self {
        self.item_style = item_style;
        self
    }

    pub fn encode(&self, out: &mut ObjectWriter<'_>) -> ChartResult<()> {
        out.optional("focus", self.focus.map(Focus::name));
        out.optional("scale", self.scale);
        out.object("itemStyle", |style| self.item_style.encode(style))?;
        Ok(())
    }
}

pub trait Emphasizable {
    fn emphasis(&self) -> &Emphasis;
}
