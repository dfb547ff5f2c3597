use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::api::EncodeContext;
use crate::core::{Named, ObjectWriter, Part, PartCore, Position, Positioned};
use crate::error::ChartResult;

use super::Encodable;

#[derive(Debug, Clone, PartialEq)]
pub struct Title {
    core: PartCore,
    text: String,
    subtext: Option<String>,
}

impl Title {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            core: PartCore::new(),
            text: text.into(),
            subtext: None,
        }
    }

    #[must_use]
    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.core.set_position(position);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> Rc<Self> {
        Rc::new(self)
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Part for Title {
    fn core(&self) -> &PartCore {
        &self.core
    }
}

impl Named for Title {}

impl Positioned for Title {}

impl Encodable for Title {
    fn kind(&self) -> &'static str {
        "title"
    }

    fn encode_body(
        &self,
        out: &mut ObjectWriter<'_>,
        _context: &EncodeContext<'_>,
    ) -> ChartResult<()> {
        out.value("text", self.text.as_str());
        out.optional("subtext", self.subtext.as_deref());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orient {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    core: PartCore,
    orient: Option<Orient>,
}

impl Default for Legend {
    fn default() -> Self {
        Self::new()
    }
}

impl Legend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: PartCore::new(),
            orient: None,
        }
    }

    #[must_use]
    pub fn with_orient(mut self, orient: Orient) -> Self {
        self.orient = Some(orient);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.core.set_position(position);
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.core.set_visible(false);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> Rc<Self> {
        Rc::new(self)
    }
}

impl Part for Legend {
    fn core(&self) -> &PartCore {
        &self.core
    }
}

impl Named for Legend {}

impl Positioned for Legend {}

impl Encodable for Legend {
    fn kind(&self) -> &'static str {
        "legend"
    }

    fn encode_body(
        &self,
        out: &mut ObjectWriter<'_>,
        _context: &EncodeContext<'_>,
    ) -> ChartResult<()> {
        out.optional(
            "orient",
            self.orient.map(|orient| match orient {
                Orient::Horizontal => "horizontal",
                Orient::Vertical => "vertical",
            }),
        );
        Ok(())
    }
}
