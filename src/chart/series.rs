use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::api::EncodeContext;
use crate::core::{
    DataDeclarations, DataOwning, DataRef, IdRegistry, Named, ObjectWriter, Part, PartCore,
    Position, Positioned,
};
use crate::error::{ChartError, ChartResult};

use super::coordinate::CoordinateRef;
use super::emphasis::{Emphasis, Emphasizable};
use super::Encodable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Line,
    Bar,
    Scatter,
    Pie,
}

impl SeriesKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Scatter => "scatter",
            Self::Pie => "pie",
        }
    }

    /// Whether the series is drawn inside a coordinate system.
    #[must_use]
    pub fn needs_coordinate(self) -> bool {
        !matches!(self, Self::Pie)
    }
}

#[derive(Debug)]
pub struct Series {
    core: PartCore,
    kind: SeriesKind,
    data: Vec<DataRef>,
    coordinate: Option<CoordinateRef>,
    stack: Option<String>,
    smooth: bool,
    emphasis: Emphasis,
}

pub type SeriesRef = Rc<Series>;

impl Series {
    #[must_use]
    pub fn new(kind: SeriesKind) -> Self {
        Self::with_core(PartCore::new(), kind)
    }

    #[must_use]
    pub fn new_in(kind: SeriesKind, registry: &IdRegistry) -> Self {
        Self::with_core(PartCore::from_registry(registry), kind)
    }

    #[must_use]
    pub fn line() -> Self {
        Self::new(SeriesKind::Line)
    }

    #[must_use]
    pub fn bar() -> Self {
        Self::new(SeriesKind::Bar)
    }

    #[must_use]
    pub fn scatter() -> Self {
        Self::new(SeriesKind::Scatter)
    }

    #[must_use]
    pub fn pie() -> Self {
        Self::new(SeriesKind::Pie)
    }

    fn with_core(core: PartCore, kind: SeriesKind) -> Self {
        Self {
            core,
            kind,
            data: Vec::new(),
            coordinate: None,
            stack: None,
            smooth: false,
            emphasis: Emphasis::default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.core.set_name(name);
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.core.set_position(position);
        self
    }

    /// Adds a data provider. Providers are referenced by table serial in the
    /// document, in the order they were added.
    #[must_use]
    pub fn with_data(mut self, data: &DataRef) -> Self {
        self.data.push(Rc::clone(data));
        self
    }

    #[must_use]
    pub fn on(mut self, coordinate: &CoordinateRef) -> Self {
        self.coordinate = Some(Rc::clone(coordinate));
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn smooth(mut self) -> Self {
        self.smooth = true;
        self
    }

    #[must_use]
    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.core.set_visible(false);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> SeriesRef {
        Rc::new(self)
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn data(&self) -> &[DataRef] {
        &self.data
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<&CoordinateRef> {
        self.coordinate.as_ref()
    }

    pub fn validate(&self) -> ChartResult<()> {
        let kind = self.kind.name();
        if self.data.is_empty() {
            return Err(ChartError::EmptyData(format!(
                "{kind} series {} has no data source",
                self.id()
            )));
        }
        match (&self.coordinate, self.kind.needs_coordinate()) {
            (None, true) => Err(ChartError::MissingRequiredPart(format!(
                "{kind} series {} needs a coordinate system",
                self.id()
            ))),
            (Some(coordinate), false) => Err(ChartError::StructuralConflict(format!(
                "{kind} series {} cannot be placed on {coordinate}",
                self.id()
            ))),
            _ => Ok(()),
        }
    }
}

impl Part for Series {
    fn core(&self) -> &PartCore {
        &self.core
    }
}

impl Named for Series {}

impl Positioned for Series {}

impl Emphasizable for Series {
    fn emphasis(&self) -> &Emphasis {
        &self.emphasis
    }
}

impl DataOwning for Series {
    fn declare_data(&self, declarations: &mut DataDeclarations) {
        for data in &self.data {
            declarations.declare(data);
        }
    }
}

impl Encodable for Series {
    fn kind(&self) -> &'static str {
        "series"
    }

    fn encode_body(
        &self,
        out: &mut ObjectWriter<'_>,
        context: &EncodeContext<'_>,
    ) -> ChartResult<()> {
        out.value("type", self.kind.name());
        out.optional("coordinate", self.coordinate.as_ref().map(|c| c.id().raw()));
        out.array("data", |serials| {
            for data in &self.data {
                serials.value(context.serial_of(data)?);
            }
            Ok(())
        })?;
        out.optional("stack", self.stack.as_deref());
        if self.smooth {
            out.value("smooth", true);
        }
        out.object("emphasis", |emphasis| self.emphasis().encode(emphasis))?;
        Ok(())
    }
}
