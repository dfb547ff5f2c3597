use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::api::EncodeContext;
use crate::core::{
    DataDeclarations, DataOwning, DataRef, DataType, IdRegistry, Named, ObjectWriter, Part,
    PartCore, PartId, Positioned,
};
use crate::error::{ChartError, ChartResult};

use super::Encodable;

/// How a coordinate system currently holds an axis.
///
/// Set while coordinate systems validate and cleared at the start of every
/// document assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisClaim {
    Unclaimed,
    Owned(PartId),
    Shared,
}

/// A logical axis. Its emitted kind (`xAxis`, `radiusAxis`, ...) comes from
/// the coordinate-system slot it is placed in.
#[derive(Debug)]
pub struct Axis {
    core: PartCore,
    data_type: DataType,
    data: Option<DataRef>,
    min: Option<f64>,
    max: Option<f64>,
    inverse: bool,
    claim: Cell<AxisClaim>,
}

pub type AxisRef = Rc<Axis>;

impl Axis {
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        Self::with_core(PartCore::new(), data_type)
    }

    #[must_use]
    pub fn new_in(data_type: DataType, registry: &IdRegistry) -> Self {
        Self::with_core(PartCore::from_registry(registry), data_type)
    }

    fn with_core(core: PartCore, data_type: DataType) -> Self {
        Self {
            core,
            data_type,
            data: None,
            min: None,
            max: None,
            inverse: false,
            claim: Cell::new(AxisClaim::Unclaimed),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.core.set_name(name);
        self
    }

    /// Attaches the provider listing this axis' categories or ticks.
    #[must_use]
    pub fn with_data(mut self, data: &DataRef) -> Self {
        self.data = Some(Rc::clone(data));
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverse = true;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.core.set_visible(false);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> AxisRef {
        Rc::new(self)
    }

    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[must_use]
    pub fn data(&self) -> Option<&DataRef> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn claim(&self) -> AxisClaim {
        self.claim.get()
    }

    pub(crate) fn set_claim(&self, claim: AxisClaim) {
        self.claim.set(claim);
    }

    /// Checks the axis on its own, after its owner has claimed it.
    pub fn validate(&self) -> ChartResult<()> {
        if self.data_type == DataType::Object {
            return Err(ChartError::StructuralConflict(format!(
                "axis {} cannot be declared with object data type",
                self.id()
            )));
        }
        if let Some(data) = &self.data {
            if !data.data_type().fits_axis(self.data_type) {
                return Err(ChartError::StructuralConflict(format!(
                    "axis {} of type {:?} cannot use {:?} data {}",
                    self.id(),
                    self.data_type,
                    data.data_type(),
                    data.key()
                )));
            }
        }
        Ok(())
    }
}

impl Part for Axis {
    fn core(&self) -> &PartCore {
        &self.core
    }
}

impl Named for Axis {}

impl Positioned for Axis {}

impl DataOwning for Axis {
    fn declare_data(&self, declarations: &mut DataDeclarations) {
        if let Some(data) = &self.data {
            declarations.declare(data);
        }
    }
}

impl Encodable for Axis {
    fn kind(&self) -> &'static str {
        "axis"
    }

    fn encode_body(
        &self,
        out: &mut ObjectWriter<'_>,
        context: &EncodeContext<'_>,
    ) -> ChartResult<()> {
        out.value("type", self.data_type.axis_type_name());
        if let Some(data) = &self.data {
            out.value("data", context.serial_of(data)?);
        }
        out.optional_number("min", self.min);
        out.optional_number("max", self.max);
        if self.inverse {
            out.value("inverse", true);
        }
        Ok(())
    }
}
