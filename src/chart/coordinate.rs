use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::api::EncodeContext;
use crate::core::{IdRegistry, Named, ObjectWriter, Part, PartCore, PartId, Position, Positioned};
use crate::error::{ChartError, ChartResult};

use super::axis::{AxisClaim, AxisRef};
use super::Encodable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateKind {
    Rectangular,
    Polar,
}

impl CoordinateKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangular => "grid",
            Self::Polar => "polar",
        }
    }

    #[must_use]
    pub fn required_slots(self) -> &'static [AxisSlot] {
        match self {
            Self::Rectangular => &[AxisSlot::X(0), AxisSlot::Y(0)],
            Self::Polar => &[AxisSlot::Radius, AxisSlot::Angle],
        }
    }

    #[must_use]
    pub fn accepts(self, slot: AxisSlot) -> bool {
        match self {
            Self::Rectangular => matches!(slot, AxisSlot::X(_) | AxisSlot::Y(_)),
            Self::Polar => matches!(slot, AxisSlot::Radius | AxisSlot::Angle),
        }
    }
}

/// Named position of an axis inside a coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisSlot {
    X(u8),
    Y(u8),
    Radius,
    Angle,
}

impl AxisSlot {
    /// Document kind of an axis placed in this slot.
    #[must_use]
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::X(_) => "xAxis",
            Self::Y(_) => "yAxis",
            Self::Radius => "radiusAxis",
            Self::Angle => "angleAxis",
        }
    }

    #[must_use]
    pub fn index(self) -> Option<u8> {
        match self {
            Self::X(index) | Self::Y(index) => Some(index),
            Self::Radius | Self::Angle => None,
        }
    }

    /// Member key used when a coordinate system lists its axes.
    #[must_use]
    pub fn key(self) -> String {
        match self {
            Self::X(index) => format!("x{index}"),
            Self::Y(index) => format!("y{index}"),
            Self::Radius => "radius".to_owned(),
            Self::Angle => "angle".to_owned(),
        }
    }
}

impl fmt::Display for AxisSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X(index) => write!(f, "x[{index}]"),
            Self::Y(index) => write!(f, "y[{index}]"),
            Self::Radius => f.write_str("radius"),
            Self::Angle => f.write_str("angle"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AxisAttachment {
    /// Exclusively owned; the axis is emitted under its own id.
    Owned(AxisRef),
    /// Shared with other coordinate systems; emitted through a wrapper.
    Shared(AxisRef),
}

impl AxisAttachment {
    #[must_use]
    pub fn axis(&self) -> &AxisRef {
        match self {
            Self::Owned(axis) | Self::Shared(axis) => axis,
        }
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationState {
    Unvalidated,
    Validating,
    Valid,
    Rejected(ChartError),
}

#[derive(Debug)]
pub struct CoordinateSystem {
    core: PartCore,
    kind: CoordinateKind,
    slots: RefCell<IndexMap<AxisSlot, AxisAttachment>>,
    state: RefCell<ValidationState>,
}

pub type CoordinateRef = Rc<CoordinateSystem>;

impl CoordinateSystem {
    #[must_use]
    pub fn new(kind: CoordinateKind) -> Self {
        Self::with_core(PartCore::new(), kind)
    }

    #[must_use]
    pub fn new_in(kind: CoordinateKind, registry: &IdRegistry) -> Self {
        Self::with_core(PartCore::from_registry(registry), kind)
    }

    #[must_use]
    pub fn rectangular() -> Self {
        Self::new(CoordinateKind::Rectangular)
    }

    #[must_use]
    pub fn polar() -> Self {
        Self::new(CoordinateKind::Polar)
    }

    fn with_core(core: PartCore, kind: CoordinateKind) -> Self {
        Self {
            core,
            kind,
            slots: RefCell::new(IndexMap::new()),
            state: RefCell::new(ValidationState::Unvalidated),
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

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.core.set_visible(false);
        self
    }

    #[must_use]
    pub fn with_axis(self, slot: AxisSlot, axis: &AxisRef) -> Self {
        self.set_axis(slot, axis);
        self
    }

    #[must_use]
    pub fn with_shared_axis(self, slot: AxisSlot, axis: &AxisRef) -> Self {
        self.share_axis(slot, axis);
        self
    }

    #[must_use]
    pub fn into_ref(self) -> CoordinateRef {
        Rc::new(self)
    }

    #[must_use]
    pub fn kind(&self) -> CoordinateKind {
        self.kind
    }

    /// Attaches an axis this coordinate system owns exclusively.
    ///
    /// Returns the attachment previously held by the slot.
    pub fn set_axis(&self, slot: AxisSlot, axis: &AxisRef) -> Option<AxisAttachment> {
        self.attach(slot, AxisAttachment::Owned(Rc::clone(axis)))
    }

    /// Attaches an axis that other coordinate systems may also use.
    pub fn share_axis(&self, slot: AxisSlot, axis: &AxisRef) -> Option<AxisAttachment> {
        self.attach(slot, AxisAttachment::Shared(Rc::clone(axis)))
    }

    pub fn remove_axis(&self, slot: AxisSlot) -> Option<AxisAttachment> {
        let removed = self.slots.borrow_mut().shift_remove(&slot);
        self.reset_validation();
        removed
    }

    fn attach(&self, slot: AxisSlot, attachment: AxisAttachment) -> Option<AxisAttachment> {
        let previous = self.slots.borrow_mut().insert(slot, attachment);
        self.reset_validation();
        previous
    }

    #[must_use]
    pub fn axis(&self, slot: AxisSlot) -> Option<AxisRef> {
        self.slots
            .borrow()
            .get(&slot)
            .map(|attachment| Rc::clone(attachment.axis()))
    }

    /// Snapshot of the attached axes in slot insertion order.
    #[must_use]
    pub fn attachments(&self) -> Vec<(AxisSlot, AxisAttachment)> {
        self.slots
            .borrow()
            .iter()
            .map(|(slot, attachment)| (*slot, attachment.clone()))
            .collect()
    }

    #[must_use]
    pub fn state(&self) -> ValidationState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        *self.state.borrow() == ValidationState::Valid
    }

    pub(crate) fn reset_validation(&self) {
        *self.state.borrow_mut() = ValidationState::Unvalidated;
    }

    /// Validates the required slots and claims every attached axis.
    ///
    /// A terminal state is sticky: validating again returns the same outcome
    /// until the slots change or a new assembly resets it.
    pub fn validate(&self) -> ChartResult<()> {
        let current = self.state();
        match current {
            ValidationState::Valid => return Ok(()),
            ValidationState::Rejected(err) => return Err(err),
            ValidationState::Validating => {
                return Err(ChartError::StructuralConflict(format!(
                    "{self} was re-entered while validating"
                )));
            }
            ValidationState::Unvalidated => {}
        }

        *self.state.borrow_mut() = ValidationState::Validating;
        let outcome = self.check_slots();
        *self.state.borrow_mut() = match &outcome {
            Ok(()) => ValidationState::Valid,
            Err(err) => {
                warn!(coordinate = %self.id(), error = %err, "coordinate system rejected");
                ValidationState::Rejected(err.clone())
            }
        };
        outcome
    }

    fn check_slots(&self) -> ChartResult<()> {
        let slots = self.slots.borrow();
        for required in self.kind.required_slots() {
            if !slots.contains_key(required) {
                return Err(ChartError::MissingRequiredPart(format!(
                    "{self} is missing its {required} axis"
                )));
            }
        }

        let mut placed: SmallVec<[(PartId, AxisSlot); 4]> = SmallVec::new();
        for (slot, attachment) in slots.iter() {
            if !self.kind.accepts(*slot) {
                return Err(ChartError::StructuralConflict(format!(
                    "{self} cannot hold a {slot} axis"
                )));
            }
            let axis = attachment.axis();
            if let Some((_, first)) = placed.iter().find(|(id, _)| *id == axis.id()) {
                return Err(ChartError::StructuralConflict(format!(
                    "axis {} sits in both {first} and {slot} of {self}",
                    axis.id()
                )));
            }
            placed.push((axis.id(), *slot));
            let claim = match (attachment, axis.claim()) {
                (AxisAttachment::Owned(_), AxisClaim::Unclaimed) => AxisClaim::Owned(self.id()),
                (AxisAttachment::Owned(_), AxisClaim::Owned(owner)) if owner == self.id() => {
                    AxisClaim::Owned(owner)
                }
                (AxisAttachment::Owned(_), AxisClaim::Owned(owner)) => {
                    return Err(ChartError::StructuralConflict(format!(
                        "axis {} in {slot} of {self} is already owned by coordinate system {owner}",
                        axis.id()
                    )));
                }
                (AxisAttachment::Owned(_), AxisClaim::Shared) => {
                    return Err(ChartError::StructuralConflict(format!(
                        "axis {} is shared by other coordinate systems and cannot be owned by {self}",
                        axis.id()
                    )));
                }
                (AxisAttachment::Shared(_), AxisClaim::Owned(owner)) => {
                    return Err(ChartError::StructuralConflict(format!(
                        "axis {} is owned by coordinate system {owner} and cannot be shared with {self}",
                        axis.id()
                    )));
                }
                (AxisAttachment::Shared(_), AxisClaim::Unclaimed | AxisClaim::Shared) => {
                    AxisClaim::Shared
                }
            };
            axis.set_claim(claim);
            axis.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} coordinate system {}", self.kind.name(), self.id())?;
        if let Some(name) = self.core.name() {
            write!(f, " ({name:?})")?;
        }
        Ok(())
    }
}

impl Part for CoordinateSystem {
    fn core(&self) -> &PartCore {
        &self.core
    }
}

impl Named for CoordinateSystem {}

impl Positioned for CoordinateSystem {}

impl Encodable for CoordinateSystem {
    fn kind(&self) -> &'static str {
        self.kind.name()
    }

    fn encode_body(
        &self,
        out: &mut ObjectWriter<'_>,
        context: &EncodeContext<'_>,
    ) -> ChartResult<()> {
        if !self.is_valid() {
            return Err(ChartError::StructuralConflict(format!(
                "{self} was encoded before it was validated"
            )));
        }
        let attachments = self.attachments();
        out.object("axes", |axes| {
            for (slot, attachment) in &attachments {
                let reference = context.axis_reference(self, attachment)?;
                axes.value(&slot.key(), reference.raw());
            }
            Ok(())
        })?;
        Ok(())
    }
}
