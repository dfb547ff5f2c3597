//! Declarative chart parts.
//!
//! Parts compose a [`PartCore`](crate::core::PartCore) and opt into the
//! capabilities they need. [`PartNode`] is the closed set of parts that can be
//! handed to a document; the part kind drives which body gets encoded.

pub mod axis;
pub mod component;
pub mod coordinate;
pub mod emphasis;
pub mod series;

use std::rc::Rc;

pub use axis::{Axis, AxisClaim, AxisRef};
pub use component::{Legend, Orient, Title};
pub use coordinate::{
    AxisAttachment, AxisSlot, CoordinateKind, CoordinateRef, CoordinateSystem, ValidationState,
};
pub use emphasis::{Emphasis, Emphasizable, Focus, ItemStyle};
pub use series::{Series, SeriesKind, SeriesRef};

use crate::api::EncodeContext;
use crate::core::{DataOwning, Named, ObjectWriter, Part, PartId, Positioned};
use crate::error::ChartResult;

/// Type-specific contribution of a part to the document.
///
/// The assembler writes the shared preamble (kind, id, visibility, name,
/// position); implementors append only their own members.
pub trait Encodable: Named + Positioned {
    fn kind(&self) -> &'static str;

    fn encode_body(
        &self,
        out: &mut ObjectWriter<'_>,
        context: &EncodeContext<'_>,
    ) -> ChartResult<()>;
}

#[derive(Debug, Clone)]
pub enum PartNode {
    Title(Rc<Title>),
    Legend(Rc<Legend>),
    Coordinate(CoordinateRef),
    Series(SeriesRef),
}

impl PartNode {
    #[must_use]
    pub fn id(&self) -> PartId {
        self.as_encodable().id()
    }

    #[must_use]
    pub fn as_encodable(&self) -> &dyn Encodable {
        match self {
            Self::Title(title) => &**title,
            Self::Legend(legend) => &**legend,
            Self::Coordinate(coordinate) => &**coordinate,
            Self::Series(series) => &**series,
        }
    }

    #[must_use]
    pub fn as_data_owner(&self) -> Option<&dyn DataOwning> {
        match self {
            Self::Series(series) => Some(&**series),
            Self::Title(_) | Self::Legend(_) | Self::Coordinate(_) => None,
        }
    }
}

impl From<Rc<Title>> for PartNode {
    fn from(title: Rc<Title>) -> Self {
        Self::Title(title)
    }
}

impl From<Title> for PartNode {
    fn from(title: Title) -> Self {
        Self::Title(Rc::new(title))
    }
}

impl From<Rc<Legend>> for PartNode {
    fn from(legend: Rc<Legend>) -> Self {
        Self::Legend(legend)
    }
}

impl From<Legend> for PartNode {
    fn from(legend: Legend) -> Self {
        Self::Legend(Rc::new(legend))
    }
}

impl From<CoordinateRef> for PartNode {
    fn from(coordinate: CoordinateRef) -> Self {
        Self::Coordinate(coordinate)
    }
}

impl From<CoordinateSystem> for PartNode {
    fn from(coordinate: CoordinateSystem) -> Self {
        Self::Coordinate(Rc::new(coordinate))
    }
}

impl From<SeriesRef> for PartNode {
    fn from(series: SeriesRef) -> Self {
        Self::Series(series)
    }
}

impl From<Series> for PartNode {
    fn from(series: Series) -> Self {
        Self::Series(Rc::new(series))
    }
}

impl From<&Rc<Title>> for PartNode {
    fn from(title: &Rc<Title>) -> Self {
        Self::Title(Rc::clone(title))
    }
}

impl From<&CoordinateRef> for PartNode {
    fn from(coordinate: &CoordinateRef) -> Self {
        Self::Coordinate(Rc::clone(coordinate))
    }
}

impl From<&SeriesRef> for PartNode {
    fn from(series: &SeriesRef) -> Self {
        Self::Series(Rc::clone(series))
    }
}
