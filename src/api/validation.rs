use tracing::debug;

use crate::chart::{AxisClaim, PartNode};
use crate::error::ChartResult;

use super::graph_walk::Emission;

/// Clears validation state and axis claims left over from earlier builds so
/// that ownership is decided by this pass alone.
pub(crate) fn reset_graph(emissions: &[Emission]) {
    for emission in emissions {
        match emission {
            Emission::Part(PartNode::Coordinate(coordinate)) => coordinate.reset_validation(),
            Emission::Axis { axis, .. } => axis.set_claim(AxisClaim::Unclaimed),
            Emission::Part(_) => {}
        }
    }
}

/// Validates every reachable coordinate system and series in emission order.
///
/// Stops at the first failure. Returns the number of validated coordinate
/// systems.
pub(crate) fn validate_graph(emissions: &[Emission]) -> ChartResult<usize> {
    let mut coordinates = 0;
    for emission in emissions {
        match emission {
            Emission::Part(PartNode::Coordinate(coordinate)) => {
                coordinate.validate()?;
                coordinates += 1;
            }
            Emission::Part(PartNode::Series(series)) => series.validate()?,
            Emission::Part(PartNode::Title(_) | PartNode::Legend(_)) | Emission::Axis { .. } => {}
        }
    }
    debug!(coordinates, parts = emissions.len(), "validated chart graph");
    Ok(coordinates)
}
