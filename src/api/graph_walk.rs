use std::collections::HashSet;

use smallvec::SmallVec;

use crate::chart::{AxisAttachment, AxisRef, AxisSlot, CoordinateRef, PartNode};
use crate::core::{Part, PartId};

/// One object in the emitted `parts` array.
#[derive(Debug, Clone)]
pub(crate) enum Emission {
    Part(PartNode),
    Axis {
        axis: AxisRef,
        owner: CoordinateRef,
        slot: AxisSlot,
        shared: bool,
    },
}

impl Emission {
    pub(crate) fn visible(&self) -> bool {
        match self {
            Self::Part(node) => node.as_encodable().visible(),
            Self::Axis { axis, .. } => axis.visible(),
        }
    }

    /// Whether other emitted parts may refer to this one by id.
    pub(crate) fn is_referenced(&self) -> bool {
        matches!(self, Self::Part(PartNode::Coordinate(_)) | Self::Axis { .. })
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Part(node) => node.as_encodable().kind(),
            Self::Axis { slot, .. } => slot.kind_name(),
        }
    }
}

/// Orders every reachable part: roots in declaration order, each followed
/// depth-first by its nested parts in field order. A part reached twice is
/// emitted once; an axis is emitted once per coordinate system holding it.
pub(crate) fn walk(roots: &[PartNode]) -> Vec<Emission> {
    let mut walker = Walker::default();
    for root in roots {
        walker.visit(root);
    }
    walker.emissions
}

#[derive(Default)]
struct Walker {
    parts: HashSet<PartId>,
    placements: HashSet<(PartId, PartId)>,
    emissions: Vec<Emission>,
}

impl Walker {
    fn visit(&mut self, node: &PartNode) {
        if !self.parts.insert(node.id()) {
            return;
        }
        self.emissions.push(Emission::Part(node.clone()));

        let nested: SmallVec<[PartNode; 2]> = match node {
            PartNode::Series(series) => series
                .coordinate()
                .map(|coordinate| PartNode::Coordinate(coordinate.clone()))
                .into_iter()
                .collect(),
            PartNode::Coordinate(coordinate) => {
                self.place_axes(coordinate);
                SmallVec::new()
            }
            PartNode::Title(_) | PartNode::Legend(_) => SmallVec::new(),
        };
        for child in &nested {
            self.visit(child);
        }
    }

    fn place_axes(&mut self, owner: &CoordinateRef) {
        for (slot, attachment) in owner.attachments() {
            let axis = attachment.axis().clone();
            if !self.placements.insert((axis.id(), owner.id())) {
                continue;
            }
            self.emissions.push(Emission::Axis {
                axis,
                owner: owner.clone(),
                slot,
                shared: matches!(attachment, AxisAttachment::Shared(_)),
            });
        }
    }
}
