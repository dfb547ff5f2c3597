use tracing::trace;

use crate::chart::{AxisAttachment, AxisClaim, CoordinateSystem, Encodable};
use crate::core::{DataRef, ObjectWriter, Part, PartCore, PartId};
use crate::error::{ChartError, ChartResult};

use super::data_registry::DataTable;
use super::graph_walk::Emission;
use super::wrapper_resolver::WrapperResolver;

/// Assembly state available to part encoders.
pub struct EncodeContext<'a> {
    data: &'a DataTable,
    wrappers: &'a WrapperResolver,
}

impl<'a> EncodeContext<'a> {
    #[must_use]
    pub fn new(data: &'a DataTable, wrappers: &'a WrapperResolver) -> Self {
        Self { data, wrappers }
    }

    /// Table serial of a provider declared during this assembly.
    pub fn serial_of(&self, provider: &DataRef) -> ChartResult<usize> {
        self.data.serial_of(provider).ok_or_else(|| {
            ChartError::StructuralConflict(format!(
                "data provider {} was not collected by this assembly",
                provider.key()
            ))
        })
    }

    /// Id under which `owner` refers to the axis in `attachment`.
    pub fn axis_reference(
        &self,
        owner: &CoordinateSystem,
        attachment: &AxisAttachment,
    ) -> ChartResult<PartId> {
        let axis = attachment.axis();
        match attachment {
            AxisAttachment::Owned(_) => {
                if axis.claim() != AxisClaim::Owned(owner.id()) {
                    return Err(ChartError::StructuralConflict(format!(
                        "axis {} is not claimed by {owner}",
                        axis.id()
                    )));
                }
                Ok(axis.id())
            }
            AxisAttachment::Shared(_) => self
                .wrappers
                .get(axis.id(), owner.id())
                .map(|wrapper| wrapper.id())
                .ok_or_else(|| {
                    ChartError::StructuralConflict(format!(
                        "shared axis {} has no wrapper in {owner}",
                        axis.id()
                    ))
                }),
        }
    }
}

fn write_preamble(
    out: &mut ObjectWriter<'_>,
    kind: &str,
    id: PartId,
    wrapped: bool,
    core: &PartCore,
) {
    out.value("kind", kind);
    out.value("id", id.raw());
    if wrapped {
        out.value("wrapped", true);
    }
    out.value("show", core.visible());
    out.optional("name", core.name());
    if let Some(position) = core.position() {
        position.encode(out);
    }
}

/// Writes one member of the `parts` array.
pub(crate) fn encode_emission(
    out: &mut ObjectWriter<'_>,
    emission: &Emission,
    context: &EncodeContext<'_>,
) -> ChartResult<()> {
    match emission {
        Emission::Part(node) => {
            let part = node.as_encodable();
            trace!(kind = part.kind(), id = %part.id(), "encode part");
            write_preamble(out, part.kind(), part.id(), false, part.core());
            part.encode_body(out, context)
        }
        Emission::Axis {
            axis,
            owner,
            slot,
            shared,
        } => {
            let attachment = if *shared {
                AxisAttachment::Shared(axis.clone())
            } else {
                AxisAttachment::Owned(axis.clone())
            };
            // A shared axis only ever appears under its wrapper id.
            let id = context.axis_reference(owner, &attachment)?;
            trace!(kind = slot.kind_name(), id = %id, wrapped = *shared, "encode axis");
            write_preamble(out, slot.kind_name(), id, *shared, axis.core());
            out.value("coordinate", owner.id().raw());
            out.optional("index", slot.index());
            axis.encode_body(out, context)
        }
    }
}
