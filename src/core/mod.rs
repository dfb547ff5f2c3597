pub mod buffer;
pub mod data;
pub mod identity;
pub mod part;

pub use buffer::{ArrayWriter, JsonBuffer, ObjectWriter, number_value};
pub use data::{
    Data, DataDeclarations, DataOwning, DataProvider, DataRef, DataSlot, DataType, DataValue,
    LazyData, OnceData,
};
pub use identity::{IdRegistry, PartId};
pub use part::{Named, Part, PartCore, Position, Positioned, Size};
