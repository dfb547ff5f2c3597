use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::buffer::number_value;
use crate::core::identity::{IdRegistry, PartId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Number,
    Category,
    Date,
    Time,
    Logarithmic,
    Object,
}

impl DataType {
    /// Axis `type` emitted for an axis of this data type.
    #[must_use]
    pub fn axis_type_name(self) -> &'static str {
        match self {
            Self::Number | Self::Object => "value",
            Self::Category => "category",
            Self::Date | Self::Time => "time",
            Self::Logarithmic => "log",
        }
    }

    /// Whether values of `self` can back an axis declared as `axis`.
    #[must_use]
    pub fn fits_axis(self, axis: DataType) -> bool {
        match axis {
            Self::Number | Self::Logarithmic => matches!(self, Self::Number | Self::Logarithmic),
            Self::Category => matches!(self, Self::Category | Self::Date | Self::Time),
            Self::Time => matches!(self, Self::Date | Self::Time),
            Self::Date => self == Self::Date,
            Self::Object => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Null,
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Object(Value),
}

impl DataValue {
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Number(value) => number_value(*value),
            Self::Text(text) => Value::from(text.as_str()),
            Self::Date(date) => Value::from(date.format("%Y-%m-%d").to_string()),
            Self::Time(time) => Value::from(time.format("%H:%M:%S").to_string()),
            Self::DateTime(time) => Value::from(time.format("%Y-%m-%dT%H:%M:%S").to_string()),
            Self::Object(value) => value.clone(),
        }
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for DataValue {
    fn from(value: Decimal) -> Self {
        value.to_f64().map_or(Self::Null, Self::Number)
    }
}

impl From<NaiveDate> for DataValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for DataValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for DataValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<Value> for DataValue {
    fn from(value: Value) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Identity of one provider.
///
/// The key never changes. A provider's table position is not stored here: it
/// belongs to the [`DataTable`](crate::api::DataTable) of one assembly and is
/// looked up with `DataTable::serial_of`.
#[derive(Debug)]
pub struct DataSlot {
    key: PartId,
}

impl Default for DataSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::from_registry(&IdRegistry::global())
    }

    #[must_use]
    pub fn from_registry(registry: &IdRegistry) -> Self {
        Self {
            key: registry.next_id(),
        }
    }

    #[must_use]
    pub fn key(&self) -> PartId {
        self.key
    }
}

/// A typed, possibly lazy sequence of values placed once in the shared table.
pub trait DataProvider: fmt::Debug {
    fn slot(&self) -> &DataSlot;

    fn data_type(&self) -> DataType;

    /// Yields the values from the start. May be unbounded.
    fn values(&self) -> Box<dyn Iterator<Item = DataValue> + '_>;

    fn key(&self) -> PartId {
        self.slot().key()
    }
}

pub type DataRef = Rc<dyn DataProvider>;

/// Eager provider backed by a vector.
#[derive(Debug)]
pub struct Data {
    slot: DataSlot,
    data_type: DataType,
    values: RefCell<Vec<DataValue>>,
}

impl Data {
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        Self {
            slot: DataSlot::new(),
            data_type,
            values: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn from_values<I>(data_type: DataType, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DataValue>,
    {
        let data = Self::new(data_type);
        data.extend(values);
        data
    }

    #[must_use]
    pub fn numbers<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self::from_values(DataType::Number, values)
    }

    #[must_use]
    pub fn categories<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_values(
            DataType::Category,
            values.into_iter().map(|value| DataValue::Text(value.into())),
        )
    }

    #[must_use]
    pub fn dates<I: IntoIterator<Item = NaiveDate>>(values: I) -> Self {
        Self::from_values(DataType::Date, values)
    }

    #[must_use]
    pub fn into_ref(self) -> DataRef {
        Rc::new(self)
    }

    pub fn push(&self, value: impl Into<DataValue>) {
        self.values.borrow_mut().push(value.into());
    }

    pub fn extend<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<DataValue>,
    {
        self.values
            .borrow_mut()
            .extend(values.into_iter().map(Into::into));
    }

    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl DataProvider for Data {
    fn slot(&self) -> &DataSlot {
        &self.slot
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn values(&self) -> Box<dyn Iterator<Item = DataValue> + '_> {
        Box::new(self.values.borrow().clone().into_iter())
    }
}

type ValueSource = dyn Fn() -> Box<dyn Iterator<Item = DataValue>>;

/// Restartable provider: every read calls the source again.
///
/// The source may be unbounded. Assembly then relies on the configured
/// `max_data_points` cap; with the cap removed the build never finishes.
pub struct LazyData {
    slot: DataSlot,
    data_type: DataType,
    source: Box<ValueSource>,
}

impl LazyData {
    #[must_use]
    pub fn new<F, I>(data_type: DataType, source: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = DataValue>,
        I::IntoIter: 'static,
    {
        Self {
            slot: DataSlot::new(),
            data_type,
            source: Box::new(move || -> Box<dyn Iterator<Item = DataValue>> {
                Box::new(source().into_iter())
            }),
        }
    }

    #[must_use]
    pub fn into_ref(self) -> DataRef {
        Rc::new(self)
    }
}

impl fmt::Debug for LazyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyData")
            .field("slot", &self.slot)
            .field("data_type", &self.data_type)
            .finish_non_exhaustive()
    }
}

impl DataProvider for LazyData {
    fn slot(&self) -> &DataSlot {
        &self.slot
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn values(&self) -> Box<dyn Iterator<Item = DataValue> + '_> {
        (self.source)()
    }
}

/// Single-pass provider. Values pulled from the source are cached so that
/// later reads replay them before pulling further.
pub struct OnceData {
    slot: DataSlot,
    data_type: DataType,
    pending: RefCell<Option<Box<dyn Iterator<Item = DataValue>>>>,
    cache: RefCell<Vec<DataValue>>,
}

impl OnceData {
    #[must_use]
    pub fn new<I>(data_type: DataType, values: I) -> Self
    where
        I: IntoIterator<Item = DataValue>,
        I::IntoIter: 'static,
    {
        Self {
            slot: DataSlot::new(),
            data_type,
            pending: RefCell::new(Some(Box::new(values.into_iter()))),
            cache: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn into_ref(self) -> DataRef {
        Rc::new(self)
    }

    fn value_at(&self, index: usize) -> Option<DataValue> {
        if let Some(value) = self.cache.borrow().get(index) {
            return Some(value.clone());
        }
        let mut pending = self.pending.borrow_mut();
        let next = pending.as_mut()?.next();
        match next {
            Some(value) => {
                self.cache.borrow_mut().push(value.clone());
                Some(value)
            }
            None => {
                *pending = None;
                None
            }
        }
    }
}

impl fmt::Debug for OnceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceData")
            .field("slot", &self.slot)
            .field("data_type", &self.data_type)
            .field("cached", &self.cache.borrow().len())
            .field("exhausted", &self.pending.borrow().is_none())
            .finish()
    }
}

impl DataProvider for OnceData {
    fn slot(&self) -> &DataSlot {
        &self.slot
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn values(&self) -> Box<dyn Iterator<Item = DataValue> + '_> {
        let mut index = 0;
        Box::new(std::iter::from_fn(move || {
            let value = self.value_at(index)?;
            index += 1;
            Some(value)
        }))
    }
}

/// Insertion-ordered set of providers keyed by instance identity.
///
/// Two providers holding equal values are still distinct entries.
#[derive(Debug, Default)]
pub struct DataDeclarations {
    providers: IndexMap<PartId, DataRef>,
}

impl DataDeclarations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the provider was not declared before.
    pub fn declare(&mut self, provider: &DataRef) -> bool {
        if self.providers.contains_key(&provider.key()) {
            return false;
        }
        self.providers.insert(provider.key(), Rc::clone(provider));
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataRef> {
        self.providers.values()
    }

    #[must_use]
    pub fn into_providers(self) -> Vec<DataRef> {
        self.providers.into_values().collect()
    }
}

/// Parts that reference data providers.
pub trait DataOwning {
    fn declare_data(&self, declarations: &mut DataDeclarations);
}
