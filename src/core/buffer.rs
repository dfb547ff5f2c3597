//! Append-only JSON text buffer.
//!
//! Every writer records where its body starts. A separator is written only
//! when the buffer has grown past that mark, and tentative nested objects are
//! truncated back when their body stayed empty. Callers never need to know in
//! advance whether an optional sub-encoder will emit anything.

use serde_json::{Number, Value};

use crate::error::ChartResult;

/// Largest magnitude at which every integer is exactly representable in `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Converts a float to a JSON value.
///
/// Integral values are written without a fractional part; non-finite values
/// become `null`.
#[must_use]
pub fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        return Value::from(value as i64);
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonBuffer {
    text: String,
}

impl JsonBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Appends one complete object.
    pub fn object<F>(&mut self, write: F) -> ChartResult<()>
    where
        F: FnOnce(&mut ObjectWriter<'_>) -> ChartResult<()>,
    {
        let mut object = ObjectWriter::open(&mut self.text);
        write(&mut object)?;
        object.close();
        Ok(())
    }

    /// Appends one complete array.
    pub fn array<F>(&mut self, write: F) -> ChartResult<()>
    where
        F: FnOnce(&mut ArrayWriter<'_>) -> ChartResult<()>,
    {
        let mut array = ArrayWriter::open(&mut self.text);
        write(&mut array)?;
        array.close();
        Ok(())
    }
}

/// Writes the members of one JSON object.
pub struct ObjectWriter<'a> {
    text: &'a mut String,
    body_start: usize,
}

impl<'a> ObjectWriter<'a> {
    fn open(text: &'a mut String) -> Self {
        text.push('{');
        let body_start = text.len();
        Self { text, body_start }
    }

    fn close(self) {
        self.text.push('}');
    }

    /// True while no member has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.len() == self.body_start
    }

    fn begin_member(&mut self, key: &str) {
        if !self.is_empty() {
            self.text.push(',');
        }
        self.text.push_str(&Value::from(key).to_string());
        self.text.push(':');
    }

    pub fn value(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.begin_member(key);
        self.text.push_str(&value.into().to_string());
        self
    }

    pub fn number(&mut self, key: &str, value: f64) -> &mut Self {
        self.value(key, number_value(value))
    }

    /// Writes the member only when `value` is set.
    pub fn optional<T: Into<Value>>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.value(key, value);
        }
        self
    }

    pub fn optional_number(&mut self, key: &str, value: Option<f64>) -> &mut Self {
        if let Some(value) = value {
            self.number(key, value);
        }
        self
    }

    /// Writes a nested object, removing it again if its body stayed empty.
    ///
    /// Returns whether the member was kept.
    pub fn object<F>(&mut self, key: &str, write: F) -> ChartResult<bool>
    where
        F: FnOnce(&mut ObjectWriter<'_>) -> ChartResult<()>,
    {
        let mark = self.text.len();
        self.begin_member(key);
        let mut nested = ObjectWriter::open(&mut *self.text);
        write(&mut nested)?;
        if nested.is_empty() {
            self.text.truncate(mark);
            return Ok(false);
        }
        nested.close();
        Ok(true)
    }

    /// Writes a nested array. Empty arrays are kept.
    pub fn array<F>(&mut self, key: &str, write: F) -> ChartResult<()>
    where
        F: FnOnce(&mut ArrayWriter<'_>) -> ChartResult<()>,
    {
        self.begin_member(key);
        let mut nested = ArrayWriter::open(&mut *self.text);
        write(&mut nested)?;
        nested.close();
        Ok(())
    }

    /// Runs a sub-encoder that writes members straight into this object.
    ///
    /// Returns whether it appended anything.
    pub fn inline<F>(&mut self, write: F) -> ChartResult<bool>
    where
        F: FnOnce(&mut ObjectWriter<'_>) -> ChartResult<()>,
    {
        let before = self.text.len();
        write(self)?;
        Ok(self.text.len() > before)
    }
}

/// Writes the items of one JSON array.
pub struct ArrayWriter<'a> {
    text: &'a mut String,
    body_start: usize,
    items: usize,
}

impl<'a> ArrayWriter<'a> {
    fn open(text: &'a mut String) -> Self {
        text.push('[');
        let body_start = text.len();
        Self {
            text,
            body_start,
            items: 0,
        }
    }

    fn close(self) {
        self.text.push(']');
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.len() == self.body_start
    }

    #[must_use]
    pub fn items(&self) -> usize {
        self.items
    }

    fn begin_item(&mut self) {
        if !self.is_empty() {
            self.text.push(',');
        }
        self.items += 1;
    }

    pub fn value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.begin_item();
        self.text.push_str(&value.into().to_string());
        self
    }

    pub fn number(&mut self, value: f64) -> &mut Self {
        self.value(number_value(value))
    }

    pub fn object<F>(&mut self, write: F) -> ChartResult<()>
    where
        F: FnOnce(&mut ObjectWriter<'_>) -> ChartResult<()>,
    {
        self.begin_item();
        let mut nested = ObjectWriter::open(&mut *self.text);
        write(&mut nested)?;
        nested.close();
        Ok(())
    }

    pub fn array<F>(&mut self, write: F) -> ChartResult<()>
    where
        F: FnOnce(&mut ArrayWriter<'_>) -> ChartResult<()>,
    {
        self.begin_item();
        let mut nested = ArrayWriter::open(&mut *self.text);
        write(&mut nested)?;
        nested.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{JsonBuffer, number_value};
    use crate::error::ChartError;

    #[test]
    fn optional_members_leave_no_dangling_separators() {
        let mut buffer = JsonBuffer::new();
        buffer
            .object(|object| {
                object.optional::<&str>("name", None);
                object.value("id", 7u64);
                object.optional_number("left", None);
                object.optional("show", Some(true));
                Ok(())
            })
            .expect("encode");
        assert_eq!(buffer.as_str(), r#"{"id":7,"show":true}"#);
    }

    #[test]
    fn empty_nested_objects_are_rolled_back() {
        let mut buffer = JsonBuffer::new();
        buffer
            .object(|object| {
                let kept = object.object("emphasis", |emphasis| {
                    emphasis.object("itemStyle", |_| Ok(()))?;
                    Ok(())
                })?;
                assert!(!kept);
                object.value("id", 1u64);
                let kept = object.object("label", |label| {
                    label.value("show", false);
                    Ok(())
                })?;
                assert!(kept);
                Ok(())
            })
            .expect("encode");
        assert_eq!(buffer.as_str(), r#"{"id":1,"label":{"show":false}}"#);
    }

    #[test]
    fn inline_reports_whether_it_wrote() {
        let mut buffer = JsonBuffer::new();
        buffer
            .object(|object| {
                assert!(!object.inline(|_| Ok(()))?);
                assert!(object.inline(|inner| {
                    inner.value("top", "10%");
                    Ok(())
                })?);
                Ok(())
            })
            .expect("encode");
        assert_eq!(buffer.as_str(), r#"{"top":"10%"}"#);
    }

    #[test]
    fn arrays_separate_items_and_escape_text() {
        let mut buffer = JsonBuffer::new();
        buffer
            .array(|array| {
                array.number(1.0).number(2.5).value("a\"b");
                array.array(|_| Ok(()))?;
                assert_eq!(array.items(), 4);
                Ok(())
            })
            .expect("encode");
        assert_eq!(buffer.as_str(), r#"[1,2.5,"a\"b",[]]"#);
        let parsed: Value = serde_json::from_str(buffer.as_str()).expect("valid json");
        assert_eq!(parsed, json!([1, 2.5, "a\"b", []]));
    }

    #[test]
    fn failing_sub_encoder_propagates() {
        let mut buffer = JsonBuffer::new();
        let err = buffer
            .object(|object| {
                object.object("nested", |_| {
                    Err(ChartError::EmptyData("nothing to write".to_owned()))
                })?;
                Ok(())
            })
            .expect_err("must fail");
        assert!(matches!(err, ChartError::EmptyData(_)));
    }

    #[test]
    fn non_finite_numbers_become_null() {
        assert_eq!(number_value(f64::NAN), Value::Null);
        assert_eq!(number_value(f64::INFINITY), Value::Null);
        assert_eq!(number_value(3.0), json!(3));
        assert_eq!(number_value(-0.25), json!(-0.25));
    }
}
