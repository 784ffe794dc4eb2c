//! Schema-driven hydration of raw JSON into typed records.
//!
//! [`Record::hydrate`] walks the declared fields of a [`Schema`] and, for each one present in the
//! raw mapping, either passes the value through, recursively hydrates a nested object, or
//! hydrates a list element-wise. Nothing here can fail: when the payload does not have the
//! declared shape the raw value is kept as-is.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::schema::{FieldType, Schema};

/// A hydrated field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Pass-through JSON (primitive fields, or a payload whose shape did not match).
    Raw(Value),
    /// A nested object hydrated against its declared schema.
    Record(Record),
    /// A list hydrated element-wise.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Borrow the pass-through JSON value, if this is one.
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the nested record, if this is one.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Borrow the hydrated list, if this is one.
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow a pass-through string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_raw().and_then(Value::as_str)
    }

    /// Render back to plain JSON.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Raw(value) => value.clone(),
            Self::Record(record) => record.to_value(),
            Self::List(items) => Value::Array(items.iter().map(FieldValue::to_value).collect()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<Record> for FieldValue {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::List(items)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Raw(Value::String(value.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Raw(Value::String(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Raw(Value::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Raw(Value::from(value))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Raw(value) => value.serialize(serializer),
            Self::Record(record) => record.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Hydrate one raw JSON value against a declared field type.
///
/// Null never reaches this function from [`Record::hydrate`]; list elements that are null are
/// kept as `Raw(Null)`.
pub fn hydrate_value(field_type: &FieldType, raw: Value) -> FieldValue {
    match (field_type, raw) {
        (FieldType::Structured(schema), Value::Object(map)) => {
            FieldValue::Record(Record::from_map(*schema, map))
        }
        (FieldType::ListOf(element), Value::Array(items)) => FieldValue::List(
            items
                .into_iter()
                .map(|item| hydrate_value(element, item))
                .collect(),
        ),
        (_, raw) => FieldValue::Raw(raw),
    }
}

/// Hydrate a field value that may already be typed.
///
/// Raw values go through [`hydrate_value`]; records are accepted as they are; lists are walked so
/// that raw elements inside an otherwise typed list still get hydrated. Applying this twice gives
/// the same result as applying it once.
pub fn hydrate_field(field_type: &FieldType, value: FieldValue) -> FieldValue {
    match (field_type, value) {
        (_, FieldValue::Raw(raw)) => hydrate_value(field_type, raw),
        (FieldType::ListOf(element), FieldValue::List(items)) => FieldValue::List(
            items
                .into_iter()
                .map(|item| hydrate_field(element, item))
                .collect(),
        ),
        (_, typed) => typed,
    }
}

/// A response value conforming to a [`Schema`].
///
/// Every declared field is either absent or holds a [`FieldValue`]. The raw JSON the record was
/// built from is kept verbatim so callers can reach fields the schema does not model.
#[derive(Clone)]
pub struct Record {
    schema: &'static Schema,
    fields: Vec<Option<FieldValue>>,
    raw: Value,
}

impl Record {
    /// Hydrate a raw JSON value against `schema`.
    ///
    /// A non-object value produces a record with every field absent; the value itself is still
    /// retained as [`Record::raw`].
    pub fn hydrate(schema: &'static Schema, raw: Value) -> Self {
        let fields = match &raw {
            Value::Object(map) => Self::hydrate_fields(schema, map),
            _ => vec![None; schema.len()],
        };
        Self {
            schema,
            fields,
            raw,
        }
    }

    /// Hydrate a raw JSON mapping against `schema`.
    pub fn from_map(schema: &'static Schema, map: Map<String, Value>) -> Self {
        Self::hydrate(schema, Value::Object(map))
    }

    /// Build a record from already-available field values, without a wire payload.
    ///
    /// Names the schema does not declare are ignored. Raw values are hydrated against their
    /// declared types; records and lists supplied directly are kept. The retained raw value is
    /// the JSON rendering of the supplied fields.
    pub fn from_fields<I, K>(schema: &'static Schema, values: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: AsRef<str>,
    {
        let mut fields: Vec<Option<FieldValue>> = vec![None; schema.len()];
        for (name, value) in values {
            let Some(index) = schema.position(name.as_ref()) else {
                continue;
            };
            if matches!(value, FieldValue::Raw(Value::Null)) {
                fields[index] = None;
                continue;
            }
            let field_type = schema.fields()[index].field_type();
            fields[index] = Some(hydrate_field(field_type, value));
        }

        let mut record = Self {
            schema,
            fields,
            raw: Value::Null,
        };
        record.raw = record.to_value();
        record
    }

    /// A record with every field absent.
    pub fn empty(schema: &'static Schema) -> Self {
        Self::from_map(schema, Map::new())
    }

    fn hydrate_fields(schema: &'static Schema, map: &Map<String, Value>) -> Vec<Option<FieldValue>> {
        schema
            .fields()
            .iter()
            .map(|field| match map.get(field.name()) {
                None | Some(Value::Null) => None,
                Some(raw) => Some(hydrate_value(field.field_type(), raw.clone())),
            })
            .collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Schema this record conforms to.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// The raw JSON the record was built from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Look up a key in the raw payload, whether or not the schema declares it.
    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    /// Hydrated value of a declared field. `None` if absent or undeclared.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .position(name)
            .and_then(|index| self.fields[index].as_ref())
    }

    /// Returns `true` if the declared field holds a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Pass-through JSON of a field.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(FieldValue::as_raw)
    }

    /// String value of a pass-through field.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    /// Boolean value of a pass-through field.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(Value::as_bool)
    }

    /// Integer value of a pass-through field.
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(Value::as_i64)
    }

    /// Floating point value of a pass-through field.
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_f64)
    }

    /// Nested record of a structured field.
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(FieldValue::as_record)
    }

    /// Hydrated list of a list field.
    pub fn list(&self, name: &str) -> Option<&[FieldValue]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    /// Records of a list-of-structured field, skipping elements that did not hydrate.
    pub fn records(&self, name: &str) -> Vec<&Record> {
        self.list(name)
            .map(|items| items.iter().filter_map(FieldValue::as_record).collect())
            .unwrap_or_default()
    }

    /// Strings of a list-of-primitives field, skipping non-string elements.
    pub fn strings(&self, name: &str) -> Vec<&str> {
        self.list(name)
            .map(|items| items.iter().filter_map(FieldValue::as_str).collect())
            .unwrap_or_default()
    }

    /// Declared fields with their values, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&FieldValue>)> + '_ {
        self.schema
            .fields()
            .iter()
            .zip(self.fields.iter())
            .map(|(field, value)| (field.name(), value.as_ref()))
    }

    /// Render the typed view back to JSON. Absent fields are omitted.
    pub fn to_value(&self) -> Value {
        let map = self
            .fields()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v.to_value())))
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.fields == other.fields
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.schema.name());
        for (name, value) in self.fields() {
            out.field(name, &value);
        }
        out.finish()
    }
}

/// Writes the raw payload as compact JSON.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.fields.iter().filter(|v| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (name, value) in self.fields() {
            if let Some(value) = value {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    lazy_static::lazy_static! {
        static ref FILL: Schema = Schema::builder("Fill")
            .primitive("price")
            .primitive("qty")
            .build();
        static ref ORDER: Schema = Schema::builder("Order")
            .primitive("id")
            .list_of_structured("fills", &FILL)
            .structured("last_fill", &FILL)
            .list_of_primitives("tags")
            .build();
        static ref MATRIX: Schema = Schema::builder("Matrix")
            .list_of("rows", FieldType::list_of(FieldType::Structured(&FILL)))
            .build();
    }

    #[test]
    fn test_hydrates_nested_list() {
        let record = Record::hydrate(
            &ORDER,
            json!({"id": "o1", "fills": [{"price": "100", "qty": "1"}]}),
        );

        assert_eq!(record.str("id"), Some("o1"));
        let fills = record.records("fills");
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].str("price"), Some("100"));
        assert!(std::ptr::eq(fills[0].schema(), &*FILL));
    }

    #[test]
    fn test_missing_and_null_fields_stay_absent() {
        let record = Record::hydrate(&ORDER, json!({"id": null}));
        for (_, value) in record.fields() {
            assert!(value.is_none());
        }
        assert_eq!(record, Record::empty(&ORDER));
    }

    #[test]
    fn test_shape_mismatch_passes_through() {
        let record = Record::hydrate(
            &ORDER,
            json!({"last_fill": 42, "fills": {"price": "1"}, "tags": "x"}),
        );

        assert_eq!(record.value("last_fill"), Some(&json!(42)));
        assert_eq!(record.value("fills"), Some(&json!({"price": "1"})));
        assert_eq!(record.value("tags"), Some(&json!("x")));
        assert!(record.record("last_fill").is_none());
    }

    #[test]
    fn test_primitive_field_keeps_objects_raw() {
        lazy_static::lazy_static! {
            static ref LOOSE: Schema = Schema::builder("Loose").primitive("blob").build();
        }
        let record = Record::hydrate(&LOOSE, json!({"blob": {"a": [1, 2]}}));
        assert_eq!(record.value("blob"), Some(&json!({"a": [1, 2]})));
    }

    #[test]
    fn test_list_elements_mismatch_individually() {
        let record = Record::hydrate(
            &ORDER,
            json!({"fills": [{"price": "1"}, "oops", null, 7]}),
        );
        let items = record.list("fills").unwrap();
        assert_eq!(items.len(), 4);
        assert!(items[0].as_record().is_some());
        assert_eq!(items[1].as_raw(), Some(&json!("oops")));
        assert_eq!(items[2].as_raw(), Some(&Value::Null));
        assert_eq!(items[3].as_raw(), Some(&json!(7)));
        assert_eq!(record.records("fills").len(), 1);
    }

    #[test]
    fn test_nested_lists_hydrate_recursively() {
        let record = Record::hydrate(
            &MATRIX,
            json!({"rows": [[{"price": "1"}], [{"price": "2"}, {"price": "3"}]]}),
        );
        let rows = record.list("rows").unwrap();
        let second = rows[1].as_list().unwrap();
        assert_eq!(second[1].as_record().unwrap().str("price"), Some("3"));
    }

    #[test]
    fn test_non_object_top_level_is_retained() {
        let record = Record::hydrate(&ORDER, json!([1, 2, 3]));
        assert!(record.fields().all(|(_, v)| v.is_none()));
        assert_eq!(record.raw(), &json!([1, 2, 3]));
        assert_eq!(record.to_string(), "[1,2,3]");
    }

    #[test]
    fn test_extra_keys_live_only_in_raw() {
        let record = Record::hydrate(&FILL, json!({"price": "1", "venue": "X"}));
        assert_eq!(record.raw_field("venue"), Some(&json!("X")));
        assert!(record.get("venue").is_none());
        assert_eq!(record.to_value(), json!({"price": "1"}));
    }

    #[test]
    fn test_from_fields_accepts_typed_and_raw_values() {
        let fill = Record::hydrate(&FILL, json!({"price": "5"}));
        let record = Record::from_fields(
            &ORDER,
            vec![
                ("id", FieldValue::from("o2")),
                ("last_fill", FieldValue::from(fill.clone())),
                ("fills", FieldValue::from(json!([{"price": "6"}]))),
                ("unknown", FieldValue::from(true)),
            ],
        );

        assert_eq!(record.record("last_fill"), Some(&fill));
        assert_eq!(record.records("fills")[0].str("price"), Some("6"));
        assert_eq!(
            record.raw(),
            &json!({"id": "o2", "fills": [{"price": "6"}], "last_fill": {"price": "5"}})
        );
    }

    #[test]
    fn test_hydrate_field_is_idempotent() {
        let ty = FieldType::list_of(FieldType::Structured(&FILL));
        let once = hydrate_value(&ty, json!([{"price": "1"}, 3]));
        let twice = hydrate_field(&ty, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rehydrating_a_record_is_idempotent() {
        let raw = json!({
            "id": "o1",
            "fills": [{"price": "1", "qty": "2"}, "oops", null],
            "last_fill": 42,
            "tags": ["a", "b"],
            "extra": true
        });
        let first = Record::hydrate(&ORDER, raw);

        let from_typed = Record::from_fields(
            &ORDER,
            first
                .fields()
                .filter_map(|(name, value)| value.map(|v| (name, v.clone()))),
        );
        assert_eq!(from_typed, first);

        let from_view = Record::hydrate(&ORDER, first.to_value());
        assert_eq!(from_view, first);
        assert_eq!(Record::hydrate(&ORDER, from_view.to_value()), from_view);
    }

    #[test]
    fn test_serialize_renders_typed_view() {
        let record = Record::hydrate(
            &ORDER,
            json!({"id": "o1", "fills": [{"price": "1", "extra": 0}], "other": 1}),
        );
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(text, r#"{"id":"o1","fills":[{"price":"1"}]}"#);
    }

    #[test]
    fn test_debug_uses_schema_name() {
        let record = Record::hydrate(&FILL, json!({"price": "1"}));
        let out = format!("{:?}", record);
        assert!(out.starts_with("Fill"));
        assert!(out.contains("price"));
    }
}
