//! Static response-shape descriptors.
//!
//! A [`Schema`] is an ordered list of field names, each with a declared [`FieldType`].
//! Schemas are built once (see [`crate::api::models`]) and shared as `&'static` data, so the
//! hydrator never inspects types at runtime beyond matching on the descriptor.

use std::fmt;

/// Declared type of a schema field.
#[derive(Clone)]
pub enum FieldType {
    /// Any JSON value, passed through unchanged.
    Primitive,
    /// A nested object described by another schema.
    Structured(&'static Schema),
    /// A JSON array whose elements follow the inner type.
    ListOf(Box<FieldType>),
}

impl FieldType {
    /// Shorthand for `ListOf(inner)`.
    pub fn list_of(inner: FieldType) -> Self {
        Self::ListOf(Box::new(inner))
    }

    /// Returns `true` for [`FieldType::Primitive`].
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive)
    }
}

// Structured schemas compare by identity: they are `'static` singletons, and following the
// reference would recurse forever on self-referencing shapes.
impl PartialEq for FieldType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive, Self::Primitive) => true,
            (Self::Structured(a), Self::Structured(b)) => std::ptr::eq(*a, *b),
            (Self::ListOf(a), Self::ListOf(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldType {}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => write!(f, "Primitive"),
            Self::Structured(schema) => write!(f, "Structured({})", schema.name()),
            Self::ListOf(inner) => write!(f, "ListOf({:?})", inner),
        }
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    field_type: FieldType,
}

impl Field {
    /// Field name as it appears in the JSON payload.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type.
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }
}

/// Ordered field name → type description for one response shape.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    /// Start describing a schema called `name`.
    pub fn builder(name: &'static str) -> SchemaBuilder {
        SchemaBuilder {
            name,
            fields: Vec::new(),
        }
    }

    /// Schema name (used for diagnostics only).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Index of a field in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`Schema`].
///
/// Declaring a name twice replaces the earlier declaration in place, so field names stay unique.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: &'static str,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Declare a field with an explicit type.
    pub fn field(mut self, name: &'static str, field_type: FieldType) -> Self {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(existing) => existing.field_type = field_type,
            None => self.fields.push(Field { name, field_type }),
        }
        self
    }

    /// Declare a pass-through field.
    pub fn primitive(self, name: &'static str) -> Self {
        self.field(name, FieldType::Primitive)
    }

    /// Declare several pass-through fields at once.
    pub fn primitives(self, names: &[&'static str]) -> Self {
        names.iter().fold(self, |builder, name| builder.primitive(name))
    }

    /// Declare a nested object field.
    pub fn structured(self, name: &'static str, schema: &'static Schema) -> Self {
        self.field(name, FieldType::Structured(schema))
    }

    /// Declare a list field with an arbitrary element type.
    pub fn list_of(self, name: &'static str, element: FieldType) -> Self {
        self.field(name, FieldType::list_of(element))
    }

    /// Declare a list of nested objects.
    pub fn list_of_structured(self, name: &'static str, schema: &'static Schema) -> Self {
        self.list_of(name, FieldType::Structured(schema))
    }

    /// Declare a list of pass-through values.
    pub fn list_of_primitives(self, name: &'static str) -> Self {
        self.list_of(name, FieldType::Primitive)
    }

    /// Finish the schema.
    pub fn build(self) -> Schema {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    lazy_static::lazy_static! {
        static ref INNER: Schema = Schema::builder("Inner").primitive("b").build();
        static ref OTHER: Schema = Schema::builder("Inner").primitive("b").build();
    }

    #[test]
    fn test_builder_preserves_declaration_order() {
        let schema = Schema::builder("Order")
            .primitive("id")
            .list_of_structured("fills", &INNER)
            .primitives(&["status", "side"])
            .build();

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["id", "fills", "status", "side"]);
        assert_eq!(schema.position("status"), Some(2));
        assert_eq!(schema.len(), 4);
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_redeclaring_field_replaces_type() {
        let schema = Schema::builder("S")
            .primitive("a")
            .primitive("b")
            .structured("a", &INNER)
            .build();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.position("a"), Some(0));
        assert_eq!(
            schema.field("a").map(|f| f.field_type().clone()),
            Some(FieldType::Structured(&INNER))
        );
    }

    #[test]
    fn test_structured_equality_is_by_identity() {
        assert_eq!(FieldType::Structured(&INNER), FieldType::Structured(&INNER));
        assert_ne!(FieldType::Structured(&INNER), FieldType::Structured(&OTHER));
        assert_eq!(
            FieldType::list_of(FieldType::Primitive),
            FieldType::ListOf(Box::new(FieldType::Primitive))
        );
    }

    #[test]
    fn test_debug_names_nested_schema() {
        let ty = FieldType::list_of(FieldType::Structured(&INNER));
        assert_eq!(format!("{:?}", ty), "ListOf(Structured(Inner))");
    }
}
