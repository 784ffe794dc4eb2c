//! Response hydration.
//!
//! Every API response is described by a static [`Schema`]. Raw JSON bodies are turned into
//! [`Record`]s by walking that schema: structured fields become nested records, lists of
//! structured fields become lists of records, and anything that does not match its declared
//! shape is kept verbatim instead of being rejected.
//!
//! ```rust,ignore
//! use prime_sdk::hydrate::{hydrate, Schema};
//! use serde_json::json;
//!
//! lazy_static::lazy_static! {
//!     static ref FILL: Schema = Schema::builder("Fill").primitive("price").build();
//!     static ref ORDER: Schema = Schema::builder("Order")
//!         .primitive("id")
//!         .list_of_structured("fills", &FILL)
//!         .build();
//! }
//!
//! let order = hydrate(&ORDER, json!({"id": "o1", "fills": [{"price": "100"}]}));
//! assert_eq!(order.records("fills")[0].str("price"), Some("100"));
//! ```

pub mod record;
pub mod schema;

pub use record::{hydrate_field, hydrate_value, FieldValue, Record};
pub use schema::{Field, FieldType, Schema, SchemaBuilder};

/// Hydrate `raw` against `schema`. Never fails.
pub fn hydrate(schema: &'static Schema, raw: serde_json::Value) -> Record {
    Record::hydrate(schema, raw)
}

/// A response type built by hydrating a raw JSON body against its schema.
pub trait HydratedResponse: Sized {
    fn schema() -> &'static Schema;

    fn hydrate_raw(raw: serde_json::Value) -> Self;
}

/// Declare an endpoint response type backed by a [`Record`].
///
/// The generated newtype derefs to [`Record`], deserializes from any JSON body by hydrating it
/// against the given schema, serializes its typed view, and displays its raw payload.
macro_rules! hydrated_response {
    ($(#[$meta:meta])* $name:ident => $schema:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name($crate::hydrate::Record);

        impl $name {
            /// Schema this response is hydrated against.
            pub fn schema() -> &'static $crate::hydrate::Schema {
                &$schema
            }

            /// Hydrate a raw JSON body.
            pub fn from_value(raw: ::serde_json::Value) -> Self {
                Self($crate::hydrate::Record::hydrate(Self::schema(), raw))
            }

            /// Build the response directly from field values.
            pub fn from_fields<I, K>(values: I) -> Self
            where
                I: IntoIterator<Item = (K, $crate::hydrate::FieldValue)>,
                K: AsRef<str>,
            {
                Self($crate::hydrate::Record::from_fields(Self::schema(), values))
            }

            /// Borrow the underlying record.
            pub fn as_record(&self) -> &$crate::hydrate::Record {
                &self.0
            }

            /// Take the underlying record.
            pub fn into_record(self) -> $crate::hydrate::Record {
                self.0
            }
        }

        impl $crate::hydrate::HydratedResponse for $name {
            fn schema() -> &'static $crate::hydrate::Schema {
                &$schema
            }

            fn hydrate_raw(raw: ::serde_json::Value) -> Self {
                Self::from_value(raw)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::hydrate::Record;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)
                    .map(Self::from_value)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ::serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::convert::From<$name> for $crate::hydrate::Record {
            fn from(response: $name) -> Self {
                response.0
            }
        }
    };
}

pub(crate) use hydrated_response;
