//! A small asynchronous schema validation engine
//!
//! This crate checks untyped [`Value`]s against declarative schemas and hands back typed
//! outputs. It is the validation layer under `micro-endpoint`, but it has no knowledge of HTTP.
//!
//! # Features
//!
//! - Tagged dynamic values, where raw byte buffers are a variant of their own
//! - Composable combinators: [`object`], [`field`], [`string`], [`mixed`], [`bytes`], [`any`]
//! - Output types inferred from the schema through [`Schema::Output`]
//! - Every failing field reported in one [`ValidationError`], or the first one only with
//!   [`ValidateOptions::abort_early`]
//! - No coercion: values are accepted as they are, or rejected
//!
//! # Example
//!
//! ```
//! use micro_schema::{field, object, string, Schema, SchemaExt, Value};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let schema = object()
//!     .shape((field("name", string().required()), field("zip", string().required())))
//!     .required();
//!
//! let (name, zip) = schema
//!     .validate(Value::object([("name", "hello"), ("zip", "world")]))
//!     .await
//!     .unwrap();
//! assert_eq!((name.as_str(), zip.as_str()), ("hello", "world"));
//!
//! let error = schema.validate(Value::object([("name", 1)])).await.unwrap_err();
//! assert_eq!(error.violations().len(), 2);
//! # });
//! ```

mod error;
mod options;
mod schema;
mod value;

pub use error::ValidationError;
pub use error::Violation;
pub use options::ValidateOptions;
pub use schema::{any, bytes, field, is_byte_container, mixed, object, string};
pub use schema::{AnySchema, BoxSchema, Field, Map, MixedSchema, ObjectSchema, Required, Schema, SchemaExt, Shape, StringSchema, WithUnknown};
pub use value::{Value, ValueMap};
