//! Schema bound endpoint descriptors
//!
//! This crate describes, and checks, the data flowing into and out of a single endpoint
//! handler. It does not route requests, manage connections or serialize responses: a
//! dispatcher does that and hands its request and response objects through untouched.
//!
//! # Core Components
//!
//! - [`FileData`] and [`file_data_schema`]: validation of file upload payloads, where the body
//!   must be a genuine byte buffer
//! - [`Endpoint`]: a path, optional input and output schemas, a keep-open flag and a handler,
//!   whose input and output types are the ones the schemas produce
//! - [`EndpointHandler`]: implemented by every `async fn(Req, Resp, I) -> O`
//! - [`create_endpoint`]: the identity checkpoint descriptors pass through
//!
//! Schemas come from [`micro_schema`].
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use micro_endpoint::{create_endpoint, file_data_schema, Endpoint, FileData};
//! use micro_schema::{string, SchemaExt, Value};
//!
//! async fn upload(_req: (), _resp: (), file: FileData) -> String {
//!     format!("stored {} ({} bytes)", file.file_name(), file.body().len())
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let endpoint = create_endpoint(
//!     Endpoint::builder("/upload", upload)
//!         .input(file_data_schema())
//!         .output(string().required())
//!         .build(),
//! );
//!
//! let payload = Value::object([
//!     ("body", Value::from(Bytes::from_static(b"some data"))),
//!     ("fileName", Value::from("test.txt")),
//!     ("encoding", Value::from("utf-8")),
//!     ("mimeType", Value::from("text/plain")),
//! ]);
//!
//! let output = endpoint.dispatch((), (), payload).await.unwrap();
//! assert_eq!(output, "stored test.txt (9 bytes)");
//! # });
//! ```

mod endpoint;
mod handler;

pub mod file_data;

pub use endpoint::create_endpoint;
pub use endpoint::Endpoint;
pub use endpoint::EndpointBuilder;
pub use file_data::file_data_schema;
pub use file_data::FileData;
pub use file_data::FileDataSchema;
pub use handler::EndpointHandler;
