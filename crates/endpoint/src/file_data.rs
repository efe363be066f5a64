//! File upload payloads: a raw byte body with its file name, encoding and MIME type.
//!
//! [`file_data_schema`] validates an untyped [`Value`] into a [`FileData`]. The body must be a
//! genuine byte buffer ([`Value::Bytes`]): text, or an array of numbers decoded from JSON, is
//! rejected even when it holds the same bytes. The three text fields must be present and
//! non-empty. Nothing is normalized, `encoding` and `mime_type` are kept exactly as given, and
//! any other keys of the payload are kept in [`FileData::extra`], so converting the result back
//! into a [`Value`] yields the validated input.

use async_trait::async_trait;
use bytes::Bytes;
use micro_schema::{
    bytes, field, object, string, Field, Map, MixedSchema, ObjectSchema, Required, Schema, SchemaExt, StringSchema,
    ValidateOptions, ValidationError, Value, ValueMap, WithUnknown,
};
use mime::Mime;
use once_cell::sync::Lazy;

pub const BODY: &str = "body";
pub const FILE_NAME: &str = "fileName";
pub const ENCODING: &str = "encoding";
pub const MIME_TYPE: &str = "mimeType";

/// A validated file payload, see the [module docs](self)
#[derive(Debug, Clone, PartialEq)]
pub struct FileData {
    body: Bytes,
    file_name: String,
    encoding: String,
    mime_type: String,
    extra: ValueMap,
}

impl FileData {
    fn from_parts(((body, file_name, encoding, mime_type), extra): FileDataParts) -> Self {
        Self { body, file_name, encoding, mime_type, extra }
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// the name of the byte to text decoding of `body`, as supplied
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Parses [`FileData::mime_type`], `None` when it isn't a well formed media type
    pub fn mime(&self) -> Option<Mime> {
        self.mime_type.parse().ok()
    }

    /// the payload's keys other than the four file fields, untouched
    pub fn extra(&self) -> &ValueMap {
        &self.extra
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Turns the payload back into the shape it was validated from
impl From<FileData> for Value {
    fn from(file: FileData) -> Self {
        let mut map = file.extra;
        map.insert(BODY.to_owned(), Value::Bytes(file.body));
        map.insert(FILE_NAME.to_owned(), Value::String(file.file_name));
        map.insert(ENCODING.to_owned(), Value::String(file.encoding));
        map.insert(MIME_TYPE.to_owned(), Value::String(file.mime_type));
        Value::Object(map)
    }
}

type BodySchema = Required<MixedSchema<fn(Value) -> Result<Bytes, Value>>>;
type TextSchema = Required<StringSchema>;
type FileDataShape = (Field<BodySchema>, Field<TextSchema>, Field<TextSchema>, Field<TextSchema>);
type FileDataParts = ((Bytes, String, String, String), ValueMap);

/// The [`Schema`] of [`FileData`]
#[derive(Debug, Clone)]
pub struct FileDataSchema {
    inner: Map<Required<ObjectSchema<WithUnknown<FileDataShape>>>, fn(FileDataParts) -> FileData>,
}

impl FileDataSchema {
    pub fn new() -> Self {
        let shape = (
            field(BODY, bytes().required()),
            field(FILE_NAME, string().required()),
            field(ENCODING, string().required()),
            field(MIME_TYPE, string().required()),
        );
        let inner = object().shape(shape).with_unknown().required().map(FileData::from_parts as fn(FileDataParts) -> FileData);
        Self { inner }
    }
}

impl Default for FileDataSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Schema for FileDataSchema {
    type Output = FileData;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        self.inner.validate_with(value, options).await
    }
}

static FILE_DATA_SCHEMA: Lazy<FileDataSchema> = Lazy::new(FileDataSchema::new);

/// The shared [`FileDataSchema`] instance
///
/// # Example
/// ```
/// use bytes::Bytes;
/// use micro_endpoint::file_data_schema;
/// use micro_schema::{Schema, Value};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let candidate = Value::object([
///     ("body", Value::from(Bytes::from_static(b"some data"))),
///     ("fileName", Value::from("test.txt")),
///     ("encoding", Value::from("utf-8")),
///     ("mimeType", Value::from("text/plain")),
/// ]);
///
/// let file = file_data_schema().validate(candidate.clone()).await.unwrap();
/// assert_eq!(file.file_name(), "test.txt");
/// assert_eq!(Value::from(file), candidate);
/// # });
/// ```
pub fn file_data_schema() -> &'static FileDataSchema {
    &FILE_DATA_SCHEMA
}

#[cfg(test)]
mod tests {
    use crate::file_data::{file_data_schema, FileData};
    use bytes::Bytes;
    use futures::future::join_all;
    use micro_schema::{Schema, ValidateOptions, Value};
    use serde_json::json;

    fn valid_file_data() -> Value {
        Value::object([
            ("body", Value::from(Bytes::from("some data"))),
            ("fileName", Value::from("test.txt")),
            ("encoding", Value::from("utf-8")),
            ("mimeType", Value::from("text/plain")),
        ])
    }

    fn with(key: &str, value: Value) -> Value {
        let Value::Object(mut map) = valid_file_data() else { unreachable!() };
        map.insert(key.to_owned(), value);
        Value::Object(map)
    }

    fn without(key: &str) -> Value {
        let Value::Object(mut map) = valid_file_data() else { unreachable!() };
        map.remove(key);
        Value::Object(map)
    }

    #[tokio::test]
    async fn test_validates_valid_file_data() {
        let file = file_data_schema().validate(valid_file_data()).await.unwrap();

        assert_eq!(file.body(), &Bytes::from("some data"));
        assert_eq!(file.file_name(), "test.txt");
        assert_eq!(file.encoding(), "utf-8");
        assert_eq!(file.mime_type(), "text/plain");
        assert_eq!(Value::from(file), valid_file_data());
    }

    #[tokio::test]
    async fn test_rejects_invalid_file_data() {
        let candidate = Value::object([
            ("body", Value::from("not a buffer")),
            ("fileName", Value::from(123)),
            ("encoding", Value::from("utf-8")),
            ("mimeType", Value::from("text/plain")),
        ]);

        let error = file_data_schema().validate(candidate).await.unwrap_err();
        assert_eq!(error.violations().len(), 2);
        assert!(error.has_violation("body"));
        assert!(error.has_violation("fileName"));
    }

    #[tokio::test]
    async fn test_rejects_buffer_lookalikes() {
        let lookalikes = [
            Value::from("some data"),
            Value::Array(b"some data".iter().map(|b| Value::from(*b)).collect()),
            Value::object([("type", Value::from("Buffer")), ("data", Value::Array(vec![Value::from(115)]))]),
            Value::from(9),
        ];

        for body in lookalikes {
            let error = file_data_schema().validate(with("body", body)).await.unwrap_err();
            assert!(error.has_violation("body"), "{error}");
            assert_eq!(error.violations().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_rejects_json_payload() {
        // a JSON body can only carry the bytes as an array of numbers
        let candidate = Value::from(json!({
            "body": [115, 111, 109, 101],
            "fileName": "test.txt",
            "encoding": "utf-8",
            "mimeType": "text/plain",
        }));

        let error = file_data_schema().validate(candidate).await.unwrap_err();
        assert!(error.has_violation("body"));
    }

    #[tokio::test]
    async fn test_rejects_missing_fields() {
        for key in ["body", "fileName", "encoding", "mimeType"] {
            let error = file_data_schema().validate(without(key)).await.unwrap_err();
            assert_eq!(error.violations().len(), 1);
            assert_eq!(error.violations()[0].path(), key);
            assert_eq!(error.violations()[0].message(), "is a required field");

            assert!(file_data_schema().validate(with(key, Value::Null)).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_rejects_empty_file_name() {
        let error = file_data_schema().validate(with("fileName", Value::from(""))).await.unwrap_err();
        assert!(error.has_violation("fileName"));
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let error = file_data_schema().validate(Value::from(b"some data".to_vec())).await.unwrap_err();
        assert_eq!(error.violations()[0].message(), "expected object, got bytes");

        assert!(file_data_schema().validate(Value::Null).await.is_err());
    }

    #[tokio::test]
    async fn test_reports_every_failing_field() {
        let error = file_data_schema().validate(Value::object([("unknown", 1)])).await.unwrap_err();
        let paths = error.violations().iter().map(|v| v.path()).collect::<Vec<_>>();
        assert_eq!(paths, vec!["body", "fileName", "encoding", "mimeType"]);

        let options = ValidateOptions::new().abort_early(true);
        let error = file_data_schema().validate_with(Value::object([("unknown", 1)]), &options).await.unwrap_err();
        assert_eq!(error.violations().len(), 1);
        assert!(error.has_violation("body"));
    }

    #[tokio::test]
    async fn test_passes_through_verbatim() {
        let candidate = Value::object([
            ("body", Value::from(Bytes::from_static(b"caf\xe9"))),
            ("fileName", Value::from("menu.txt")),
            ("encoding", Value::from("  Latin-1 ")),
            ("mimeType", Value::from("Text/Plain; charset=ISO-8859-1")),
            ("size", Value::from(4)),
        ]);

        let file = file_data_schema().validate(candidate.clone()).await.unwrap();
        assert_eq!(file.body().as_ref(), b"caf\xe9");
        assert_eq!(file.encoding(), "  Latin-1 ");
        assert_eq!(file.mime_type(), "Text/Plain; charset=ISO-8859-1");
        assert_eq!(Value::from(file), candidate);
    }

    #[tokio::test]
    async fn test_keeps_unknown_keys() {
        let candidate = with("size", Value::from(9));

        let file = file_data_schema().validate(candidate.clone()).await.unwrap();
        assert_eq!(file.extra().len(), 1);
        assert_eq!(file.extra().get("size"), Some(&Value::from(9)));
        assert_eq!(Value::from(file), candidate);

        let file = file_data_schema().validate(valid_file_data()).await.unwrap();
        assert!(file.extra().is_empty());
    }

    #[tokio::test]
    async fn test_mime() {
        let file = file_data_schema().validate(valid_file_data()).await.unwrap();
        assert_eq!(file.mime(), Some(mime::TEXT_PLAIN));

        let file = file_data_schema().validate(with("mimeType", Value::from("not a mime"))).await.unwrap();
        assert_eq!(file.mime_type(), "not a mime");
        assert!(file.mime().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_validation() {
        let candidates = (0..16).map(|i| with("fileName", Value::from(format!("file-{i}.txt"))));

        let handles = candidates
            .map(|candidate| tokio::spawn(async move { file_data_schema().validate(candidate).await }))
            .collect::<Vec<_>>();

        let files = join_all(handles).await.into_iter().map(|r| r.unwrap().unwrap()).collect::<Vec<FileData>>();
        for (i, file) in files.iter().enumerate() {
            assert_eq!(file.file_name(), format!("file-{i}.txt"));
        }
    }
}
