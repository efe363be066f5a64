use crate::error::ValidationError;
use crate::options::ValidateOptions;
use crate::schema::Schema;
use crate::value::Value;
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;

/// Accepts any value the `guard` narrows to `T`, a missing or null value yields `None`.
///
/// The guard is a runtime type check: it hands the value back as `Err` when the value is not a
/// `T`, and that is reported as a violation.
///
/// # Example
/// ```
/// # use micro_schema::{mixed, Value};
/// let flag = mixed(|value| match value {
///     Value::Bool(b) => Ok(b),
///     other => Err(other),
/// });
/// ```
pub fn mixed<F, T>(guard: F) -> MixedSchema<F>
where
    F: Fn(Value) -> Result<T, Value> + Send + Sync,
{
    MixedSchema { guard }
}

/// A raw byte buffer, see [`is_byte_container`]
pub fn bytes() -> MixedSchema<fn(Value) -> Result<Bytes, Value>> {
    mixed(narrow_bytes as fn(Value) -> Result<Bytes, Value>)
}

/// Returns true only for a genuine byte buffer.
///
/// Text, arrays of numbers and objects shaped like buffers are not byte containers, whatever
/// their content.
#[inline]
pub fn is_byte_container(value: &Value) -> bool {
    value.is_bytes()
}

fn narrow_bytes(value: Value) -> Result<Bytes, Value> {
    match value {
        Value::Bytes(bytes) => Ok(bytes),
        other => Err(other),
    }
}

/// Schema returned by [`mixed`] and [`bytes`]
#[derive(Clone)]
pub struct MixedSchema<F> {
    guard: F,
}

impl<F> fmt::Debug for MixedSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MixedSchema").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, T> Schema for MixedSchema<F>
where
    F: Fn(Value) -> Result<T, Value> + Send + Sync,
{
    type Output = Option<T>;

    async fn validate_with(&self, value: Value, _options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        if value.is_null() {
            return Ok(None);
        }

        (self.guard)(value)
            .map(Some)
            .map_err(|rejected| ValidationError::single("", format!("failed type check, got {}", rejected.type_name())))
    }
}

/// Accepts every value as is, null included
pub fn any() -> AnySchema {
    AnySchema
}

/// Schema returned by [`any`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

#[async_trait]
impl Schema for AnySchema {
    type Output = Value;

    async fn validate_with(&self, value: Value, _options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        Ok(value)
    }
}
