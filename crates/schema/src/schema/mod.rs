//! Schema definitions and the combinators used to compose them.
//!
//! A [`Schema`] turns an untyped [`Value`] into a typed `Output`, or explains why it can't
//! with a [`ValidationError`]. Leaf schemas ([`string`], [`mixed`], [`bytes`], [`any`]) yield
//! `Option<T>`, treating a missing or null value as `None`; [`SchemaExt::required`] turns that
//! into a plain `T`. [`object`] composes field schemas into a tuple, which [`SchemaExt::map`]
//! can then turn into a domain type:
//!
//! ```
//! # use micro_schema::{field, object, string, Schema, SchemaExt, Value};
//! # tokio_test_block_on(async {
//! let user = object()
//!     .shape((field("name", string().required()), field("zip", string())))
//!     .required()
//!     .map(|(name, zip)| format!("{name}/{}", zip.unwrap_or_default()));
//!
//! let value = Value::object([("name", "hello")]);
//! assert_eq!(user.validate(value).await.unwrap(), "hello/");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod mixed;
mod object;
mod string;

pub use mixed::{any, bytes, is_byte_container, mixed, AnySchema, MixedSchema};
pub use object::{field, object, Field, ObjectSchema, Shape, WithUnknown};
pub use string::{string, StringSchema};

use crate::error::ValidationError;
use crate::options::ValidateOptions;
use crate::value::Value;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Validates an untyped [`Value`] into `Self::Output`
#[async_trait]
pub trait Schema: Send + Sync {
    type Output;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError>;

    /// validate with the default [`ValidateOptions`], which report every failing field
    async fn validate(&self, value: Value) -> Result<Self::Output, ValidationError> {
        let options = ValidateOptions::default();
        self.validate_with(value, &options).await
    }
}

/// A type erased [`Schema`]
pub type BoxSchema<T> = Box<dyn Schema<Output = T>>;

#[async_trait]
impl<'a, S> Schema for &'a S
where
    S: Schema + ?Sized,
{
    type Output = S::Output;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        (**self).validate_with(value, options).await
    }
}

#[async_trait]
impl<S> Schema for Arc<S>
where
    S: Schema + ?Sized,
{
    type Output = S::Output;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        (**self).validate_with(value, options).await
    }
}

#[async_trait]
impl<S> Schema for Box<S>
where
    S: Schema + ?Sized,
{
    type Output = S::Output;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        (**self).validate_with(value, options).await
    }
}

/// Combinators available on every [`Schema`]
pub trait SchemaExt: Schema + Sized {
    /// reject a missing or null value instead of yielding `None`
    fn required<T>(self) -> Required<Self>
    where
        Self: Schema<Output = Option<T>>,
    {
        Required { inner: self }
    }

    /// transform the validated output, the transform can't fail
    fn map<F, T>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> T + Send + Sync,
    {
        Map { inner: self, f }
    }

    fn boxed(self) -> BoxSchema<Self::Output>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<S: Schema> SchemaExt for S {}

/// Schema returned by [`SchemaExt::required`]
#[derive(Debug, Clone)]
pub struct Required<S> {
    inner: S,
}

#[async_trait]
impl<S, T> Schema for Required<S>
where
    S: Schema<Output = Option<T>>,
{
    type Output = T;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        self.inner
            .validate_with(value, options)
            .await?
            .ok_or_else(|| ValidationError::single("", "is a required field"))
    }
}

/// Schema returned by [`SchemaExt::map`]
#[derive(Clone)]
pub struct Map<S, F> {
    inner: S,
    f: F,
}

impl<S: fmt::Debug, F> fmt::Debug for Map<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("inner", &self.inner).finish_non_exhaustive()
    }
}

#[async_trait]
impl<S, F, T> Schema for Map<S, F>
where
    S: Schema,
    F: Fn(S::Output) -> T + Send + Sync,
{
    type Output = T;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        let output = self.inner.validate_with(value, options).await?;
        Ok((self.f)(output))
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{string, Schema, SchemaExt};
    use crate::value::Value;
    use std::sync::Arc;

    fn assert_is_schema<S: Schema<Output = T>, T>(_schema: &S) {
        // no op
    }

    #[test]
    fn test_combinators_are_schemas() {
        assert_is_schema::<_, Option<String>>(&string());
        assert_is_schema::<_, String>(&string().required());
        assert_is_schema::<_, usize>(&string().required().map(|s| s.len()));
        assert_is_schema::<_, String>(&string().required().boxed());
        assert_is_schema::<_, String>(&Arc::new(string().required()));
    }

    #[tokio::test]
    async fn test_required() {
        let schema = string().required();

        assert_eq!(schema.validate(Value::from("utf-8")).await.unwrap(), "utf-8");

        let error = schema.validate(Value::Null).await.unwrap_err();
        assert_eq!(error.violations().len(), 1);
        assert_eq!(error.violations()[0].path(), "");
        assert_eq!(error.violations()[0].message(), "is a required field");
    }

    #[tokio::test]
    async fn test_optional_accepts_null() {
        assert_eq!(string().validate(Value::Null).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_map() {
        let schema = string().required().map(|s| s.to_uppercase());
        assert_eq!(schema.validate(Value::from("text/plain")).await.unwrap(), "TEXT/PLAIN");
        assert!(schema.validate(Value::from(1)).await.is_err());
    }

    #[tokio::test]
    async fn test_dyn_schema() {
        let schema: Arc<dyn Schema<Output = String>> = Arc::new(string().required());
        assert_eq!(schema.validate(Value::from("a")).await.unwrap(), "a");
    }
}
