use crate::error::ValidationError;
use crate::options::ValidateOptions;
use crate::schema::Schema;
use crate::value::{Value, ValueMap};
use async_trait::async_trait;
use tracing::trace;

/// Accepts object values, each key checked by the field schemas of its [`ObjectSchema::shape`].
///
/// A missing or null value yields `None`. Keys that no field names are dropped, unless the
/// schema is built with [`ObjectSchema::with_unknown`].
pub fn object() -> ObjectSchema<()> {
    ObjectSchema { shape: () }
}

/// A named entry of an object [`Shape`]
pub fn field<S: Schema>(name: impl Into<String>, schema: S) -> Field<S> {
    Field { name: name.into(), schema }
}

/// Schema returned by [`object`]
#[derive(Debug, Clone)]
pub struct ObjectSchema<S> {
    shape: S,
}

impl<S> ObjectSchema<S> {
    /// replace the fields of this object, the output becomes a tuple with one entry per field
    pub fn shape<N: Shape>(self, shape: N) -> ObjectSchema<N> {
        ObjectSchema { shape }
    }

    /// keep the keys no field names, the output becomes `(fields, unknown keys)`
    pub fn with_unknown(self) -> ObjectSchema<WithUnknown<S>> {
        ObjectSchema { shape: WithUnknown { shape: self.shape } }
    }
}

#[async_trait]
impl<S: Shape> Schema for ObjectSchema<S> {
    type Output = Option<S::Output>;

    async fn validate_with(&self, value: Value, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(mut map) => {
                trace!(keys = map.len(), "validating object shape");
                self.shape.validate_fields(&mut map, options).await.map(Some)
            }
            other => Err(ValidationError::single("", format!("expected object, got {}", other.type_name()))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field<S> {
    name: String,
    schema: S,
}

impl<S: Schema> Field<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// takes the field's value out of `map`, a missing key is validated as null
    async fn validate_in(&self, map: &mut ValueMap, options: &ValidateOptions) -> Result<S::Output, ValidationError> {
        let value = map.remove(&self.name).unwrap_or(Value::Null);
        self.schema.validate_with(value, options).await.map_err(|e| e.nest(&self.name))
    }
}

/// The fields of an [`ObjectSchema`], implemented for tuples of [`Field`] up to 12 entries
#[async_trait]
pub trait Shape: Send + Sync {
    type Output;

    async fn validate_fields(&self, map: &mut ValueMap, options: &ValidateOptions) -> Result<Self::Output, ValidationError>;
}

#[async_trait]
impl Shape for () {
    type Output = ();

    async fn validate_fields(&self, _map: &mut ValueMap, _options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        Ok(())
    }
}

/// A [`Shape`] that also returns the entries its fields left unclaimed, see
/// [`ObjectSchema::with_unknown`]
#[derive(Debug, Clone)]
pub struct WithUnknown<S> {
    shape: S,
}

#[async_trait]
impl<S: Shape> Shape for WithUnknown<S> {
    type Output = (S::Output, ValueMap);

    async fn validate_fields(&self, map: &mut ValueMap, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        let fields = self.shape.validate_fields(map, options).await?;
        Ok((fields, std::mem::take(map)))
    }
}

// every field is validated, and the violations of all failing fields are reported together
// unless `ValidateOptions::abort_early` is set
macro_rules! impl_shape_for_tuple ({ $($param:ident)* } => {
    #[async_trait]
    impl<$($param,)*> Shape for ($(Field<$param>,)*)
    where
        $($param: Schema,)*
        $($param::Output: Send,)*
    {
        type Output = ($($param::Output,)*);

        #[allow(non_snake_case, reason = "bindings reuse the type parameter names")]
        async fn validate_fields(&self, map: &mut ValueMap, options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
            let ($($param,)*) = self;
            $(
            let $param = match $param.validate_in(map, options).await {
                Err(e) if options.is_abort_early() => return Err(e),
                result => result,
            };
            )*

            match ($($param,)*) {
                ($(Ok($param),)*) => Ok(($($param,)*)),
                ($($param,)*) => {
                    let violations = [$($param.err(),)*]
                        .into_iter()
                        .flatten()
                        .flat_map(ValidationError::into_violations)
                        .collect();
                    Err(ValidationError::new(violations))
                }
            }
        }
    }
});

impl_shape_for_tuple! { A }
impl_shape_for_tuple! { A B }
impl_shape_for_tuple! { A B C }
impl_shape_for_tuple! { A B C D }
impl_shape_for_tuple! { A B C D E }
impl_shape_for_tuple! { A B C D E F }
impl_shape_for_tuple! { A B C D E F G }
impl_shape_for_tuple! { A B C D E F G H }
impl_shape_for_tuple! { A B C D E F G H I }
impl_shape_for_tuple! { A B C D E F G H I J }
impl_shape_for_tuple! { A B C D E F G H I J K }
impl_shape_for_tuple! { A B C D E F G H I J K L }
