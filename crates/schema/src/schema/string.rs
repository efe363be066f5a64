use crate::error::ValidationError;
use crate::options::ValidateOptions;
use crate::schema::{Required, Schema};
use crate::value::Value;
use async_trait::async_trait;

/// Accepts text values, a missing or null value yields `None`.
///
/// No coercion takes place: a number is rejected rather than turned into its decimal text.
pub fn string() -> StringSchema {
    StringSchema { allow_empty: true }
}

/// Schema returned by [`string`]
#[derive(Debug, Clone, Copy)]
pub struct StringSchema {
    allow_empty: bool,
}

impl StringSchema {
    /// Like [`SchemaExt::required`](crate::SchemaExt::required), but an empty string counts as
    /// missing too.
    pub fn required(self) -> Required<StringSchema> {
        Required { inner: StringSchema { allow_empty: false } }
    }
}

#[async_trait]
impl Schema for StringSchema {
    type Output = Option<String>;

    async fn validate_with(&self, value: Value, _options: &ValidateOptions) -> Result<Self::Output, ValidationError> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() && !self.allow_empty => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(ValidationError::single("", format!("expected string, got {}", other.type_name()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::{string, Schema};
    use crate::value::Value;

    #[tokio::test]
    async fn test_accepts_text() {
        assert_eq!(string().validate(Value::from("test.txt")).await.unwrap(), Some("test.txt".to_owned()));
        assert_eq!(string().validate(Value::from("")).await.unwrap(), Some(String::new()));
    }

    #[tokio::test]
    async fn test_required_rejects_empty() {
        let error = string().required().validate(Value::from("")).await.unwrap_err();
        assert_eq!(error.violations()[0].message(), "is a required field");

        assert_eq!(string().required().validate(Value::from("a")).await.unwrap(), "a");
    }

    #[tokio::test]
    async fn test_no_coercion() {
        let error = string().validate(Value::from(123)).await.unwrap_err();
        assert_eq!(error.violations()[0].message(), "expected string, got number");

        let error = string().validate(Value::from(b"bytes".to_vec())).await.unwrap_err();
        assert_eq!(error.violations()[0].message(), "expected string, got bytes");
    }
}
