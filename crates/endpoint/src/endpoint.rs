use crate::handler::EndpointHandler;
use micro_schema::{Schema, ValidateOptions, ValidationError, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type SharedSchema<T> = Arc<dyn Schema<Output = T>>;
type SharedHandler<Req, Resp, I, O> = Arc<dyn EndpointHandler<Req, Resp, I, Output = O>>;

/// Returns `endpoint` unchanged.
///
/// The descriptor is already checked when it is built, so there is nothing left to do at
/// runtime; this exists as the checkpoint callers pass descriptors through.
/// `create_endpoint(create_endpoint(e)) == e` holds for every descriptor.
#[inline]
pub fn create_endpoint<Req, Resp, I, O>(endpoint: Endpoint<Req, Resp, I, O>) -> Endpoint<Req, Resp, I, O> {
    endpoint
}

/// A handler bound to the schemas of its input and output.
///
/// An endpoint bundles a route path, optional input and output schemas, a keep-open flag
/// and a handler. Its type parameters tie them together: the input schema must validate into
/// exactly the `I` the handler takes, and the output schema into exactly the `O` it returns.
/// A handler that disagrees with its schemas does not compile:
///
/// ```compile_fail
/// # use micro_endpoint::Endpoint;
/// # use micro_schema::{string, SchemaExt};
/// async fn count(_req: (), _resp: (), body: usize) -> usize {
///     body
/// }
///
/// // `string().required()` validates into a `String`, not a `usize`
/// let endpoint = Endpoint::builder("/count", count).input(string().required()).build();
/// ```
///
/// Without a schema the matching side is unconstrained, the handler decides the type.
pub struct Endpoint<Req, Resp, I, O> {
    path: String,
    input: Option<SharedSchema<I>>,
    output: Option<SharedSchema<O>>,
    keep_open: bool,
    options: ValidateOptions,
    handler: SharedHandler<Req, Resp, I, O>,
}

impl<Req, Resp, I, O> Endpoint<Req, Resp, I, O> {
    /// Starts a descriptor for `handler` at `path`, `I` and `O` are fixed by the handler
    pub fn builder<H>(path: impl Into<String>, handler: H) -> EndpointBuilder<Req, Resp, I, O>
    where
        H: EndpointHandler<Req, Resp, I, Output = O> + 'static,
    {
        EndpointBuilder::new(path.into(), Arc::new(handler))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn input(&self) -> Option<&dyn Schema<Output = I>> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&dyn Schema<Output = O>> {
        self.output.as_deref()
    }

    /// Whether the dispatcher should hold the connection open after the handler returns.
    ///
    /// Purely declarative, nothing in this crate acts on it.
    pub fn keep_open(&self) -> bool {
        self.keep_open
    }

    pub fn options(&self) -> &ValidateOptions {
        &self.options
    }

    pub fn handler(&self) -> &dyn EndpointHandler<Req, Resp, I, Output = O> {
        self.handler.as_ref()
    }

    /// Validates an untyped payload with the input schema.
    ///
    /// Fails with a root violation when the endpoint declares no input schema.
    pub async fn validate_input(&self, payload: Value) -> Result<I, ValidationError> {
        match &self.input {
            Some(schema) => schema.validate_with(payload, &self.options).await,
            None => Err(ValidationError::single("", "no input schema declared")),
        }
    }

    /// Validates an untyped value with the output schema.
    ///
    /// Fails with a root violation when the endpoint declares no output schema.
    pub async fn validate_output(&self, value: Value) -> Result<O, ValidationError> {
        match &self.output {
            Some(schema) => schema.validate_with(value, &self.options).await,
            None => Err(ValidationError::single("", "no output schema declared")),
        }
    }

    /// Calls the handler with an already typed body
    pub async fn invoke(&self, request: Req, response: Resp, body: I) -> O {
        self.handler.handle(request, response, body).await
    }

    /// Validates `payload` with the input schema, then calls the handler with the result.
    ///
    /// The handler never runs on a rejected payload. An endpoint without an input schema
    /// rejects every payload here, as [`Endpoint::validate_input`] does; call
    /// [`Endpoint::invoke`] with an already typed body instead.
    pub async fn dispatch(&self, request: Req, response: Resp, payload: Value) -> Result<O, ValidationError> {
        let body = match self.validate_input(payload).await {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %self.path, violations = e.violations().len(), cause = %e, "rejected endpoint payload");
                return Err(e);
            }
        };

        debug!(path = %self.path, keep_open = self.keep_open, "dispatching validated payload");
        Ok(self.invoke(request, response, body).await)
    }
}

impl<Req, Resp, I, O> Clone for Endpoint<Req, Resp, I, O> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            input: self.input.as_ref().map(Arc::clone),
            output: self.output.as_ref().map(Arc::clone),
            keep_open: self.keep_open,
            options: self.options,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Two descriptors are equal when they share the same schemas and handler, not merely
/// equivalent ones.
impl<Req, Resp, I, O> PartialEq for Endpoint<Req, Resp, I, O> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.keep_open == other.keep_open
            && self.options == other.options
            && same_schema(self.input.as_ref(), other.input.as_ref())
            && same_schema(self.output.as_ref(), other.output.as_ref())
            && Arc::ptr_eq(&self.handler, &other.handler)
    }
}

fn same_schema<T>(a: Option<&SharedSchema<T>>, b: Option<&SharedSchema<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

impl<Req, Resp, I, O> fmt::Debug for Endpoint<Req, Resp, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .field("keep_open", &self.keep_open)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`Endpoint::builder`]
pub struct EndpointBuilder<Req, Resp, I, O> {
    path: String,
    input: Option<SharedSchema<I>>,
    output: Option<SharedSchema<O>>,
    keep_open: bool,
    options: ValidateOptions,
    handler: SharedHandler<Req, Resp, I, O>,
}

impl<Req, Resp, I, O> EndpointBuilder<Req, Resp, I, O> {
    fn new(path: String, handler: SharedHandler<Req, Resp, I, O>) -> Self {
        Self { path, input: None, output: None, keep_open: false, options: ValidateOptions::default(), handler }
    }

    /// the schema the request payload is validated with, it must produce the handler's input
    #[must_use]
    pub fn input<S>(mut self, schema: S) -> Self
    where
        S: Schema<Output = I> + 'static,
    {
        self.input = Some(Arc::new(schema));
        self
    }

    /// the schema describing the handler's output
    #[must_use]
    pub fn output<S>(mut self, schema: S) -> Self
    where
        S: Schema<Output = O> + 'static,
    {
        self.output = Some(Arc::new(schema));
        self
    }

    #[must_use]
    pub fn keep_open(mut self, keep_open: bool) -> Self {
        self.keep_open = keep_open;
        self
    }

    #[must_use]
    pub fn options(mut self, options: ValidateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Endpoint<Req, Resp, I, O> {
        Endpoint {
            path: self.path,
            input: self.input,
            output: self.output,
            keep_open: self.keep_open,
            options: self.options,
            handler: self.handler,
        }
    }
}

impl<Req, Resp, I, O> fmt::Debug for EndpointBuilder<Req, Resp, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointBuilder").field("path", &self.path).finish_non_exhaustive()
    }
}
