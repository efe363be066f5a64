use async_trait::async_trait;

/// The handler of an endpoint: an async function of the dispatcher's request and response
/// objects plus the validated body.
///
/// `Req` and `Resp` are opaque here, they are passed through from the dispatcher untouched.
/// Implemented for every `Fn(Req, Resp, I) -> impl Future`, so a plain `async fn` is a handler:
///
/// ```
/// # use micro_endpoint::EndpointHandler;
/// async fn upload(_req: (), _resp: (), body: String) -> usize {
///     body.len()
/// }
///
/// fn assert_handler<H: EndpointHandler<(), (), String, Output = usize>>(_h: H) {}
/// assert_handler(upload);
/// ```
#[async_trait]
pub trait EndpointHandler<Req, Resp, I>: Send + Sync {
    type Output;

    async fn handle(&self, request: Req, response: Resp, body: I) -> Self::Output;
}

#[async_trait]
impl<F, Fut, Req, Resp, I> EndpointHandler<Req, Resp, I> for F
where
    F: Fn(Req, Resp, I) -> Fut + Send + Sync,
    Fut: Future + Send,
    Req: Send + 'static,
    Resp: Send + 'static,
    I: Send + 'static,
{
    type Output = Fut::Output;

    #[inline]
    async fn handle(&self, request: Req, response: Resp, body: I) -> Self::Output {
        (self)(request, response, body).await
    }
}
