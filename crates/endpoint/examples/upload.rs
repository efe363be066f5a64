use bytes::Bytes;
use http::request::Parts;
use http::response::Builder;
use http::StatusCode;
use micro_endpoint::{create_endpoint, file_data_schema, Endpoint, FileData};
use micro_schema::{Value, ValidateOptions};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

// the dispatcher hands over the request head and a response builder, the body is validated
async fn upload(req: Parts, resp: Builder, file: FileData) -> http::Result<http::Response<Bytes>> {
    info!(uri = %req.uri, file_name = file.file_name(), mime = file.mime_type(), "receiving file");
    resp.status(StatusCode::CREATED).body(Bytes::from(format!("stored {} bytes\r\n", file.body().len())))
}

// long polling endpoint without schemas, the handler sees the raw payload
async fn events(_req: Parts, resp: Builder, _body: Value) -> http::Result<http::Response<Bytes>> {
    resp.status(StatusCode::OK).body(Bytes::new())
}

fn request(path: &str) -> Parts {
    let (parts, ()) = http::Request::post(path).body(()).unwrap().into_parts();
    parts
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let upload_endpoint = create_endpoint(
        Endpoint::builder("/upload", upload).input(file_data_schema()).options(ValidateOptions::new()).build(),
    );
    let events_endpoint = create_endpoint(Endpoint::builder("/events", events).keep_open(true).build());
    info!(?upload_endpoint, ?events_endpoint, "endpoints created");

    let payload = Value::object([
        ("body", Value::from(Bytes::from_static(b"some data"))),
        ("fileName", Value::from("test.txt")),
        ("encoding", Value::from("utf-8")),
        ("mimeType", Value::from("text/plain")),
    ]);
    match upload_endpoint.dispatch(request("/upload"), http::Response::builder(), payload).await {
        Ok(Ok(response)) => info!(status = %response.status(), body = ?response.body(), "upload accepted"),
        Ok(Err(e)) => error!(cause = %e, "failed to build response"),
        Err(e) => error!(cause = %e, "upload rejected"),
    }

    let payload = Value::object([
        ("body", Value::from("not a buffer")),
        ("fileName", Value::from(123)),
        ("encoding", Value::from("utf-8")),
        ("mimeType", Value::from("text/plain")),
    ]);
    if let Err(e) = upload_endpoint.dispatch(request("/upload"), http::Response::builder(), payload).await {
        error!(cause = %e, "upload rejected");
    }

    let response = events_endpoint.invoke(request("/events"), http::Response::builder(), Value::Null).await;
    info!(keep_open = events_endpoint.keep_open(), ok = response.is_ok(), "events invoked");
}
