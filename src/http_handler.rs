use lambda_http::{Body, Error, Request, Response};
use tracing;

use crate::{
    bal::route::interaction_router::{InteractionRouter, SignedRequest},
    error::InteractionError,
};

pub(crate) async fn function_handler(
    event: Request,
    router: &InteractionRouter,
) -> Result<Response<Body>, Error> {
    tracing::info!("Lambda invoked");

    let body_bytes = event.body().as_ref();

    let headers = event.headers();
    let signature = headers
        .get("x-signature-ed25519")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let timestamp = headers
        .get("x-signature-timestamp")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let request = SignedRequest {
        signature,
        timestamp,
        body: body_bytes,
    };

    match router.route(request).await {
        Ok(response) => json_response(200, &response),
        Err(e) => error_response(&e),
    }
}

fn json_response<T: serde::Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let body_str = match serde_json::to_string(body) {
        Ok(s) => s,
        Err(e) => return error_response(&InteractionError::Internal(e.to_string())),
    };

    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body_str.into())?)
}

fn error_response(error: &InteractionError) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(error.status_code())
        .header("content-type", "text/plain; charset=utf-8")
        .body(format!("{}\n", error).into())?)
}
