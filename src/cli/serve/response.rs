//! HTTP response handlers.

use anyhow::{Result, anyhow};
use std::borrow::Cow;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use assetbake::asset::mime::types::PLAIN;
use assetbake::http::Reply;

/// Send a resolver reply. HEAD requests get the headers only.
pub fn respond_reply(request: Request, reply: Reply<'_>) -> Result<()> {
    let headers = reply
        .headers
        .iter()
        .map(|(name, value)| make_header(name, value))
        .collect::<Result<Vec<_>>>()?;
    let status = StatusCode(reply.status);

    if is_head_request(&request) {
        let response = headers
            .into_iter()
            .fold(Response::empty(status), |response, header| {
                response.with_header(header)
            });
        request.respond(response)?;
        return Ok(());
    }

    let response = headers.into_iter().fold(
        Response::from_data(reply.body.into_owned()).with_status_code(status),
        |response, header| response.with_header(header),
    );
    request.respond(response)?;
    Ok(())
}

/// Respond with 405 for anything but GET and HEAD.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN)?)
        .with_header(make_header("Allow", "GET, HEAD")?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    let response = Response::from_data(b"503 Service Unavailable".to_vec())
        .with_status_code(StatusCode(503))
        .with_header(make_header("Content-Type", PLAIN)?);
    request.respond(response)?;
    Ok(())
}

pub fn is_allowed_method(request: &Request) -> bool {
    matches!(request.method(), Method::Get | Method::Head)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

/// Extract a header value from the request (case-insensitive).
pub fn get_header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Normalize a request URL into a table path: strip query and fragment,
/// percent-decode, ensure a leading `/`.
pub fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(path));

    if decoded.starts_with('/') {
        decoded.into_owned()
    } else {
        format!("/{decoded}")
    }
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}
