use axum::{
    async_trait,
    body::{to_bytes, Body},
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts, Method},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Same cap axum applies to its own body extractors
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Request parameters from wherever the client put them: a JSON body, a
/// form-urlencoded body, or the query string when there is no body.
///
/// GET and DELETE always read the query string, whatever Content-Type the
/// client sent. Rejections become `{"error": ...}` responses like any
/// validation failure.
#[derive(Debug, Clone)]
pub struct Params<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        if matches!(parts.method, Method::GET | Method::HEAD | Method::DELETE) {
            return from_query(&mut parts, state).await;
        }

        let bytes = to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|e| ApiError::invalid_format(format!("Invalid request body: {}", e)))?;
        if bytes.is_empty() {
            return from_query(&mut parts, state).await;
        }

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        let req = Request::from_parts(parts, Body::from(bytes));

        match content_type.as_deref() {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(params) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_format(format!("Invalid request body: {}", e.body_text())))?;
                Ok(Params(params))
            }
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(params) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::invalid_format(format!("Invalid request body: {}", e.body_text())))?;
                Ok(Params(params))
            }
            _ => {
                let (mut parts, _body) = req.into_parts();
                from_query(&mut parts, state).await
            }
        }
    }
}

async fn from_query<S, T>(parts: &mut Parts, state: &S) -> Result<Params<T>, ApiError>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    let Query(params) = Query::<T>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_format(format!("Invalid query string: {}", e.body_text())))?;
    Ok(Params(params))
}
