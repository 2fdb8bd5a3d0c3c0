//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{
    DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorResponse,
    HealthResponse,
};
use common::ServiceError;
use jwe_dir_core::jwe::{DirectDecrypter, DirectEncrypter};
use tracing::{debug, warn};

use super::state::AppState;

/// `POST /encrypt`: issue a compact JWE for the UTF-8 payload.
///
/// The token header is the service's configured template (`alg` = `dir`,
/// `enc` from `ENCRYPTION_METHOD`, optionally `zip` and `kid`).
pub async fn encrypt(State(state): State<AppState>, Json(req): Json<EncryptRequest>) -> Response {
    let key = match state.key_store.current().await {
        Ok(k) => k,
        Err(e) => return error_response(&ServiceError::Unavailable(e.to_string())),
    };

    let token = DirectEncrypter::new(key.as_bytes())
        .and_then(|enc| enc.encrypt_compact(&state.header, req.payload.as_bytes()));

    match token {
        Ok(token) => {
            debug!(enc = %state.header.enc, token_len = token.len(), "token issued");
            (StatusCode::OK, Json(EncryptResponse { token })).into_response()
        }
        Err(e) => {
            let err = ServiceError::from(e);
            warn!(code = err.code(), "encryption failed");
            error_response(&err)
        }
    }
}

/// `POST /decrypt`: verify and open a compact JWE issued under the service key.
///
/// Every authentication failure yields the same `invalid_token` response.
pub async fn decrypt(State(state): State<AppState>, Json(req): Json<DecryptRequest>) -> Response {
    let key = match state.key_store.current().await {
        Ok(k) => k,
        Err(e) => return error_response(&ServiceError::Unavailable(e.to_string())),
    };

    let plaintext = match DirectDecrypter::new(key.as_bytes())
        .and_then(|dec| dec.decrypt_compact(req.token.trim()))
    {
        Ok(pt) => pt,
        Err(e) => {
            let err = ServiceError::from(e);
            warn!(code = err.code(), "token rejected");
            return error_response(&err);
        }
    };

    match std::str::from_utf8(&plaintext) {
        Ok(payload) => (
            StatusCode::OK,
            Json(DecryptResponse {
                payload: payload.to_owned(),
            }),
        )
            .into_response(),
        Err(_) => error_response(&ServiceError::BadRequest(
            "token payload is not valid UTF-8".into(),
        )),
    }
}

/// `GET /health`: liveness and readiness check.
///
/// Returns `200 OK` when the shared key is loaded, `503 Service Unavailable`
/// otherwise.
pub async fn health(State(state): State<AppState>) -> Response {
    let key_ready = state.key_store.is_ready().await;

    let (status_code, status_str) = if key_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        key_ready,
        enc: state.header.enc.clone(),
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

/// Render a [`ServiceError`] as a JSON [`ErrorResponse`] with its HTTP status.
pub fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}
