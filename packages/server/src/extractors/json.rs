use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body extractor. Anything axum's `Json` rejects becomes a
/// `VALIDATION_ERROR`, so clients get the same error envelope as for a bad
/// hash or path.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::validation(rejection_message(&rejection))),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be sent with Content-Type: application/json".into()
        }
        JsonRejection::JsonSyntaxError(e) => format!("Request body is not valid JSON: {}", e.body_text()),
        JsonRejection::JsonDataError(e) => format!("Request body has the wrong shape: {}", e.body_text()),
        other => other.body_text(),
    }
}
