use axum::extract::{FromRequest, Request};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Form<T>` wrapper that converts deserialization errors into
/// `AppError::Validation`, ensuring clients always receive structured error
/// responses. Uses the multi-value form extractor so repeated keys (HTML
/// multi-selects) collect into a `Vec`.
pub struct AppForm<T>(pub T);

impl<S, T> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Ok(AppForm(value))
    }
}
