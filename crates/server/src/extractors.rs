use crate::{error::AppError, state::AppState};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use database::{error::ServiceError, services::user::UserService};
use models::identity::Identity;
use serde::de::DeserializeOwned;
use tower_oauth2_resource_server::claims::DefaultClaims;

/// JSON request body whose rejections answer 400 with a JSON error body
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Subject claim of the validated bearer token
pub struct Subject(pub String);

impl<S: Send + Sync> FromRequestParts<S> for Subject {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DefaultClaims>()
            .and_then(|claims| claims.sub.clone())
            .map(Subject)
            .ok_or(AppError::Unauthorized)
    }
}

/// Identity of a registered caller
pub struct CurrentUser(pub Identity);

impl CurrentUser {
    pub fn require_admin(&self) -> Result<&Identity, AppError> {
        if self.0.is_admin {
            Ok(&self.0)
        } else {
            Err(ServiceError::Forbidden("administrator access required").into())
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Subject(subject) = Subject::from_request_parts(parts, state).await?;

        UserService::identity_for_subject(&state.db, &subject)
            .await?
            .map(CurrentUser)
            .ok_or(AppError::Unregistered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_require_admin() {
        let admin = CurrentUser(Identity::admin(Uuid::new_v4()));
        assert!(admin.require_admin().is_ok());

        let user = CurrentUser(Identity::user(Uuid::new_v4()));
        assert!(matches!(
            user.require_admin(),
            Err(AppError::Service(ServiceError::Forbidden(_)))
        ));
    }

    #[tokio::test]
    async fn test_subject_without_claims_is_unauthorized() {
        let (mut parts, _) = axum::http::Request::new(()).into_parts();
        let result = Subject::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
