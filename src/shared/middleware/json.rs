use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::shared::errors::AuthError;

/// JSON 본문 추출기
/// axum `Json`과 같지만 파싱 실패를 InvalidInputValue 에러 응답으로 변환
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AuthError::invalid_input("body", rejection.body_text())),
        }
    }
}
