use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn get_current_account<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    Extension(current): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    fetch(&state, current.account_id).await
}

pub async fn get_account<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    Path(account_id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id =
        AccountId::from_string(&account_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    fetch(&state, account_id).await
}

async fn fetch<S: AccountServicePort>(
    state: &AppState<S>,
    account_id: AccountId,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .get_account(account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}
