use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_account<S: AccountServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let command = body.into_command();

    let errors = state.account_service.validate_account_creation(&command);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    state
        .account_service
        .create_account(command)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for creating an account (raw JSON)
///
/// Missing fields deserialize as empty so they are reported by validation
/// instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    is_admin: bool,
}

impl CreateAccountRequest {
    fn into_command(self) -> CreateAccountCommand {
        CreateAccountCommand::new(self.username, self.password, self.is_admin)
    }
}
