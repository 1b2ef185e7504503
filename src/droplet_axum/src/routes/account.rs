use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use droplet_application::{
    CreateAccountOptions, CreateAccountUseCase, GetAccountOptions, GetAccountUseCase,
    UpdateAccountUseCase,
};
use droplet_core::{
    AccountStore, AccountUpdate, DeviceUpsert, PasswordHasher, SettingsUpdate, TokenAuthority,
    UserStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, extract::bearer_principal, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub user_id: Uuid,
    pub device_name: String,
    pub device_os: String,
    pub device_mac_address: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub language: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[tracing::instrument(name = "Create account", skip_all)]
pub async fn create_account<U, S, H, T>(
    State(state): State<AppState<U, S, H, T>>,
    headers: HeaderMap,
    Json(request): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    S: AccountStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenAuthority + 'static,
{
    let principal = bearer_principal(&headers, &*state.tokens, &state.cancel)?;

    let use_case = CreateAccountUseCase::new(&*state.users, &*state.accounts);
    let out = use_case
        .execute(
            &state.cancel,
            &principal,
            CreateAccountOptions {
                user_id: request.user_id,
                device_name: request.device_name,
                device_os: request.device_os,
                device_mac_address: request.device_mac_address,
                active: request.active,
                account_language: request.language,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse {
            id: out.id,
            user_id: out.user_id,
        }),
    ))
}

#[tracing::instrument(name = "Get account", skip_all, fields(account_id = %account_id))]
pub async fn get_account<U, S, H, T>(
    State(state): State<AppState<U, S, H, T>>,
    headers: HeaderMap,
    Path(account_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    S: AccountStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenAuthority + 'static,
{
    let principal = bearer_principal(&headers, &*state.tokens, &state.cancel)?;

    let use_case = GetAccountUseCase::new(&*state.accounts);
    let account = use_case
        .execute(
            &state.cancel,
            GetAccountOptions {
                account_id,
                user_id: principal.user_id,
            },
        )
        .await?;

    Ok(Json(account))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub account_devices: Vec<DeviceChange>,
    #[serde(default)]
    pub account_settings: Option<SettingsChange>,
}

/// A device row in the change set. Absent `id` means "insert"; every other
/// field is written as given, defaults included.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceChange {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsChange {
    #[serde(default)]
    pub language: String,
}

#[tracing::instrument(name = "Update account", skip_all, fields(account_id = %request.id))]
pub async fn update_account<U, S, H, T>(
    State(state): State<AppState<U, S, H, T>>,
    headers: HeaderMap,
    Json(request): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    S: AccountStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenAuthority + 'static,
{
    let principal = bearer_principal(&headers, &*state.tokens, &state.cancel)?;

    let update = AccountUpdate {
        id: request.id,
        user_id: request.user_id,
        devices: request
            .account_devices
            .into_iter()
            .map(|device| DeviceUpsert {
                id: device.id,
                name: device.name,
                os: device.os,
                mac_address: device.mac_address,
                active: device.active,
            })
            .collect(),
        settings: request.account_settings.map(|settings| SettingsUpdate {
            language: settings.language,
        }),
    };

    let use_case = UpdateAccountUseCase::new(&*state.accounts);
    let account = use_case.execute(&state.cancel, &principal, update).await?;

    Ok(Json(account))
}
