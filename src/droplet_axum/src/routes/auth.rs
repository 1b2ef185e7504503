use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use droplet_application::{SignInOptions, SignInUseCase, SignUpOptions, SignUpUseCase};
use droplet_core::{
    AccountStore, Email, Password, PasswordHasher, TokenAuthority, UserStore,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub username: String,
    pub password: Secret<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub access_token: String,
}

#[tracing::instrument(name = "Sign up", skip_all)]
pub async fn sign_up<U, S, H, T>(
    State(state): State<AppState<U, S, H, T>>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    S: AccountStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenAuthority + 'static,
{
    let email = Email::parse(request.email).map_err(|e| ApiError::Invalid(e.to_string()))?;
    let password =
        Password::parse(request.password).map_err(|e| ApiError::Invalid(e.to_string()))?;

    let use_case = SignUpUseCase::new(&*state.users, &*state.hasher, &*state.tokens);
    let out = use_case
        .execute(
            &state.cancel,
            SignUpOptions {
                email,
                username: request.username,
                password,
                mac_address: request.mac_address,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            id: out.id,
            username: out.username,
            email: out.email.as_str().to_string(),
            access_token: out.access_token,
        }),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
}

#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn sign_in<U, S, H, T>(
    State(state): State<AppState<U, S, H, T>>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + 'static,
    S: AccountStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenAuthority + 'static,
{
    let email = Email::parse(request.email).map_err(|e| ApiError::Invalid(e.to_string()))?;
    let password =
        Password::parse(request.password).map_err(|e| ApiError::Invalid(e.to_string()))?;

    let use_case = SignInUseCase::new(&*state.users, &*state.hasher, &*state.tokens);
    let out = use_case
        .execute(&state.cancel, SignInOptions { email, password })
        .await?;

    Ok(Json(SignInResponse {
        access_token: out.access_token,
    }))
}
