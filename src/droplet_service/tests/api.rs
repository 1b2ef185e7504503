//! End-to-end tests against a running server with in-memory stores.

use droplet_adapters::{
    Argon2PasswordHasher, InMemoryAccountStore, InMemoryUserStore, JwtTokenAuthority,
};
use droplet_axum::AppState;
use droplet_service::DropletService;
use secrecy::Secret;
use serde_json::{Value, json};

struct TestApp {
    address: String,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn() -> Self {
        let state = AppState::new(
            InMemoryUserStore::new(),
            InMemoryAccountStore::new(),
            Argon2PasswordHasher,
            JwtTokenAuthority::new(&Secret::from("test signing key".to_string())).unwrap(),
        );
        let service = DropletService::new(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(service.run_standalone(listener));

        Self {
            address,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn post_authed(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn put_authed(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn get_authed(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap()
    }

    /// Registers a user and returns `(user_id, access_token)`.
    async fn sign_up(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .post(
                "/auth/sign-up",
                &json!({
                    "email": email,
                    "username": "ann",
                    "password": password,
                    "macAddress": "aa:bb",
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        (
            body["id"].as_str().unwrap().to_string(),
            body["accessToken"].as_str().unwrap().to_string(),
        )
    }
}

#[tokio::test]
async fn sign_up_then_sign_in() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/auth/sign-up",
            &json!({
                "email": "a@x",
                "username": "ann",
                "password": "p@ss",
                "macAddress": "aa:bb",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["username"], "ann");
    assert_eq!(body["email"], "a@x");
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(!body["accessToken"].as_str().unwrap().is_empty());

    let response = app
        .post(
            "/auth/sign-in",
            &json!({ "email": "a@x", "password": "p@ss" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_is_a_business_error() {
    let app = TestApp::spawn().await;
    app.sign_up("a@x", "p@ss").await;

    let response = app
        .post(
            "/auth/sign-in",
            &json!({ "email": "a@x", "password": "nope" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "wrong_password");
    assert_eq!(body["message"], "wrong password");
}

#[tokio::test]
async fn unknown_user_is_distinguishable_from_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/auth/sign-in",
            &json!({ "email": "ghost@x", "password": "x" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "user_not_found");
}

#[tokio::test]
async fn duplicate_sign_up_is_rejected() {
    let app = TestApp::spawn().await;
    app.sign_up("a@x", "p@ss").await;

    let response = app
        .post(
            "/auth/sign-up",
            &json!({
                "email": "a@x",
                "username": "other",
                "password": "different",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "user_already_created");
}

#[tokio::test]
async fn malformed_email_never_reaches_a_use_case() {
    let app = TestApp::spawn().await;

    let response = app
        .post(
            "/auth/sign-up",
            &json!({
                "email": "not-an-email",
                "username": "ann",
                "password": "p@ss",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "invalid email address");
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn create_then_get_account() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.sign_up("a@x", "p@ss").await;

    let response = app
        .post_authed(
            "/account",
            &token,
            &json!({
                "userId": user_id,
                "deviceName": "laptop",
                "deviceOs": "linux",
                "deviceMacAddress": "aa:bb",
                "active": true,
                "language": "en",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    let account_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["userId"], user_id.as_str());

    let response = app.get_authed(&format!("/account/{account_id}"), &token).await;
    assert_eq!(response.status().as_u16(), 200);
    let account: Value = response.json().await.unwrap();
    let devices = account["accountDevices"].as_array().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["name"], "laptop");
    assert_eq!(devices[0]["active"], true);
    assert_eq!(account["accountSettings"]["language"], "en");
}

#[tokio::test]
async fn update_writes_default_valued_fields() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.sign_up("a@x", "p@ss").await;

    let response = app
        .post_authed(
            "/account",
            &token,
            &json!({
                "userId": user_id,
                "deviceName": "laptop",
                "deviceOs": "linux",
                "deviceMacAddress": "aa:bb",
                "active": true,
                "language": "en",
            }),
        )
        .await;
    let account_id = response.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app.get_authed(&format!("/account/{account_id}"), &token).await;
    let account: Value = response.json().await.unwrap();
    let device_id = account["accountDevices"][0]["id"].as_str().unwrap();

    // Deactivate the device and add a second one; leave settings alone.
    let response = app
        .put_authed(
            "/account",
            &token,
            &json!({
                "id": account_id,
                "userId": user_id,
                "accountDevices": [
                    {
                        "id": device_id,
                        "name": "laptop",
                        "os": "linux",
                        "macAddress": "aa:bb",
                        "active": false,
                    },
                    {
                        "name": "phone",
                        "os": "android",
                        "macAddress": "cc:dd",
                        "active": true,
                    },
                ],
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    let devices = updated["accountDevices"].as_array().unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0]["active"], false);
    assert_eq!(devices[1]["name"], "phone");
    assert_eq!(updated["accountSettings"]["language"], "en");
}

#[tokio::test]
async fn account_routes_require_a_valid_token() {
    let app = TestApp::spawn().await;
    let (user_id, _token) = app.sign_up("a@x", "p@ss").await;

    let body = json!({
        "userId": user_id,
        "deviceName": "laptop",
        "deviceOs": "linux",
        "deviceMacAddress": "aa:bb",
        "active": true,
        "language": "en",
    });

    // No header at all.
    let response = app
        .client
        .post(format!("{}/account", app.address))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let parsed: Value = response.json().await.unwrap();
    assert_eq!(parsed["code"], "invalid_token");

    // Garbage token.
    let response = app.post_authed("/account", "garbage", &body).await;
    assert_eq!(response.status().as_u16(), 422);
    let parsed: Value = response.json().await.unwrap();
    assert_eq!(parsed["code"], "invalid_token");
}

#[tokio::test]
async fn token_signed_with_another_key_is_rejected() {
    let app = TestApp::spawn().await;
    let (user_id, _token) = app.sign_up("a@x", "p@ss").await;

    let foreign = JwtTokenAuthority::new(&Secret::from("another key".to_string())).unwrap();
    let forged = {
        use droplet_core::TokenAuthority;
        foreign
            .mint(user_id.parse().unwrap(), "ann")
            .unwrap()
    };

    let response = app
        .get_authed(&format!("/account/{}", uuid::Uuid::new_v4()), &forged)
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let parsed: Value = response.json().await.unwrap();
    assert_eq!(parsed["code"], "invalid_token");
}

#[tokio::test]
async fn creating_an_account_for_someone_else_reads_as_absent() {
    let app = TestApp::spawn().await;
    let (_user_id, token) = app.sign_up("a@x", "p@ss").await;
    let (other_id, _other_token) = app.sign_up("b@x", "p@ss").await;

    let response = app
        .post_authed(
            "/account",
            &token,
            &json!({
                "userId": other_id,
                "deviceName": "laptop",
                "deviceOs": "linux",
                "deviceMacAddress": "aa:bb",
                "active": true,
                "language": "en",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let parsed: Value = response.json().await.unwrap();
    assert_eq!(parsed["code"], "user_not_found");
}

#[tokio::test]
async fn another_users_account_is_not_readable() {
    let app = TestApp::spawn().await;
    let (user_id, token) = app.sign_up("a@x", "p@ss").await;
    let (_other_id, other_token) = app.sign_up("b@x", "p@ss").await;

    let response = app
        .post_authed(
            "/account",
            &token,
            &json!({
                "userId": user_id,
                "deviceName": "laptop",
                "deviceOs": "linux",
                "deviceMacAddress": "aa:bb",
                "active": true,
                "language": "en",
            }),
        )
        .await;
    let account_id = response.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .get_authed(&format!("/account/{account_id}"), &other_token)
        .await;
    assert_eq!(response.status().as_u16(), 422);
    let parsed: Value = response.json().await.unwrap();
    assert_eq!(parsed["code"], "account_not_found");
}
