use axum::{
    Router,
    routing::{get, post},
};
use droplet_axum::{
    AppState,
    routes::{create_account, get_account, sign_in, sign_up, update_account},
};
use droplet_core::{AccountStore, PasswordHasher, TokenAuthority, UserStore};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The assembled droplet API: all routes wired to one state.
pub struct DropletService {
    router: Router,
    cancel: CancellationToken,
}

impl DropletService {
    pub fn new<U, S, H, T>(state: AppState<U, S, H, T>) -> Self
    where
        U: UserStore + 'static,
        S: AccountStore + 'static,
        H: PasswordHasher + 'static,
        T: TokenAuthority + 'static,
    {
        // Cancelled on shutdown so in-flight store calls stop early.
        let cancel = state.cancel.clone();

        let router = Router::new()
            .route("/auth/sign-up", post(sign_up::<U, S, H, T>))
            .route("/auth/sign-in", post(sign_in::<U, S, H, T>))
            .route(
                "/account",
                post(create_account::<U, S, H, T>).put(update_account::<U, S, H, T>),
            )
            .route("/account/{id}", get(get_account::<U, S, H, T>))
            .with_state(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        Self { router, cancel }
    }

    /// The router, for mounting under another application.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Runs the service as a standalone server until interrupted.
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        tracing::info!("droplet api listening on {}", listener.local_addr()?);

        let cancel = self.cancel;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                cancel.cancel();
            })
            .await
    }
}
