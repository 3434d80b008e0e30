//! Router assembly and the listening server.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::state::AppState;
use super::{auth, comments, issues, meta};
use crate::domain::models::ServerConfig;

/// Router-level switches.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Allow any origin
    pub enable_cors: bool,
    /// Built SPA to serve for every path no route claims. Without one, `/`
    /// serves a small built-in page.
    pub frontend_dir: Option<PathBuf>,
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>, options: &RouterOptions) -> Router {
    let mut app = Router::new()
        // Issues
        .route("/issues", get(issues::list_all))
        .route("/user/issues", get(issues::list_all))
        .route("/orgs/{org}/issues", get(issues::list_for_org))
        .route(
            "/repos/{owner}/{repo}/issues",
            get(issues::list_for_repo).post(issues::create),
        )
        .route(
            "/repos/{owner}/{repo}/issues/{issue_number}",
            get(issues::get).patch(issues::update),
        )
        .route("/search/issues", get(issues::search))
        // Comments
        .route(
            "/repos/{owner}/{repo}/issues/comments",
            get(comments::list_for_repo),
        )
        .route(
            "/repos/{owner}/{repo}/issues/comments/{comment_id}",
            get(comments::get)
                .patch(comments::update)
                .delete(comments::delete),
        )
        .route(
            "/repos/{owner}/{repo}/issues/comments/{comment_id}/pin",
            put(comments::pin).delete(comments::unpin),
        )
        .route(
            "/repos/{owner}/{repo}/issues/{issue_number}/comments",
            get(comments::list_for_issue).post(comments::create),
        )
        // Health and auth discovery
        .route("/api/health", get(meta::health))
        .route("/api/auth/status", get(meta::auth_status))
        .route("/api/auth/verify", post(meta::auth_verify));

    match &options.frontend_dir {
        Some(dir) if dir.is_dir() => {
            info!(dir = %dir.display(), "serving frontend");
            let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            app = app.fallback_service(spa);
        }
        Some(dir) => {
            warn!(dir = %dir.display(), "frontend directory missing; serving built-in index");
            app = app.route("/", get(meta::index));
        }
        None => app = app.route("/", get(meta::index)),
    }

    let app = app
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ))
        .with_state(state);

    if options.enable_cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// The issues API server.
pub struct HttpServer {
    config: ServerConfig,
    options: RouterOptions,
    state: Arc<AppState>,
}

impl HttpServer {
    /// Server for `state` bound per `config`.
    pub fn new(config: ServerConfig, options: RouterOptions, state: AppState) -> Self {
        Self {
            config,
            options,
            state: Arc::new(state),
        }
    }

    fn addr(&self) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Start the server and run until `shutdown` resolves.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = build_router(self.state, &self.options);

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "issues API listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("server stopped");
        Ok(())
    }
}
