//! HTTP server command handler.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use color_eyre::Result;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use subtle::ConstantTimeEq;
use tower::ServiceBuilder;

use crate::config::Config;
use crate::context::Context;
use crate::health::wait_until_ready;
use crate::mcp::McpServer;

use super::App;

/// Authentication middleware state.
#[derive(Clone)]
struct AuthState {
    api_key: Option<Arc<str>>,
}

/// Liveness check, always unauthenticated.
async fn health() -> &'static str {
    "OK"
}

/// Requires `Authorization: Bearer <api_key>` when an API key is configured.
async fn auth_middleware(State(state): State<AuthState>, req: Request, next: Next) -> Response {
    let Some(expected_key) = &state.api_key else {
        return next.run(req).await;
    };

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if token_matches(token, expected_key) => next.run(req).await,
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Compares a presented bearer token in constant time.
fn token_matches(token: &str, expected: &str) -> bool {
    token.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Routes: `/health` plus `service` mounted at `/mcp` behind the auth middleware.
fn router<S>(service: S, auth_state: AuthState) -> Router
where
    S: tower::Service<Request, Error = std::convert::Infallible> + Clone + Send + Sync + 'static,
    S::Response: IntoResponse,
    S::Future: Send + 'static,
{
    let mcp = Router::new()
        .nest_service("/mcp", ServiceBuilder::new().service(service))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new().route("/health", get(health)).merge(mcp)
}

impl App {
    /// Run the MCP server with HTTP transport.
    pub async fn run_serve(
        &self,
        host: Option<&str>,
        port: Option<u16>,
        skip_healthcheck: bool,
    ) -> Result<()> {
        tracing::info!("Starting MCP neo4j HTTP server");

        let config = Config::load()?;
        let host = host.unwrap_or(config.server.host.as_str()).to_string();
        let port = port.unwrap_or(config.server.port);

        if config.server.api_key.is_some() {
            tracing::info!("API key authentication enabled");
        } else {
            tracing::warn!("No API key configured - server is unprotected!");
        }

        let auth_state = AuthState {
            api_key: config.server.api_key.as_deref().map(Arc::from),
        };
        let policy = config.healthcheck.clone();

        let ctx = Context::connect(config).await?;

        if skip_healthcheck {
            tracing::warn!("Skipping Neo4j health check");
        } else {
            wait_until_ready(ctx.graph.as_ref(), &policy).await?;
        }

        let service = StreamableHttpService::new(
            move || Ok(McpServer::new(ctx.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig::default(),
        );

        let app = router(service, auth_state);

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid address {}:{}: {}", host, port, e))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to bind to {}: {}", addr, e))?;

        tracing::info!("MCP HTTP server listening on http://{}/mcp", addr);

        axum::serve(listener, app).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            color_eyre::eyre::eyre!("HTTP server error: {}", e)
        })?;

        tracing::info!("HTTP server shutting down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    fn app(api_key: Option<&str>) -> Router {
        let echo = tower::service_fn(|_req: Request| async {
            Ok::<_, std::convert::Infallible>("mcp".into_response())
        });
        router(
            echo,
            AuthState {
                api_key: api_key.map(Arc::from),
            },
        )
    }

    async fn status(app: Router, uri: &str, bearer: Option<&str>) -> StatusCode {
        let mut req = axum::http::Request::builder().uri(uri);
        if let Some(token) = bearer {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        app.oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        assert_eq!(status(app(Some("secret")), "/health", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_mcp_requires_matching_key() {
        assert_eq!(
            status(app(Some("secret")), "/mcp", None).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(app(Some("secret")), "/mcp", Some("wrong")).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(app(Some("secret")), "/mcp", Some("secret")).await,
            StatusCode::OK
        );
    }

    #[test]
    fn test_token_matches_exact_key_only() {
        assert!(token_matches("secret", "secret"));
        assert!(!token_matches("secreT", "secret"));
        assert!(!token_matches("secret-extra", "secret"));
        assert!(!token_matches("", "secret"));
    }

    #[tokio::test]
    async fn test_mcp_open_without_key() {
        assert_eq!(status(app(None), "/mcp", None).await, StatusCode::OK);
    }
}
