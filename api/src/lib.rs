mod core;
mod error_handler;
mod routes;

use std::{env, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::routes::{chat::chat_route::chat_route, hello::hello_route::hello};

/// Address used when `API_ADDRESS` is unset.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";

/// Builds the HTTP router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat_route))
        .route("/api/bruvi", post(chat_route))
        .route("/api/hello", get(hello))
        .with_state(state)
}

/// Reads configuration from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.into());
    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    // Bind to address
    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            addr: host_url.clone(),
            source,
        })?;
    info!(address = %host_url, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ai_llm_service::AiLlmError;
    use ai_llm_service::error_handler::{Provider, ProviderError, ProviderErrorKind};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use rag_chat::{ChatConfig, CompletionProvider, EmbeddingsProvider, ProviderFuture};
    use serde_json::{Value, json};
    use site_corpus::{CorpusRecord, CorpusStore, SharedCorpus};
    use tower::ServiceExt;

    #[derive(Default)]
    struct FakeLlm {
        fail_embedding: bool,
        embed_calls: AtomicUsize,
        complete_calls: AtomicUsize,
    }

    impl EmbeddingsProvider for FakeLlm {
        fn embed<'a>(&'a self, _text: &'a str) -> ProviderFuture<'a, Vec<f32>> {
            self.embed_calls.fetch_add(1, Ordering::SeqCst);
            let out = if self.fail_embedding {
                Err(AiLlmError::from(ProviderError::new(
                    Provider::OpenAI,
                    ProviderErrorKind::EmptyChoices,
                )))
            } else {
                Ok(vec![0.0, 1.0])
            };
            Box::pin(async move { out })
        }
    }

    impl CompletionProvider for FakeLlm {
        fn complete<'a>(&'a self, _system: &'a str, _user: &'a str) -> ProviderFuture<'a, String> {
            self.complete_calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok("The BV-01 brews tea too.".to_string()) })
        }
    }

    fn state(llm: Arc<FakeLlm>) -> Arc<AppState> {
        let store = CorpusStore::from_records(vec![
            CorpusRecord {
                url: "https://bruvi.com/cups".into(),
                page_title: "B-Cups".into(),
                text_summary: "Coffee and tea pods".into(),
                embedding: vec![1.0, 0.0],
            },
            CorpusRecord {
                url: "https://bruvi.com/bv-01".into(),
                page_title: "BV-01".into(),
                text_summary: "Brews coffee and tea".into(),
                embedding: vec![0.0, 1.0],
            },
        ])
        .unwrap();
        let cfg = ChatConfig {
            top_k: 1,
            ..ChatConfig::default()
        };
        Arc::new(AppState::new(
            SharedCorpus::preloaded(store),
            llm.clone(),
            llm,
            cfg,
        ))
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn read_json(res: axum::response::Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn hello_answers_without_touching_services() {
        let llm = Arc::new(FakeLlm::default());
        let res = router(state(llm.clone()))
            .oneshot(Request::get("/api/hello").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(read_json(res).await, json!({ "hello": "world" }));
        assert_eq!(llm.embed_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn chat_returns_content_and_references() {
        let llm = Arc::new(FakeLlm::default());
        let body = json!({
            "messages": [
                { "text": "Hi", "source": "customer" },
                { "text": "Hello!", "source": "assistant/bruvi" },
                { "text": "Can it brew tea?", "source": "customer" }
            ]
        });

        let res = router(state(llm.clone()))
            .oneshot(post_json("/api/chat", body.to_string()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            read_json(res).await,
            json!({
                "content": "The BV-01 brews tea too.",
                "references": [{
                    "url": "https://bruvi.com/bv-01",
                    "page_title": "BV-01",
                    "text_summary": "Brews coffee and tea"
                }]
            })
        );
        assert_eq!(llm.complete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn legacy_alias_routes_to_chat() {
        let llm = Arc::new(FakeLlm::default());
        let body = json!({ "messages": [{ "text": "Price?", "source": "customer" }] });

        let res = router(state(llm))
            .oneshot(post_json("/api/bruvi", body.to_string()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_messages_are_rejected_before_any_call() {
        let llm = Arc::new(FakeLlm::default());
        let res = router(state(llm.clone()))
            .oneshot(post_json("/api/chat", json!({ "messages": [] }).to_string()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["error"], "INVALID_REQUEST");
        assert_eq!(llm.embed_calls.load(Ordering::SeqCst), 0);
        assert_eq!(llm.complete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let llm = Arc::new(FakeLlm::default());
        let res = router(state(llm))
            .oneshot(post_json("/api/chat", "{\"messages\": [".into()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(res).await["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn embedding_failure_is_bad_gateway() {
        let llm = Arc::new(FakeLlm {
            fail_embedding: true,
            ..FakeLlm::default()
        });
        let body = json!({ "messages": [{ "text": "Price?", "source": "customer" }] });

        let res = router(state(llm.clone()))
            .oneshot(post_json("/api/chat", body.to_string()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(read_json(res).await["error"], "EMBEDDING_SERVICE_ERROR");
        assert_eq!(llm.complete_calls.load(Ordering::SeqCst), 0);
    }
}
