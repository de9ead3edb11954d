// Axum request handlers — translate /books requests into library and sequencer calls.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::engine::persist::PersistResults;
use crate::engine::sequencer::Sequencer;
use crate::error::{ApiError, LibraryError};
use crate::store::library::Library;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<Library>,
    pub sequencer: Arc<Sequencer>,
}

impl AppState {
    pub fn new(library: Arc<Library>, sequencer: Arc<Sequencer>) -> Self {
        Self { library, sequencer }
    }
}

#[derive(Debug, Deserialize)]
struct BookBody {
    book: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenameBody {
    original_book: Option<String>,
    new_book: Option<String>,
}

type MessageResponse = (StatusCode, Json<Value>);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/books",
            get(list_books)
                .post(add_book)
                .delete(remove_book)
                .patch(rename_book)
                .put(persist_books),
        )
        .with_state(state)
}

pub struct LibraryServer {
    addr: SocketAddr,
    state: AppState,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl LibraryServer {
    /// Bind `addr` and serve the library API in a background task.
    ///
    /// Port 0 picks a free port; [`Self::books_url`] reports the bound address.
    pub async fn start(state: AppState, addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        let app = router(state.clone());

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                warn!("library server stopped with error: {}", e);
            }
        });

        info!("library server listening on http://{}", addr);

        Ok(Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
            task,
        })
    }

    /// URL of the `/books` resource.
    pub fn books_url(&self) -> String {
        format!("http://{}/books", self.addr)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
        info!("library server on {} stopped", self.addr);
    }
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, LibraryError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| {
            debug!("rejected request body: {}", rejection);
            LibraryError::Validation(rejection.body_text())
        })
}

fn message(status: StatusCode, text: &str) -> MessageResponse {
    (status, Json(json!({ "message": text })))
}

/// POST /books — append a title.
async fn add_book(
    State(state): State<AppState>,
    payload: Result<Json<BookBody>, JsonRejection>,
) -> Result<MessageResponse, ApiError> {
    let book = parse_body(payload)?
        .book
        .filter(|b| !b.is_empty())
        .ok_or_else(LibraryError::title_required)?;

    state.library.add(book.clone())?;
    info!("book {:?} added", book);
    Ok(message(StatusCode::CREATED, "Book added successfully."))
}

/// DELETE /books — remove a title. Any unusable body counts as not found.
async fn remove_book(
    State(state): State<AppState>,
    payload: Result<Json<BookBody>, JsonRejection>,
) -> Result<MessageResponse, ApiError> {
    let book = parse_body(payload)
        .ok()
        .and_then(|body| body.book)
        .ok_or_else(LibraryError::not_found)?;

    state.library.remove(&book)?;
    info!("book {:?} removed", book);
    Ok(message(StatusCode::OK, "Book removed successfully."))
}

/// PATCH /books — rename a title in place. Every failure is answered with 400.
async fn rename_book(
    State(state): State<AppState>,
    payload: Result<Json<RenameBody>, JsonRejection>,
) -> Result<MessageResponse, ApiError> {
    let rename = || -> Result<(String, String), LibraryError> {
        let body = parse_body(payload)?;
        let original = body
            .original_book
            .filter(|o| state.library.contains(o))
            .ok_or_else(LibraryError::not_found)?;
        let new = body.new_book.ok_or_else(LibraryError::title_required)?;
        state.library.rename(&original, new.clone())?;
        Ok((original, new))
    };

    let (original, new) =
        rename().map_err(|e| ApiError::with_status(StatusCode::BAD_REQUEST, e))?;
    info!("book {:?} renamed to {:?}", original, new);
    Ok(message(StatusCode::OK, "Book name updated successfully."))
}

/// GET /books — delimited listing in library order.
async fn list_books(State(state): State<AppState>) -> Result<String, ApiError> {
    let listing = state.sequencer.list(&state.library).await?;
    Ok(listing)
}

/// PUT /books — persist every title, answering once all writes have reported.
async fn persist_books(State(state): State<AppState>) -> Result<Json<PersistResults>, ApiError> {
    let results = state.sequencer.persist(&state.library).await?;
    Ok(Json(results))
}
