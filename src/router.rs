//! 路由装配：表单、上传、列表与静态文件服务。

use axum::extract::{DefaultBodyLimit, Extension};
use axum::http::Request;
use axum::routing::{get, post};
use axum::{Router, middleware};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, info_span};

use crate::error::method_not_allowed;
use crate::frontend::{self, Templates};
use crate::http::{self, build_cors_layer, client_ip};
use crate::storage::Storage;
use crate::{files, upload};

/// 构建应用路由。
pub fn build_router(
    storage: Arc<Storage>,
    templates: Arc<Templates>,
    cors_origins: Option<&str>,
) -> Router {
    let static_files = ServeDir::new(storage.root_path());

    let mut app = Router::new()
        .route("/", get(frontend::upload_form))
        .route(
            "/upload",
            post(upload::upload_file)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/list", get(files::list_files))
        .nest_service("/files", static_files)
        .layer(middleware::from_fn(http::add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let client_ip = client_ip(request);
                    info_span!(
                        env!("CARGO_CRATE_NAME"),
                        client_ip,
                        method = ?request.method(),
                        path = ?request.uri().path(),
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(Extension(storage))
        .layer(Extension(templates));

    if let Some(cors_layer) = build_cors_layer(cors_origins) {
        app = app.layer(cors_layer);
    }

    app
}
