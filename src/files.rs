//! 文件列表处理器。

use axum::extract::Extension;
use axum::response::Html;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::storage::Storage;
use crate::template::render_file_list;

/// 递归列出存储目录下的所有文件。
pub async fn list_files(
    Extension(storage): Extension<Arc<Storage>>,
) -> Result<Html<String>, ApiError> {
    let files = storage.walk_files().await.map_err(|err| {
        warn!(root = ?storage.root_path(), error = %err, "walk storage failed");
        ApiError::Internal("error listing files".into())
    })?;
    info!(count = files.len(), "list files");
    Ok(Html(render_file_list(&files)))
}
