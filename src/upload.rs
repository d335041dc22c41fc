//! 表单上传处理器：将 multipart 文件字段直接写入存储目录。

use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Extension, Multipart};
use axum::response::Redirect;
use futures_util::stream::StreamExt;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::UPLOAD_FIELD_NAME;
use crate::error::ApiError;
use crate::storage::Storage;

fn form_file_error() -> ApiError {
    ApiError::BadRequest("error reading form file".into())
}

/// 接收上传文件，按原文件名保存后重定向回表单页。
pub async fn upload_file(
    Extension(storage): Extension<Arc<Storage>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, ApiError> {
    let mut multipart = multipart.map_err(|err| {
        warn!(error = %err, "rejected upload body");
        form_file_error()
    })?;

    loop {
        let Some(mut field) = multipart.next_field().await.map_err(|err| {
            warn!(error = %err, "failed to read multipart field");
            form_file_error()
        })?
        else {
            return Err(form_file_error());
        };

        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            debug!("file field without filename skipped");
            continue;
        };

        storage.ensure_root().await.map_err(|err| {
            warn!(root = ?storage.root_path(), error = %err, "create storage dir failed");
            ApiError::Internal(format!("error creating the storage directory: {err}"))
        })?;

        let target = storage.upload_target(&file_name);
        let written = save_field(&mut field, &target).await.inspect_err(|_| {
            warn!(name = file_name, path = ?target, "saving upload failed");
        })?;
        info!(name = file_name, bytes = written, "upload saved");
        return Ok(Redirect::to("/"));
    }
}

/// 逐块写入目标文件；失败时保留已写入部分。
async fn save_field(field: &mut Field<'_>, target: &Path) -> Result<u64, ApiError> {
    let mut file = File::create(target)
        .await
        .map_err(|err| ApiError::Internal(format!("error saving the file: {err}")))?;

    let mut written: u64 = 0;
    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|err| ApiError::Internal(format!("error saving the file: {err}")))?;
        if chunk.is_empty() {
            continue;
        }
        file.write_all(&chunk)
            .await
            .map_err(|err| ApiError::Internal(format!("error saving the file: {err}")))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|err| ApiError::Internal(format!("error saving the file: {err}")))?;

    Ok(written)
}
