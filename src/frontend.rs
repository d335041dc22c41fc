//! 上传表单页面：每次请求从模板目录读取并渲染。

use axum::extract::Extension;
use axum::response::Html;
use minijinja::{Environment, context};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::warn;

use crate::config::UPLOAD_FORM_TEMPLATE;
use crate::error::ApiError;

/// 页面模板所在目录。
#[derive(Clone, Debug)]
pub struct Templates {
    dir: PathBuf,
}

impl Templates {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// 读取上传表单模板（不做缓存）。
    pub async fn load_upload_form(&self) -> Result<String, ApiError> {
        let path = self.dir.join(UPLOAD_FORM_TEMPLATE);
        fs::read_to_string(&path).await.map_err(|err| {
            warn!(path = ?path, error = %err, "upload form template unavailable");
            ApiError::Internal(format!("open {}: {err}", path.display()))
        })
    }

    /// 解析并以空上下文渲染上传表单。
    pub async fn render_upload_form(&self) -> Result<String, ApiError> {
        let source = self.load_upload_form().await?;
        render_without_data(UPLOAD_FORM_TEMPLATE, &source).map_err(|err| {
            warn!(
                template = UPLOAD_FORM_TEMPLATE,
                error = %err,
                "upload form template invalid"
            );
            ApiError::Internal(err.to_string())
        })
    }
}

fn render_without_data(name: &str, source: &str) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(name, source)?;
    env.get_template(name)?.render(context! {})
}

/// 返回上传表单页面。
pub async fn upload_form(
    Extension(templates): Extension<Arc<Templates>>,
) -> Result<Html<String>, ApiError> {
    templates.render_upload_form().await.map(Html)
}
