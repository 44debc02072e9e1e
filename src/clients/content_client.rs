/// 考试内容 API 客户端
///
/// 封装所有与 `exam-contents` 资源相关的 HTTP 调用
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, ConfigError};
use crate::models::{ExamContent, ExamContentPayload};

/// 集合资源名
pub const COLLECTION: &str = "exam-contents";

// 与浏览器 encodeURIComponent 保留的字符一致
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 考试内容 API 客户端
#[derive(Clone, Debug)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                url: config.api_base_url.clone(),
            }
            .into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConfigError::ClientBuildFailed {
                source: Box::new(e),
            })?;

        Ok(Self { http, base_url })
    }

    /// 集合路径，如 `/exam-contents/`
    pub fn collection_path() -> String {
        format!("/{}/", COLLECTION)
    }

    /// 单条记录路径，考试编码按 URI 组件编码
    pub fn record_path(code: &str) -> String {
        format!("/{}/{}", COLLECTION, utf8_percent_encode(code, COMPONENT))
    }

    /// 按编码获取单条记录
    pub async fn get_record(&self, code: &str) -> AppResult<ExamContent> {
        let path = Self::record_path(code);
        let response = self.send(self.http.get(self.url(&path)), &path).await?;
        read_json(response, &path).await
    }

    /// 获取全部记录
    pub async fn list_records(&self) -> AppResult<Vec<ExamContent>> {
        let path = Self::collection_path();
        let response = self.send(self.http.get(self.url(&path)), &path).await?;
        read_json(response, &path).await
    }

    /// 新建记录
    pub async fn create_record(&self, payload: &ExamContentPayload) -> AppResult<Value> {
        let path = Self::collection_path();
        let response = self
            .send(self.http.post(self.url(&path)).json(payload), &path)
            .await?;
        read_body(response, &path).await
    }

    /// 更新记录
    pub async fn update_record(
        &self,
        code: &str,
        payload: &ExamContentPayload,
    ) -> AppResult<Value> {
        let path = Self::record_path(code);
        let response = self
            .send(self.http.put(self.url(&path)).json(payload), &path)
            .await?;
        read_body(response, &path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送请求，非 2xx 响应转换为 `ApiError::BadResponse`
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> AppResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("{} 返回 {}: {}", endpoint, status, body);

        Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            detail: extract_detail(&body),
        }
        .into())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &str) -> AppResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))?;
    Ok(serde_json::from_slice(&bytes)?)
}

// 写操作成功后响应体只用于日志，空响应或非 JSON 不视为失败
async fn read_body(response: Response, endpoint: &str) -> AppResult<Value> {
    let text = response
        .text()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))?;

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// 从错误响应体中提取 `detail` 字段
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
