use thiserror::Error;

/// 保存失败且拿不到任何具体信息时展示的兜底文案
pub const GENERIC_SAVE_FAILURE: &str = "保存内容失败，请稍后重试";

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 草稿校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 编辑会话错误
    #[error("编辑器错误: {0}")]
    Editor(#[from] EditorError),
    /// 页面导航参数错误
    #[error("导航错误: {0}")]
    Navigation(#[from] NavigationError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: BoxedSource,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, detail={detail:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: BoxedSource,
    },
}

impl ApiError {
    /// 面向用户的失败原因
    ///
    /// 优先使用后端返回的 `detail`，其次是传输层错误信息，最后是兜底文案
    pub fn user_message(&self) -> String {
        let message = match self {
            ApiError::BadResponse {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            ApiError::BadResponse { status, .. } => {
                format!("Request failed with status code {}", status)
            }
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                source.to_string()
            }
        };

        if message.trim().is_empty() {
            GENERIC_SAVE_FAILURE.to_string()
        } else {
            message
        }
    }

    /// 是否为 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::BadResponse { status: 404, .. })
    }
}

/// 草稿校验错误（按校验顺序排列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("请输入标题")]
    MissingTitle,
    #[error("请输入描述")]
    MissingDescription,
    #[error("请输入关联课程 ID")]
    MissingLinkedCourseId,
}

/// 编辑会话错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// 页面以无法识别的 action 打开
    #[error("无法识别的操作: {action}，请刷新页面后重试")]
    UnexpectedMode { action: String },
    /// 上一次保存尚未完成
    #[error("正在保存中，请勿重复提交")]
    SaveInFlight,
}

/// 页面导航参数错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// `action` 查询参数不是 add / edit
    #[error("无法识别的 action 参数: {action}")]
    UnrecognizedAction { action: String },
    /// 页面地址无法解析
    #[error("无法解析页面地址: {page}")]
    InvalidPage { page: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
    /// 编辑脚本引用了不可编辑的字段
    #[error("不可编辑的字段: {field}")]
    UnknownField { field: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 后端地址无效
    #[error("无效的后端地址: {url}")]
    InvalidBaseUrl { url: String },
    /// HTTP 客户端创建失败
    #[error("HTTP 客户端创建失败: {source}")]
    ClientBuildFailed {
        #[source]
        source: BoxedSource,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|u| u.to_string()).unwrap_or_default();
        AppError::Api(ApiError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // 从字符串解析时没有路径
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 通知用户时展示的文案
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e.user_message(),
            AppError::Validation(e) => e.to_string(),
            AppError::Editor(e) => e.to_string(),
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    GENERIC_SAVE_FAILURE.to_string()
                } else {
                    message
                }
            }
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
