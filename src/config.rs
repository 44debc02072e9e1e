/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 根地址
    pub api_base_url: String,
    /// 保存成功后跳转的内容管理列表页
    pub listing_destination: String,
    /// 新建草稿时的占位课程 ID
    pub default_linked_course_id: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            listing_destination: "/admin/add-content".to_string(),
            default_linked_course_id: "dummy-course-id".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            listing_destination: std::env::var("LISTING_DESTINATION").unwrap_or(default.listing_destination),
            default_linked_course_id: std::env::var("DEFAULT_LINKED_COURSE_ID").unwrap_or(default.default_linked_course_id),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 指向指定后端地址的配置（其余字段取默认值）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }
}
