//! 页面导航上下文
//!
//! 编辑页的地址形如 `/admin/exam/{examName}?action=edit`，
//! 考试编码取自路径段，编辑模式取自 `action` 查询参数。

use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::error::NavigationError;

/// 路径中没有考试名时的展示名称
pub const UNKNOWN_EXAM: &str = "Unknown Exam";

const PLACEHOLDER_ORIGIN: &str = "http://localhost";

/// 编辑模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorMode {
    /// 新建记录
    Add,
    /// 修改已有记录
    Edit,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Add => "add",
            EditorMode::Edit => "edit",
        }
    }

    /// 从 `action` 查询参数解析，缺省或为空时视为新建
    pub fn from_action(action: Option<&str>) -> Result<Self, NavigationError> {
        match action {
            None | Some("") => Ok(EditorMode::Add),
            Some(value) => value.parse(),
        }
    }
}

impl FromStr for EditorMode {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(EditorMode::Add),
            "edit" => Ok(EditorMode::Edit),
            other => Err(NavigationError::UnrecognizedAction {
                action: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 进入编辑页时的导航上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// 解码后的路径段
    exam_name: Option<String>,
    /// 原始 action 参数
    action: Option<String>,
    /// 展示名称（新建考试时直接使用用户输入的名称）
    display_override: Option<String>,
}

impl NavigationContext {
    /// 由已解码的路径段和 action 参数构造
    pub fn new(exam_name: Option<&str>, action: Option<&str>) -> Self {
        Self {
            exam_name: exam_name.filter(|s| !s.is_empty()).map(str::to_string),
            action: action.filter(|s| !s.is_empty()).map(str::to_string),
            display_override: None,
        }
    }

    /// 解析页面地址
    ///
    /// 支持 `/admin/exam/ssc-cgl?action=edit` 与带协议和主机的完整地址
    pub fn parse(page: &str) -> Result<Self, NavigationError> {
        let invalid = || NavigationError::InvalidPage {
            page: page.to_string(),
        };

        // 相对路径拼接到占位主机上再解析
        let base = Url::parse(PLACEHOLDER_ORIGIN).map_err(|_| invalid())?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(page)
            .map_err(|_| invalid())?;

        let mut segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
        if segments.last() == Some(&"") {
            segments.pop();
        }
        let rest = match segments.as_slice() {
            ["admin", "exam", rest @ ..] => rest,
            _ => return Err(invalid()),
        };

        let exam_name = match rest {
            [] => None,
            [segment] if !segment.is_empty() => Some(
                percent_decode_str(segment)
                    .decode_utf8()
                    .map_err(|_| invalid())?
                    .into_owned(),
            ),
            _ => return Err(invalid()),
        };

        let action = url
            .query_pairs()
            .find(|(key, _)| key == "action")
            .map(|(_, value)| value.into_owned());

        Ok(Self::new(exam_name.as_deref(), action.as_deref()))
    }

    /// 为一个新考试构造新建模式的上下文，考试编码由名称生成
    pub fn for_new_exam(name: &str) -> Self {
        let code = slugify(name);
        let display = name.trim();
        Self {
            exam_name: Some(code).filter(|c| !c.is_empty()),
            action: Some(EditorMode::Add.as_str().to_string()),
            display_override: Some(display.to_string()).filter(|d| !d.is_empty()),
        }
    }

    /// 导航给出的考试编码，可能为空
    pub fn exam_code(&self) -> &str {
        self.exam_name.as_deref().unwrap_or_default()
    }

    /// 展示名称：连字符替换为空格
    pub fn display_name(&self) -> String {
        if let Some(display) = &self.display_override {
            return display.clone();
        }
        match &self.exam_name {
            Some(name) => name.replace('-', " "),
            None => UNKNOWN_EXAM.to_string(),
        }
    }

    /// 原始 action，缺省为 `add`
    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or(EditorMode::Add.as_str())
    }

    pub fn mode(&self) -> Result<EditorMode, NavigationError> {
        EditorMode::from_action(self.action.as_deref())
    }
}

/// 将考试名称转换为编码：小写，非字母数字的连续字符替换为单个连字符
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match Regex::new(r"[^\p{L}\p{N}]+") {
        Ok(re) => re.replace_all(&lowered, "-").trim_matches('-').to_string(),
        Err(_) => lowered,
    }
}
