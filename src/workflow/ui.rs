//! 编辑器与展示层之间的接口

use std::sync::Mutex;

use tracing::{info, warn};

use crate::error::{EditorError, ValidationError};

/// 需要告知用户的结果（阻塞式提示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// 必填字段缺失
    ValidationFailed(ValidationError),
    /// 页面以无法识别的 action 打开
    UnexpectedMode { action: String },
    /// 上一次保存尚未完成
    SaveInFlight,
    /// 保存失败
    SaveFailed { message: String },
    /// 保存成功
    Saved,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::ValidationFailed(e) => e.to_string(),
            Notice::UnexpectedMode { action } => EditorError::UnexpectedMode {
                action: action.clone(),
            }
            .to_string(),
            Notice::SaveInFlight => EditorError::SaveInFlight.to_string(),
            Notice::SaveFailed { message } => format!("保存内容失败: {}", message),
            Notice::Saved => "内容保存成功！".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved)
    }
}

/// 展示层能力：提示用户、页面跳转
pub trait EditorUi: Send + Sync {
    fn notify(&self, notice: &Notice);
    fn navigate(&self, destination: &str);
}

/// 命令行下的展示层：提示写入日志，跳转只记录目标地址
#[derive(Debug, Default)]
pub struct ConsoleUi {
    destination: Mutex<Option<String>>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次跳转的目标地址
    pub fn destination(&self) -> Option<String> {
        self.destination
            .lock()
            .map(|d| d.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl EditorUi for ConsoleUi {
    fn notify(&self, notice: &Notice) {
        if notice.is_error() {
            warn!("⚠️ {}", notice.message());
        } else {
            info!("✅ {}", notice.message());
        }
    }

    fn navigate(&self, destination: &str) {
        info!("➡️ 跳转到 {}", destination);
        match self.destination.lock() {
            Ok(mut slot) => *slot = Some(destination.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(destination.to_string()),
        }
    }
}
