//! # Exam Content Admin
//!
//! 考试内容（考试介绍页）的管理工具：查看、新建、编辑
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只负责 HTTP 调用，不做业务判断
//! - `ContentClient` - `exam-contents` 资源的 GET / POST / PUT
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ContentGateway` - 按编码读取 / 读取全部，404 视为不存在
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次编辑"的完整流程
//! - `Draft` - 唯一的草稿及其本地修改
//! - `EditorSession` - 加载 → 修改 → 校验 → 新建或更新 → 提示并跳转
//!
//! ### ④ 编排层（App）
//! - `app` - 命令行入口调度，组装配置、客户端与会话
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::ContentClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{EditorMode, ExamContent, ExamContentPayload, ExamInfoSection, NavigationContext};
pub use services::ContentGateway;
pub use workflow::{ConsoleUi, Draft, DraftField, EditorSession, EditorUi, Notice, SaveTarget, SectionField};
