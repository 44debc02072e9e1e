//! 考试内容读取服务 - 业务能力层
//!
//! 只负责"读取考试内容"能力：按编码取一条、取全部，不关心编辑流程

use tracing::{error, info, warn};

use crate::clients::ContentClient;
use crate::error::{AppError, AppResult};
use crate::models::ExamContent;

/// 考试内容读取服务
///
/// 职责：
/// - 将后端响应转换为 `ExamContent`
/// - 404 转换为 `None`，其余失败原样向上传递
/// - 不缓存、不重试、不分页
#[derive(Clone, Debug)]
pub struct ContentGateway {
    client: ContentClient,
}

impl ContentGateway {
    pub fn new(client: ContentClient) -> Self {
        Self { client }
    }

    /// 按编码获取考试内容，不存在时返回 `None`
    pub async fn fetch_by_code(&self, code: &str) -> AppResult<Option<ExamContent>> {
        info!("🔍 正在获取考试内容: {}", code);

        match self.client.get_record(code).await {
            Ok(record) => {
                info!(
                    "✓ 获取成功: {} ({} 个段落)",
                    record.exam_code,
                    record.exam_info_sections.len()
                );
                Ok(Some(record))
            }
            Err(AppError::Api(e)) if e.is_not_found() => {
                warn!("⚠️ 考试内容不存在: {}", code);
                Ok(None)
            }
            Err(e) => {
                error!("❌ 获取考试内容失败: {}", e);
                Err(e)
            }
        }
    }

    /// 获取全部考试内容，保持后端返回的顺序
    pub async fn fetch_all(&self) -> AppResult<Vec<ExamContent>> {
        info!("🔍 正在获取全部考试内容...");

        match self.client.list_records().await {
            Ok(records) => {
                info!("✓ 共获取 {} 条考试内容", records.len());
                Ok(records)
            }
            Err(e) => {
                error!("❌ 获取考试内容列表失败: {}", e);
                Err(e)
            }
        }
    }
}
