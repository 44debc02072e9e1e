//! 测试用的 exam-contents 后端

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use exam_content_admin::{
    ContentClient, Config, EditorSession, EditorUi, NavigationContext, Notice,
};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// 后端收到的一次请求
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
pub struct Backend {
    records: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    delay: Duration,
    write_failure: Option<(u16, Value)>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, record: Value) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }

    /// 每个请求响应前等待
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// POST / PUT 一律返回指定错误
    pub fn failing_writes(mut self, status: u16, body: Value) -> Self {
        self.write_failure = Some((status, body));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    /// 在随机端口上启动，返回根地址
    pub async fn spawn(&self) -> String {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }
}

async fn handle(State(backend): State<Backend>, method: Method, uri: Uri, body: Bytes) -> Response {
    let path = uri.path().to_string();
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    backend.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: path.clone(),
        body: body.clone(),
    });

    if !backend.delay.is_zero() {
        tokio::time::sleep(backend.delay).await;
    }

    if method != Method::GET {
        if let Some((status, failure)) = &backend.write_failure {
            let status = StatusCode::from_u16(*status).expect("status");
            return (status, Json(failure.clone())).into_response();
        }
    }

    let Some(rest) = path.strip_prefix("/exam-contents/") else {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response();
    };

    if rest.is_empty() {
        if method == Method::GET {
            let records = backend.records.lock().unwrap().clone();
            return Json(Value::Array(records)).into_response();
        }
        if method == Method::POST {
            let mut record = body.unwrap_or(Value::Null);
            record["is_active"] = json!(true);
            record["created_at"] = json!("2025-01-01T00:00:00");
            record["updated_at"] = json!("2025-01-01T00:00:00");
            backend.records.lock().unwrap().push(record.clone());
            return (StatusCode::CREATED, Json(record)).into_response();
        }
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let code = percent_decode_str(rest).decode_utf8_lossy().to_string();
    let mut records = backend.records.lock().unwrap();
    let Some(index) = records.iter().position(|r| r["exam_code"] == json!(code)) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Exam content not found"})),
        )
            .into_response();
    };

    if method == Method::GET {
        Json(records[index].clone()).into_response()
    } else if method == Method::PUT {
        let record = body.unwrap_or(Value::Null);
        records[index] = record.clone();
        Json(record).into_response()
    } else {
        StatusCode::METHOD_NOT_ALLOWED.into_response()
    }
}

/// 记录提示与跳转的展示层
#[derive(Default)]
pub struct RecordingUi {
    notices: Mutex<Vec<Notice>>,
    destinations: Mutex<Vec<String>>,
}

impl RecordingUi {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn destinations(&self) -> Vec<String> {
        self.destinations.lock().unwrap().clone()
    }
}

impl EditorUi for RecordingUi {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn navigate(&self, destination: &str) {
        self.destinations.lock().unwrap().push(destination.to_string());
    }
}

pub fn client(base_url: &str) -> ContentClient {
    ContentClient::new(&Config::with_base_url(base_url)).expect("client")
}

/// 打开会话（edit 模式会先加载）
pub async fn open_session(base_url: &str, page: &str) -> (EditorSession, Arc<RecordingUi>) {
    let config = Config::with_base_url(base_url);
    let ui = Arc::new(RecordingUi::default());
    let nav = NavigationContext::parse(page).expect("page");
    let session = EditorSession::open(nav, &config, client(base_url), ui.clone()).await;
    (session, ui)
}

/// 只创建会话，不加载
pub fn new_session(base_url: &str, page: &str) -> (EditorSession, Arc<RecordingUi>) {
    let config = Config::with_base_url(base_url);
    let ui = Arc::new(RecordingUi::default());
    let nav = NavigationContext::parse(page).expect("page");
    let session = EditorSession::new(nav, &config, client(base_url), ui.clone());
    (session, ui)
}

pub fn ssc_cgl_record() -> Value {
    json!({
        "exam_code": "ssc-cgl",
        "title": "Old",
        "description": "Old description",
        "linked_course_id": "course-7",
        "thumbnail_url": null,
        "banner_url": "https://cdn.example.com/banner.png",
        "exam_info_sections": [
            {"id": "sec-1", "header": " Syllabus ", "content": "Maths", "order": 4, "is_active": false}
        ],
        "is_active": true,
        "created_at": "2024-05-01T10:00:00",
        "updated_at": "2024-05-02T10:00:00"
    })
}
