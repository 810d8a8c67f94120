//! Fakes and request helpers shared by the router tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;

use medline_advice::error::AdviceError;
use medline_advice::{AdviceResult, AdviceSource};
use medline_core::models::clinic::ClinicDirectory;
use medline_mail::ReportMailer;
use medline_mail::error::MailError;
use medline_server::state::AppState;

// ── Advice ───────────────────────────────────────────────────────────────────

type Reply = Box<dyn Fn() -> AdviceResult + Send + Sync>;

pub struct FakeAdvice {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeAdvice {
    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::with(Box::new(move || Ok(text.clone())))
    }

    pub fn failing(make: fn() -> AdviceError) -> Arc<Self> {
        Self::with(Box::new(move || Err(make())))
    }

    fn with(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AdviceSource for FakeAdvice {
    async fn fetch(&self, prompt: &str) -> AdviceResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)()
    }
}

// ── Mail ─────────────────────────────────────────────────────────────────────

pub struct FakeMailer {
    fail: bool,
    sent: Mutex<Vec<(String, Vec<u8>)>>,
}

impl FakeMailer {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportMailer for FakeMailer {
    async fn send(&self, destination: &str, report: &[u8]) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Smtp("550 mailbox unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), report.to_vec()));
        Ok(())
    }
}

// ── State and requests ───────────────────────────────────────────────────────

pub fn state(advice: &Arc<FakeAdvice>, mailer: Option<&Arc<FakeMailer>>) -> AppState {
    let mailer = mailer.map(|m| m.clone() as Arc<dyn ReportMailer>);
    AppState::new(advice.clone(), mailer, ClinicDirectory::uae()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
