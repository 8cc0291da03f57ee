//! Purpose: Define the user-visible progress notices of a conversion run.
//! Exports: `NoticeLevel`, `Notice`, `Reporter`, `ConsoleReporter`, `NoticeFormat`, `notice_json`.
//! Role: Only feedback channel of the CLI; conversion code emits notices, reporters render them.
//! Invariants: Human lines are `[INFO]`, `[OK]`, `[WARN]` or `[ERROR]` followed by the message.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use std::io::Write;

use serde_json::{Map, Value, json};

pub const DIVIDER_WIDTH: usize = 60;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoticeLevel {
    Info,
    Ok,
    Warn,
    Error,
}

impl NoticeLevel {
    pub fn tag(self) -> &'static str {
        match self {
            NoticeLevel::Info => "[INFO]",
            NoticeLevel::Ok => "[OK]",
            NoticeLevel::Warn => "[WARN]",
            NoticeLevel::Error => "[ERROR]",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Ok => "ok",
            NoticeLevel::Warn => "warn",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Source file name the notice is about, if any.
    pub file: Option<String>,
    pub message: String,
    pub details: Map<String, Value>,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            file: None,
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn line(&self) -> String {
        format!("{} {}", self.level.tag(), self.message)
    }
}

pub fn notice_json(notice: &Notice, time: Option<&str>) -> Value {
    let mut inner = Map::new();
    inner.insert("level".to_string(), json!(notice.level.name()));
    if let Some(time) = time {
        inner.insert("time".to_string(), json!(time));
    }
    if let Some(file) = &notice.file {
        inner.insert("file".to_string(), json!(file));
    }
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Sink for notices produced during a run.
pub trait Reporter {
    fn notice(&mut self, notice: Notice);

    /// Visual break between the batch header and per-file lines.
    fn divider(&mut self) {}
}

impl Reporter for Vec<Notice> {
    fn notice(&mut self, notice: Notice) {
        self.push(notice);
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoticeFormat {
    Human,
    Json,
}

pub struct ConsoleReporter<W: Write> {
    out: W,
    format: NoticeFormat,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, format: NoticeFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn notice(&mut self, notice: Notice) {
        let line = match self.format {
            NoticeFormat::Human => notice.line(),
            NoticeFormat::Json => {
                let value = notice_json(&notice, notice_time_now().as_deref());
                serde_json::to_string(&value).unwrap_or_else(|_| {
                    "{\"notice\":{\"level\":\"error\",\"message\":\"json encode failed\"}}"
                        .to_string()
                })
            }
        };
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::warn!(error = %err, "failed to write notice");
        }
    }

    fn divider(&mut self) {
        if self.format != NoticeFormat::Human {
            return;
        }
        if let Err(err) = writeln!(self.out, "{}", "-".repeat(DIVIDER_WIDTH)) {
            tracing::warn!(error = %err, "failed to write divider");
        }
    }
}

fn notice_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    time::OffsetDateTime::now_utc().format(&Rfc3339).ok()
}
