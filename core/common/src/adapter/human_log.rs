//! 人間向けログ（-v 指定時に stderr へ要点のみ出力）と複数出力先への分配

use crate::error::Error;
use crate::ports::outbound::{Log, LogRecord};
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

/// LogRecord を 1 行に整形して stderr へ出す Log 実装
#[derive(Debug, Clone, Default)]
pub struct StderrLog;

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        eprintln!("{}", format_line(record));
        Ok(())
    }
}

/// `[level] layer/kind: message {fields}` 形式。fields は長すぎれば切り詰める。
fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}]", record.level.as_str());
    match (&record.layer, &record.kind) {
        (Some(layer), Some(kind)) => line.push_str(&format!(" {}/{}:", layer, kind)),
        (Some(s), None) | (None, Some(s)) => line.push_str(&format!(" {}:", s)),
        (None, None) => {}
    }
    line.push(' ');
    line.push_str(&record.message);
    if let Some(fields) = &record.fields {
        let s = serde_json::to_string(fields).unwrap_or_default();
        if s.chars().count() > FIELDS_SUMMARY_MAX {
            let truncated: String = s.chars().take(FIELDS_SUMMARY_MAX).collect();
            line.push_str(&format!(" {}... (len={})", truncated, s.len()));
        } else {
            line.push(' ');
            line.push_str(&s);
        }
    }
    line
}

/// 複数の Log に同じレコードを流す。1 つが失敗しても残りには書き、最初のエラーを返す。
pub struct TeeLog {
    logs: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(logs: Vec<Arc<dyn Log>>) -> Self {
        Self { logs }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for log in &self.logs {
            if let Err(e) = log.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
