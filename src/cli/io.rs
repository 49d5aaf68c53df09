//! JSON output for the CLI
//!
//! - One JSON object per line on stdout
//! - Success: `{"status":"ok","data":...}`
//! - Failure: `{"status":"error","code":...,"message":...}`

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{json, Value};

use super::errors::CliResult;

/// Builds a success envelope
pub fn ok_envelope<T: Serialize>(data: &T) -> CliResult<Value> {
    Ok(json!({
        "status": "ok",
        "data": serde_json::to_value(data)?
    }))
}

/// Builds an error envelope
pub fn error_envelope(code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

/// Write a success response to `out`
pub fn write_response<W: Write, T: Serialize>(out: &mut W, data: &T) -> CliResult<()> {
    write_line(out, &ok_envelope(data)?)
}

/// Write an error response to `out`
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    write_line(out, &error_envelope(code, message))
}

/// Locked stdout handle
pub fn stdout() -> io::StdoutLock<'static> {
    io::stdout().lock()
}

fn write_line<W: Write>(out: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_response() {
        let mut buf = Vec::new();
        write_response(&mut buf, &vec![1, 2]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"status": "ok", "data": [1, 2]}));
    }

    #[test]
    fn test_write_error() {
        let mut buf = Vec::new();
        write_error(&mut buf, "FEED_CLI_UNKNOWN_QUERY", "Unknown query 'x'").unwrap();

        let value: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "FEED_CLI_UNKNOWN_QUERY");
        assert_eq!(value["message"], "Unknown query 'x'");
    }
}
