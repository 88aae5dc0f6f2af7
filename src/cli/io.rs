//! JSON I/O handling for CLI
//!
//! - Input: one JSON document on stdin, possibly spread over several lines
//! - Output: one JSON object per line on stdout
//! - UTF-8 only

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON request of type `T`
pub fn read_request<T: DeserializeOwned, R: Read>(reader: &mut R) -> CliResult<T> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::invalid_request("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Write an error response
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, response: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_multiline_request() {
        let mut input = "{\n  \"a\": 1\n}\n".as_bytes();
        let value: Value = read_request(&mut input).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_read_empty_request() {
        let mut input = "  \n".as_bytes();
        let err = read_request::<Value, _>(&mut input).unwrap_err();
        assert_eq!(err.code_str(), "SEARCH_CLI_INVALID_REQUEST");
    }

    #[test]
    fn test_write_response_envelope() {
        let mut out = Vec::new();
        write_response(&mut out, serde_json::json!({"x": 1})).unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["x"], 1);
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn test_write_error_envelope() {
        let mut out = Vec::new();
        write_error(&mut out, "SEARCH_UNKNOWN_FIELD", "bad field").unwrap();

        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "SEARCH_UNKNOWN_FIELD");
        assert_eq!(parsed["message"], "bad field");
    }
}
