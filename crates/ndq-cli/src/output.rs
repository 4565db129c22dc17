use std::io::{self, Write};

use serde_json::Value;

use crate::error::CliError;

/// Print `value` to stdout as a single JSON document.
pub fn render(value: &Value, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value, pretty)?;
    handle.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: &mut W, value: &Value, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_output_is_one_line() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"price": 150.25, "volume": null}), false).expect("written");

        let text = String::from_utf8(buffer).expect("utf-8");
        assert_eq!(text, "{\"price\":150.25,\"volume\":null}\n");
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &json!({"symbol": "AAPL"}), true).expect("written");

        let text = String::from_utf8(buffer).expect("utf-8");
        assert_eq!(text, "{\n  \"symbol\": \"AAPL\"\n}\n");
    }
}
