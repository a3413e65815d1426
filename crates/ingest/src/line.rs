use board_core::{BoardError, Reading, Result};

/// Parse one text reading.
///
/// Two shapes are accepted:
/// - `channel timestamp value`, whitespace separated
///   (`temperature 1479305312 20.5`)
/// - a JSON object `{"channel": "...", "timestamp": 1479305312, "value": 20.5}`
///
/// Blank lines and `#` comments yield `Ok(None)`.  Missing trailing fields
/// are left as `None` so the dashboard can reject the reading; fields that are
/// present but not numeric fail with [`BoardError::InvalidSample`].
pub fn parse_line(line: &str) -> Result<Option<Reading>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(Some)
            .map_err(|e| BoardError::InvalidSample(format!("bad JSON reading: {e}")));
    }

    let mut parts = line.split_whitespace();
    let channel = parts.next().unwrap_or_default().to_string();

    let timestamp = parts
        .next()
        .map(|t| {
            t.parse::<i64>()
                .map_err(|_| BoardError::InvalidSample(format!("'{channel}': bad timestamp '{t}'")))
        })
        .transpose()?;
    let value = parts
        .next()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| BoardError::InvalidSample(format!("'{channel}': bad value '{v}'")))
        })
        .transpose()?;

    if let Some(extra) = parts.next() {
        return Err(BoardError::InvalidSample(format!(
            "'{channel}': unexpected trailing field '{extra}'"
        )));
    }

    Ok(Some(Reading {
        channel,
        timestamp,
        value,
    }))
}

/// Parse one raw input line.  Bytes that are not UTF-8 fail with
/// [`BoardError::InvalidSample`].
pub fn parse_bytes(raw: &[u8]) -> Result<Option<Reading>> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| BoardError::InvalidSample(format!("line is not UTF-8: {e}")))?;
    parse_line(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whitespace_triple() {
        let r = parse_line("temperature 1479305312 20.5").unwrap().unwrap();
        assert_eq!(r, Reading::new("temperature", 1479305312, 20.5));
    }

    #[test]
    fn parse_json_reading() {
        let r = parse_line(r#"{"channel":"light","timestamp":60,"value":250}"#)
            .unwrap()
            .unwrap();
        assert_eq!(r, Reading::new("light", 60, 250.0));
    }

    #[test]
    fn skip_blank_and_comment_lines() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("# header").unwrap().is_none());
    }

    #[test]
    fn missing_value_is_left_for_validation() {
        let r = parse_line("light 60").unwrap().unwrap();
        assert_eq!(r.value, None);
        assert!(r.sample().is_err());
    }

    #[test]
    fn non_numeric_fields_are_invalid() {
        assert!(matches!(
            parse_line("light sixty 250"),
            Err(BoardError::InvalidSample(_))
        ));
        assert!(matches!(
            parse_line("light 60 bright"),
            Err(BoardError::InvalidSample(_))
        ));
        assert!(parse_line("light 60 250 extra").is_err());
    }

    #[test]
    fn non_utf8_bytes_are_invalid() {
        assert!(matches!(
            parse_bytes(b"\xff\xfe garbage"),
            Err(BoardError::InvalidSample(_))
        ));
        assert_eq!(
            parse_bytes(b"light 2 150\r").unwrap(),
            Some(Reading::new("light", 2, 150.0))
        );
    }
}
