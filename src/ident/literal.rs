//! String-literal encoding.

/// Encode `bytes` as a double-quoted, ASCII-only string literal.
///
/// Control characters use a named escape where one exists and a hex
/// escape otherwise. A hex escape is followed by `""` before the next
/// printable character so the character cannot be read as another hex
/// digit. Bytes above 127 cannot be represented and become `?`.
pub fn strlit(bytes: impl AsRef<[u8]>) -> String {
    let bytes = bytes.as_ref();
    let mut r = String::with_capacity(bytes.len() + 2);
    r.push('"');

    let mut after_hex = false;

    for &b in bytes {
        match b {
            0..=31 | 127 => match named_escape(b) {
                Some(e) => r.push_str(e),
                None => {
                    push_hex(&mut r, b);
                    after_hex = true;
                }
            },
            32..=126 => {
                if after_hex {
                    r.push_str("\"\"");
                    after_hex = false;
                }
                match b {
                    b'"' => r.push_str("\\\""),
                    b'\\' => r.push_str("\\\\"),
                    _ => r.push(char::from(b)),
                }
            }
            _ => r.push('?'),
        }
    }

    r.push('"');
    r
}

fn named_escape(b: u8) -> Option<&'static str> {
    match b {
        b'\n' => Some("\\n"),
        b'\t' => Some("\\t"),
        0x0B => Some("\\v"),
        0x08 => Some("\\b"),
        b'\r' => Some("\\r"),
        0x0C => Some("\\f"),
        0x07 => Some("\\a"),
        _ => None,
    }
}

/// `\x` followed by upper-case hex digits without leading zeros.
fn push_hex(r: &mut String, b: u8) {
    r.push_str(&format!("\\x{:X}", b));
}
