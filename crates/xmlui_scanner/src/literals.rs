//! Decoding of literal token text into values.

/// Why a string literal could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeError {
    /// The text is not wrapped in matching quotes.
    MissingQuotes,
    /// `\x` or `\u` is not followed by enough hex digits.
    InvalidHexEscape,
    /// `\u{...}` names a value outside the Unicode range.
    InvalidCodePoint,
}

/// Decode the raw text of a string token, quotes included.
///
/// Supports `\b \f \n \r \t \v \0 \' \" \\ \``, `\xNN`, `\uNNNN` and
/// `\u{N...}`. Any other escaped character stands for itself, and a
/// backslash before a line break continues the string on the next line.
pub fn unescape_string(raw: &str) -> Result<String, EscapeError> {
    let mut chars = raw.chars();
    let quote = chars.next().ok_or(EscapeError::MissingQuotes)?;
    if !matches!(quote, '\'' | '"' | '`') || chars.next_back() != Some(quote) {
        return Err(EscapeError::MissingQuotes);
    }

    let body: Vec<char> = chars.collect();
    let mut result = String::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        let ch = body[i];
        i += 1;
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        let Some(&escaped) = body.get(i) else {
            result.push('\\');
            break;
        };
        i += 1;
        match escaped {
            'b' => result.push('\u{0008}'),
            'f' => result.push('\u{000C}'),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'v' => result.push('\u{000B}'),
            '0' => result.push('\0'),
            'x' => {
                let code = read_hex(&body, &mut i, 2).ok_or(EscapeError::InvalidHexEscape)?;
                result.push(char::from_u32(code).ok_or(EscapeError::InvalidCodePoint)?);
            }
            'u' if body.get(i) == Some(&'{') => {
                let close = body[i..]
                    .iter()
                    .position(|c| *c == '}')
                    .ok_or(EscapeError::InvalidHexEscape)?;
                let digits: String = body[i + 1..i + close].iter().collect();
                if digits.is_empty() {
                    return Err(EscapeError::InvalidHexEscape);
                }
                let code =
                    u32::from_str_radix(&digits, 16).map_err(|_| EscapeError::InvalidHexEscape)?;
                result.push(char::from_u32(code).ok_or(EscapeError::InvalidCodePoint)?);
                i += close + 1;
            }
            'u' => {
                let code = read_hex(&body, &mut i, 4).ok_or(EscapeError::InvalidHexEscape)?;
                // Lone surrogates have no `char`; keep the replacement character.
                result.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            '\r' => {
                if body.get(i) == Some(&'\n') {
                    i += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => result.push(other),
        }
    }
    Ok(result)
}

fn read_hex(body: &[char], i: &mut usize, count: usize) -> Option<u32> {
    let digits = body.get(*i..*i + count)?;
    let mut value = 0u32;
    for ch in digits {
        value = value * 16 + ch.to_digit(16)?;
    }
    *i += count;
    Some(value)
}

/// Convert the text of a numeric token to its value. Separators are removed
/// and `0x`/`0b` prefixes select the radix.
pub fn parse_numeric_literal(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return parse_radix(hex, 16);
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return parse_radix(bin, 2);
    }
    if let Ok(value) = cleaned.parse::<f64>() {
        return Some(value);
    }
    // `1.` and `1.e5` are valid numerals but not valid Rust float syntax.
    cleaned.replace(".e", ".0e").replace(".E", ".0E").parse::<f64>().ok().or_else(|| {
        let padded = format!("{}0", cleaned);
        padded.parse::<f64>().ok()
    })
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0f64;
    for ch in digits.chars() {
        value = value * radix as f64 + ch.to_digit(radix)? as f64;
    }
    Some(value)
}
