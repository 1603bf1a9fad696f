//! Cell text to number, zero-allocation on the common path.
//!
//! Presentation noise is stripped first: whitespace, `%`, currency symbols
//! (`$ € £ ¥ 円`, plus `\` which some Japanese fonts render as the yen sign)
//! and `,` thousands separators. The Unicode minus `−` becomes `-`. Whatever
//! remains must parse as a *finite* `f64`.

/// Parsed content of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    NotNumeric,
}

impl CellValue {
    #[inline]
    #[must_use]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::NotNumeric => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Self::Number(v)
        } else {
            Self::NotNumeric
        }
    }
}

#[inline]
fn is_noise(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '%' | '$' | '€' | '£' | '¥' | '円' | '\\')
}

/// Normalise and parse; never fails, unparseable text yields `NotNumeric`.
#[must_use]
pub fn extract(text: &str) -> CellValue {
    // Fast path: already clean ASCII.
    if text.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E')) {
        return parse(text.as_bytes());
    }
    match normalize(text) {
        Some(buf) => parse(&buf),
        None => CellValue::NotNumeric,
    }
}

/// Noise dropped, `−` mapped to `-`; `None` if anything non-ASCII survives.
fn normalize(text: &str) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(text.len());
    for c in text.chars().filter(|&c| !is_noise(c)) {
        let c = if c == '\u{2212}' { '-' } else { c };
        buf.push(u8::try_from(c).ok().filter(u8::is_ascii)?);
    }
    Some(buf)
}

#[inline]
fn parse(bytes: &[u8]) -> CellValue {
    match lexical_core::parse::<f64>(bytes) {
        Ok(v) => CellValue::from(v),
        Err(_) => CellValue::NotNumeric,
    }
}
