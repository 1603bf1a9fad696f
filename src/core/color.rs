//! Bar colours: CSS-style RGBA values, the per-pass palette cycle and the
//! ANSI escapes the terminal renderer paints them with.

use std::{fmt, str};

use crate::core::constants::{NEGATIVE_ALPHA, NEGATIVE_RGB, PALETTE};

// --- Rgba ---

/// 8-bit channels plus a fractional alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fixed alert colour for values below zero.
    #[inline]
    #[must_use]
    pub const fn negative() -> Self {
        Self::new(NEGATIVE_RGB.0, NEGATIVE_RGB.1, NEGATIVE_RGB.2, NEGATIVE_ALPHA)
    }

    /// Composite over an opaque background colour.
    #[must_use]
    pub fn over(self, (br, bg, bb): (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mix = |fg: u8, bg: u8| (f64::from(fg) * a + f64::from(bg) * (1.0 - a)).round() as u8;
        (mix(self.r, br), mix(self.g, bg), mix(self.b, bb))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// --- PaletteCycle ---

/// Hands out one palette colour per column group.
///
/// The cycle lives for exactly one rendering pass; two tables rendered side
/// by side each get their own. The position advances *before* a colour is
/// yielded, so the first group is painted with palette entry 1 and entry 0
/// comes up eighth.
#[derive(Clone, Debug)]
pub struct PaletteCycle {
    position: usize,
    opacity: f64,
}

impl PaletteCycle {
    #[must_use]
    pub fn new(opacity: f64) -> Self {
        Self {
            position: 0,
            opacity,
        }
    }

    /// Advance one step (wrapping) and return the colour for the next group.
    pub fn next_color(&mut self) -> Rgba {
        self.position = (self.position + 1) % PALETTE.len();
        let (r, g, b) = PALETTE[self.position];
        Rgba::new(r, g, b, self.opacity)
    }
}

// --- AnsiCode ---

/// Pre-formatted escape sequence, inline so painting a cell never allocates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

impl AnsiCode {
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// True-colour background `ESC[48;2;R;G;Bm`.
    #[must_use]
    pub fn bg(r: u8, g: u8, b: u8) -> Self {
        Self::true_color(b"\x1b[48;2;", r, g, b)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn true_color(prefix: &[u8; 7], r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(prefix);
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            len: len as u8,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            // only ASCII digits and escape bytes are ever written
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or(""),
        }
    }
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}
