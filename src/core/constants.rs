//! A collection of constants.

/// Solarized accents used for positive bars, as `(r, g, b)`.
///
/// <http://ethanschoonover.com/solarized>
pub const PALETTE: [(u8, u8, u8); 8] = [
    (181, 137, 0),  // yellow  #b58900
    (203, 75, 22),  // orange  #cb4b16
    (220, 50, 47),  // red     #dc322f
    (211, 54, 130), // magenta #d33682
    (108, 113, 196), // violet #6c71c4
    (38, 139, 210), // blue    #268bd2
    (42, 161, 152), // cyan    #2aa198
    (133, 153, 0),  // green   #859900
];

/// Negative values are always drawn in this colour, regardless of group.
pub const NEGATIVE_RGB: (u8, u8, u8) = (255, 0, 0);
/// Alpha of the negative colour; not affected by `background_opacity`.
pub const NEGATIVE_ALPHA: f64 = 0.4;

/// Alpha applied to every palette colour unless configured otherwise.
pub const DEFAULT_BACKGROUND_OPACITY: f64 = 0.4;

/// Text alignment merged into the overlay style unless overridden.
pub const DEFAULT_TEXT_ALIGN: &str = "right";

/// Marker prefix flagging a CSV cell as "draw no bar here".
pub const IGNORE_MARKER: char = '!';

/// Terminal cells are never narrower than this many characters.
pub const MIN_CELL_WIDTH: usize = 6;
/// Fallback terminal width when stdout is not a tty.
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;
