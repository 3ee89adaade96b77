use ratatui::style::Color;

/// Colors every widget draws with. There is one compiled-in dark palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub typed: Color,
    pub missed: Color,
    pub missed_bg: Color,
    pub dim: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub accent: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub bar_filled: Color,
    pub bar_empty: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

const BASE: Color = Color::Rgb(0x1e, 0x1e, 0x2e);
const SURFACE: Color = Color::Rgb(0x31, 0x32, 0x44);
const OVERLAY: Color = Color::Rgb(0x45, 0x47, 0x5a);
const TEXT: Color = Color::Rgb(0xcd, 0xd6, 0xf4);
const MUTED: Color = Color::Rgb(0x58, 0x5b, 0x70);
const BLUE: Color = Color::Rgb(0x89, 0xb4, 0xfa);
const GREEN: Color = Color::Rgb(0xa6, 0xe3, 0xa1);
const RED: Color = Color::Rgb(0xf3, 0x8b, 0xa8);
const YELLOW: Color = Color::Rgb(0xf9, 0xe2, 0xaf);

pub const DARK: Palette = Palette {
    bg: BASE,
    fg: TEXT,
    typed: GREEN,
    missed: RED,
    missed_bg: Color::Rgb(0x45, 0x27, 0x3a),
    dim: MUTED,
    cursor_bg: Color::Rgb(0xf5, 0xe0, 0xdc),
    cursor_fg: BASE,
    accent: BLUE,
    border: OVERLAY,
    header_bg: SURFACE,
    header_fg: TEXT,
    bar_filled: BLUE,
    bar_empty: SURFACE,
    error: RED,
    warning: YELLOW,
    success: GREEN,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub colors: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self { colors: DARK }
    }
}
