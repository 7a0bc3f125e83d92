//! Core types for spark-widgets.
//!
//! Plain data: colours, geometry, alignment, border glyphs and the style record
//! every widget carries. Nothing in here touches the terminal.

// =============================================================================
// Color
// =============================================================================

/// A foreground colour token understood by the [`Surface`](crate::renderer::Surface).
///
/// Two colours are the same token exactly when they compare equal, which is also
/// when they encode to the same escape sequence. The surface's colour cache is
/// keyed on this equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Terminal default foreground (`SGR 39`).
    #[default]
    TerminalDefault,
    /// 256-colour palette index.
    Ansi(u8),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Create an opaque truecolor value.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Create a palette colour (0-255).
    pub const fn ansi(index: u8) -> Self {
        Self::Ansi(index)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(254, 254, 254);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const RED: Self = Self::rgb(254, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);

    /// Create a colour from a packed `0xRRGGBB` integer.
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse `#RGB` or `#RRGGBB` (the `#` is optional).
    ///
    /// ```
    /// use spark_widgets::Color;
    ///
    /// assert_eq!(Color::from_hex("#ff0000"), Some(Color::rgb(255, 0, 0)));
    /// assert_eq!(Color::from_hex("fff"), Some(Color::rgb(255, 255, 255)));
    /// assert!(Color::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let digit = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = digit(bytes[0])?;
                let g = digit(bytes[1])?;
                let b = digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => {
                let byte = |i: usize| Some((digit(bytes[i])? << 4) | digit(bytes[i + 1])?);
                Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Cell coordinate, origin top-left, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Width/height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Grow each axis to at least `min`.
    pub fn at_least(self, min: u16) -> Self {
        Self {
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// Horizontal placement of a line inside the content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Split `free` padding cells into (left, right).
    ///
    /// Center puts the floor half on the left and the ceil half on the right.
    pub const fn split(&self, free: usize) -> (usize, usize) {
        match self {
            Self::Left => (0, free),
            Self::Right => (free, 0),
            Self::Center => (free / 2, free - free / 2),
        }
    }
}

/// Vertical placement of the visible line block inside the content height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    /// Number of blank rows above a block leaving `free` rows unused.
    pub const fn leading(&self, free: usize) -> usize {
        match self {
            Self::Top => 0,
            Self::Center => free / 2,
            Self::Bottom => free,
        }
    }
}

/// Which side column hosts the vertical scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    Left,
    #[default]
    Right,
}

// =============================================================================
// Border glyphs
// =============================================================================

/// The eight glyphs a bordered panel is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top: char,
    pub top_right: char,
    pub left: char,
    pub right: char,
    pub bottom_left: char,
    pub bottom: char,
    pub bottom_right: char,
}

impl BorderGlyphs {
    /// Build a set from a horizontal glyph, a vertical glyph and one corner glyph.
    pub const fn uniform(horizontal: char, vertical: char, corner: char) -> Self {
        Self {
            top_left: corner,
            top: horizontal,
            top_right: corner,
            left: vertical,
            right: vertical,
            bottom_left: corner,
            bottom: horizontal,
            bottom_right: corner,
        }
    }
}

impl Default for BorderGlyphs {
    /// `─` rules top and bottom, `|` sides.
    fn default() -> Self {
        Self::uniform('─', '|', '─')
    }
}

// =============================================================================
// Style
// =============================================================================

/// Per-widget style. Unset fields fall back to the widget kind's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
    pub label_color: Option<Color>,
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,

    // Scrollable panels
    pub scrollbar_color: Option<Color>,
    pub scrollbar_hovered_color: Option<Color>,
    pub scrollbar_disabled_color: Option<Color>,
    pub scroll_x_glyph: Option<char>,
    pub scroll_y_glyph: Option<char>,
}

impl Style {
    /// Overlay `other`'s set fields onto `self`.
    pub fn merged(self, other: &Style) -> Self {
        Self {
            color: other.color.or(self.color),
            background_color: other.background_color.or(self.background_color),
            border_color: other.border_color.or(self.border_color),
            label_color: other.label_color.or(self.label_color),
            text_align: other.text_align.or(self.text_align),
            vertical_align: other.vertical_align.or(self.vertical_align),
            scrollbar_color: other.scrollbar_color.or(self.scrollbar_color),
            scrollbar_hovered_color: other.scrollbar_hovered_color.or(self.scrollbar_hovered_color),
            scrollbar_disabled_color: other
                .scrollbar_disabled_color
                .or(self.scrollbar_disabled_color),
            scroll_x_glyph: other.scroll_x_glyph.or(self.scroll_x_glyph),
            scroll_y_glyph: other.scroll_y_glyph.or(self.scroll_y_glyph),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_rgb_int() {
        assert_eq!(Color::from_rgb_int(0x282a36), Color::rgb(40, 42, 54));
        assert_eq!(Color::from_rgb_int(0x000000), Color::BLACK);
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#abc"), Some(Color::rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("zzz"), None);
    }

    #[test]
    fn test_text_align_split() {
        assert_eq!(TextAlign::Left.split(5), (0, 5));
        assert_eq!(TextAlign::Right.split(5), (5, 0));
        assert_eq!(TextAlign::Center.split(5), (2, 3));
        assert_eq!(TextAlign::Center.split(0), (0, 0));
    }

    #[test]
    fn test_vertical_align_leading() {
        assert_eq!(VerticalAlign::Top.leading(4), 0);
        assert_eq!(VerticalAlign::Center.leading(3), 1);
        assert_eq!(VerticalAlign::Bottom.leading(4), 4);
    }

    #[test]
    fn test_size_at_least() {
        assert_eq!(Size::new(1, 0).at_least(2), Size::new(2, 2));
        assert_eq!(Size::new(6, 4).at_least(2), Size::new(6, 4));
    }

    #[test]
    fn test_style_merged_prefers_other() {
        let base = Style {
            color: Some(Color::WHITE),
            border_color: Some(Color::RED),
            ..Default::default()
        };
        let over = Style {
            color: Some(Color::GRAY),
            text_align: Some(TextAlign::Center),
            ..Default::default()
        };
        let merged = base.merged(&over);
        assert_eq!(merged.color, Some(Color::GRAY));
        assert_eq!(merged.border_color, Some(Color::RED));
        assert_eq!(merged.text_align, Some(TextAlign::Center));
        assert_eq!(merged.vertical_align, None);
    }
}
