//! Declarative row data and the paint walk that turns it into surface calls.
//!
//! A widget describes itself as [`RenderRows`]: one string per screen row plus a
//! colour annotation per row. Rows are either a single colour or a list of
//! `(len, colour)` runs that must cover the row exactly.

use super::surface::Surface;
use crate::error::{Error, Result};
use crate::types::{Color, Position};

// =============================================================================
// Colour annotations
// =============================================================================

/// Colour of one run.
///
/// `Inherit` keeps whatever colour the surface currently has, except on the
/// last row of the widget where the carried colour is applied. The built-in
/// kinds only emit `Plain`; `Inherit` is for custom widgets that want a cell
/// to blend into the colour of the cell before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunColor {
    Plain(Color),
    Inherit(Color),
}

impl RunColor {
    pub const fn color(&self) -> Color {
        match self {
            Self::Plain(c) | Self::Inherit(c) => *c,
        }
    }
}

impl From<Color> for RunColor {
    fn from(color: Color) -> Self {
        Self::Plain(color)
    }
}

/// A contiguous span of `len` same-coloured cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRun {
    pub len: usize,
    pub color: RunColor,
}

impl ColorRun {
    pub const fn new(len: usize, color: Color) -> Self {
        Self { len, color: RunColor::Plain(color) }
    }

    pub const fn inherit(len: usize, color: Color) -> Self {
        Self { len, color: RunColor::Inherit(color) }
    }
}

/// Colour annotation for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowColor {
    Uniform(Color),
    Runs(Vec<ColorRun>),
}

impl RowColor {
    /// Colour of the cell at `col`, if the annotation covers it.
    pub fn color_at(&self, col: usize) -> Option<RunColor> {
        match self {
            Self::Uniform(c) => Some(RunColor::Plain(*c)),
            Self::Runs(runs) => {
                let mut start = 0;
                for run in runs {
                    if col < start + run.len {
                        return Some(run.color);
                    }
                    start += run.len;
                }
                None
            }
        }
    }
}

// =============================================================================
// RenderRows
// =============================================================================

/// Output of a widget's `produce_rows`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRows {
    pub lines: Vec<String>,
    pub colors: Vec<RowColor>,
}

impl RenderRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            lines: Vec::with_capacity(rows),
            colors: Vec::with_capacity(rows),
        }
    }

    pub fn push(&mut self, line: impl Into<String>, color: RowColor) {
        self.lines.push(line.into());
        self.colors.push(color);
    }

    pub fn push_cells(&mut self, row: CellRow) {
        let (line, color) = row.finish();
        self.push(line, color);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check the row/colour contract without touching any output.
    pub fn validate(&self) -> Result<()> {
        if self.lines.len() != self.colors.len() {
            return Err(Error::RowCountMismatch {
                rows: self.lines.len(),
                colors: self.colors.len(),
            });
        }
        for (row, (line, color)) in self.lines.iter().zip(&self.colors).enumerate() {
            if let RowColor::Runs(runs) = color {
                let expected = line.chars().count();
                let actual: usize = runs.iter().map(|r| r.len).sum();
                if expected != actual {
                    return Err(Error::ContractViolation { row, expected, actual });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// CellRow builder
// =============================================================================

/// Per-cell row builder that compresses into the smallest annotation.
#[derive(Debug, Clone, Default)]
pub struct CellRow {
    cells: Vec<(char, RunColor)>,
}

impl CellRow {
    pub fn with_capacity(width: usize) -> Self {
        Self { cells: Vec::with_capacity(width) }
    }

    pub fn push(&mut self, ch: char, color: impl Into<RunColor>) {
        self.cells.push((ch, color.into()));
    }

    pub fn push_str(&mut self, text: &str, color: Color) {
        self.cells.extend(text.chars().map(|c| (c, RunColor::Plain(color))));
    }

    pub fn push_repeat(&mut self, ch: char, count: usize, color: Color) {
        self.cells.extend(std::iter::repeat_n((ch, RunColor::Plain(color)), count));
    }

    /// Overwrite one cell. Out-of-range columns are ignored.
    pub fn set(&mut self, col: usize, ch: char, color: impl Into<RunColor>) {
        if let Some(cell) = self.cells.get_mut(col) {
            *cell = (ch, color.into());
        }
    }

    pub fn get(&self, col: usize) -> Option<(char, RunColor)> {
        self.cells.get(col).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Collapse into text plus a uniform colour or merged runs.
    pub fn finish(self) -> (String, RowColor) {
        let line: String = self.cells.iter().map(|(c, _)| *c).collect();

        let mut runs: Vec<ColorRun> = Vec::new();
        for (_, color) in &self.cells {
            match runs.last_mut() {
                Some(run) if run.color == *color => run.len += 1,
                _ => runs.push(ColorRun { len: 1, color: *color }),
            }
        }

        let color = match runs.as_slice() {
            [ColorRun { color: RunColor::Plain(c), .. }] => RowColor::Uniform(*c),
            _ => RowColor::Runs(runs),
        };
        (line, color)
    }
}

// =============================================================================
// Paint
// =============================================================================

/// Paint `rows` with the top-left cell at `origin`.
///
/// The whole batch is validated first; a contract violation writes nothing.
/// Colour sequences are only emitted when the resolved colour differs from the
/// surface's cache. The cursor is saved before and restored after.
pub fn paint_rows(origin: Position, rows: &RenderRows, surface: &mut Surface) -> Result<()> {
    rows.validate()?;

    surface.save_cursor_position();

    let last_row = rows.len().saturating_sub(1);
    for (i, (line, color)) in rows.lines.iter().zip(&rows.colors).enumerate() {
        surface.move_cursor(Position::new(origin.x, origin.y.saturating_add(i as u16)));

        match color {
            RowColor::Uniform(c) => {
                surface.set_color(*c);
                surface.write(line);
            }
            RowColor::Runs(runs) => {
                let mut chars = line.chars();
                for run in runs {
                    let resolved = match run.color {
                        RunColor::Plain(c) => c,
                        RunColor::Inherit(c) if i == last_row => c,
                        RunColor::Inherit(c) => surface.last_color().unwrap_or(c),
                    };
                    surface.set_color(resolved);
                    let span: String = chars.by_ref().take(run.len).collect();
                    surface.write(&span);
                }
            }
        }
    }

    surface.restore_cursor_position();
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_row_compresses_uniform() {
        let mut row = CellRow::with_capacity(3);
        row.push_str("abc", Color::RED);
        let (line, color) = row.finish();
        assert_eq!(line, "abc");
        assert_eq!(color, RowColor::Uniform(Color::RED));
    }

    #[test]
    fn test_cell_row_merges_adjacent_runs() {
        let mut row = CellRow::default();
        row.push('|', Color::RED);
        row.push_str("ab", Color::WHITE);
        row.push_repeat(' ', 2, Color::BLACK);
        row.push('|', Color::RED);
        let (line, color) = row.finish();
        assert_eq!(line, "|ab  |");
        assert_eq!(
            color,
            RowColor::Runs(vec![
                ColorRun::new(1, Color::RED),
                ColorRun::new(2, Color::WHITE),
                ColorRun::new(2, Color::BLACK),
                ColorRun::new(1, Color::RED),
            ])
        );
    }

    #[test]
    fn test_cell_row_set_ignores_out_of_range() {
        let mut row = CellRow::default();
        row.push_str("ab", Color::RED);
        row.set(1, 'x', Color::GRAY);
        row.set(9, 'y', Color::GRAY);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some(('x', RunColor::Plain(Color::GRAY))));
    }

    #[test]
    fn test_color_at() {
        let color = RowColor::Runs(vec![ColorRun::new(1, Color::RED), ColorRun::new(2, Color::GRAY)]);
        assert_eq!(color.color_at(0), Some(RunColor::Plain(Color::RED)));
        assert_eq!(color.color_at(2), Some(RunColor::Plain(Color::GRAY)));
        assert_eq!(color.color_at(3), None);
    }

    #[test]
    fn test_validate_rejects_short_runs() {
        let mut rows = RenderRows::new();
        rows.push("abcd", RowColor::Runs(vec![ColorRun::new(3, Color::RED)]));
        match rows.validate() {
            Err(Error::ContractViolation { row, expected, actual }) => {
                assert_eq!((row, expected, actual), (0, 4, 3));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_count_mismatch() {
        let rows = RenderRows {
            lines: vec!["a".into(), "b".into()],
            colors: vec![RowColor::Uniform(Color::RED)],
        };
        assert!(matches!(rows.validate(), Err(Error::RowCountMismatch { rows: 2, colors: 1 })));
    }

    #[test]
    fn test_paint_violation_writes_nothing() {
        let mut rows = RenderRows::new();
        rows.push("ok", RowColor::Uniform(Color::RED));
        rows.push("bad", RowColor::Runs(vec![ColorRun::new(5, Color::RED)]));

        let mut surface = Surface::new();
        assert!(paint_rows(Position::new(0, 0), &rows, &mut surface).is_err());
        assert!(surface.is_empty());
    }

    #[test]
    fn test_paint_uniform_rows() {
        let mut rows = RenderRows::new();
        rows.push("ab", RowColor::Uniform(Color::ansi(1)));
        rows.push("cd", RowColor::Uniform(Color::ansi(1)));

        let mut surface = Surface::new();
        paint_rows(Position::new(2, 3), &rows, &mut surface).unwrap();
        assert_eq!(surface.output(), "\x1b7\x1b[4;3H\x1b[31mab\x1b[5;3Hcd\x1b8");
        assert_eq!(surface.color_writes(), 1);
    }

    #[test]
    fn test_paint_runs_dedups_against_cache() {
        let mut rows = RenderRows::new();
        rows.push(
            "|ab|",
            RowColor::Runs(vec![
                ColorRun::new(1, Color::ansi(1)),
                ColorRun::new(2, Color::ansi(2)),
                ColorRun::new(1, Color::ansi(1)),
            ]),
        );

        let mut surface = Surface::new();
        surface.set_color(Color::ansi(1));
        paint_rows(Position::new(0, 0), &rows, &mut surface).unwrap();
        assert_eq!(
            surface.output(),
            "\x1b[31m\x1b7\x1b[1;1H|\x1b[32mab\x1b[31m|\x1b8"
        );
    }

    #[test]
    fn test_paint_inherit_keeps_current_color_except_last_row() {
        let mut rows = RenderRows::new();
        rows.push(
            "ab",
            RowColor::Runs(vec![ColorRun::new(1, Color::ansi(1)), ColorRun::inherit(1, Color::ansi(3))]),
        );
        rows.push(
            "cd",
            RowColor::Runs(vec![ColorRun::new(1, Color::ansi(1)), ColorRun::inherit(1, Color::ansi(3))]),
        );

        let mut surface = Surface::new();
        paint_rows(Position::new(0, 0), &rows, &mut surface).unwrap();
        // First row: 'b' inherits red. Last row: 'd' applies yellow.
        assert_eq!(
            surface.output(),
            "\x1b7\x1b[1;1H\x1b[31mab\x1b[2;1Hc\x1b[33md\x1b8"
        );
    }
}
