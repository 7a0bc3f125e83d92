//! Renderer - turns widget rows into terminal bytes
//!
//! - [`Surface`] - buffered output, shared colour cache, cursor ops
//! - [`RenderRows`] - the declarative row/colour data widgets produce
//! - [`paint_rows`] - the walk from rows to cursor moves and colour changes
//! - [`ansi`] - the escape sequences the surface writes

pub mod ansi;
mod rows;
mod surface;

pub use rows::{paint_rows, CellRow, ColorRun, RenderRows, RowColor, RunColor};
pub use surface::Surface;
