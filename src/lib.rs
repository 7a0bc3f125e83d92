//! # spark-widgets
//!
//! Retained-mode widget toolkit for terminal canvases.
//!
//! ## Architecture
//!
//! A [`Compositor`] owns a flat, ordered list of widgets. Later widgets sit on
//! top of earlier ones and win hit-testing. Each widget describes itself as
//! rows of text plus colour annotations, and the paint walk turns those rows
//! into cursor moves and colour changes on a [`Surface`], skipping colour
//! sequences the terminal already has.
//!
//! ```text
//! crossterm Event → input::translate → Compositor::dispatch → widget hooks
//!                                                          → produce_rows → paint_rows → Surface → stdout
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colours, geometry, alignment, border glyphs, style
//! - [`renderer`] - Surface, escape writers, row data and the paint walk
//! - [`state`] - Key/mouse events and scroll arithmetic
//! - [`widgets`] - The widget trait and the built-in kinds
//! - [`compositor`] - Registry, input routing, focus, timers, event loop
//! - [`terminal`] - Raw-mode control
//! - [`input`] - crossterm event translation
//!
//! ## Example
//!
//! ```no_run
//! use spark_widgets::{Compositor, CompositorConfig, Log, PanelOptions, Position, ScrollOptions, Size};
//!
//! let mut ui = Compositor::new(CompositorConfig::default());
//! let log = ui.add_widget(Log::new(
//!     PanelOptions {
//!         position: Position::new(0, 0),
//!         size: Size::new(40, 10),
//!         label: "events".into(),
//!         ..Default::default()
//!     },
//!     ScrollOptions::default(),
//! ));
//! ui.with_widget::<Log, _>(log, |log, ctx| log.append("ready", ctx))?;
//! ui.run()?;
//! # Ok::<(), spark_widgets::Error>(())
//! ```

pub mod compositor;
pub mod error;
pub mod input;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod types;
pub mod widgets;

pub use types::*;

pub use error::{Error, Result};

pub use renderer::{paint_rows, CellRow, ColorRun, RenderRows, RowColor, RunColor, Surface};

pub use state::{keys, InputEvent, KeyEvent, Modifiers, MouseEvent, MouseKind, ScrollOffset, Thumb};

pub use widgets::{
    Button, ButtonOptions, ButtonState, EventContext, Log, Notification, Panel, PanelOptions,
    ReadEnd, ReadHandle, ReadOutcome, ScrollOptions, ScrollablePanel, TextArea,
    TextAreaOptions, Widget, WidgetCore, WidgetEvent, WidgetId, WidgetKind, WidgetState,
};

pub use compositor::{Compositor, CompositorConfig, Flow, TimerAction, TimerId};

pub use terminal::{CrosstermTerminal, HeadlessTerminal, TerminalMode};
