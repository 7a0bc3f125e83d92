//! End-to-end scenarios driving a headless compositor.
//!
//! Run with: cargo test --test scenarios

use std::time::{Duration, Instant};

use std::any::Any;

use spark_widgets::{
    keys, Button, ButtonOptions, ButtonState, Color, ColorRun, Compositor, KeyEvent, Log,
    MouseEvent, Notification, Panel, PanelOptions, Position, ReadEnd, RenderRows, RowColor,
    ScrollOptions, ScrollablePanel, Size, Style, Surface, TerminalMode, TextArea,
    TextAreaOptions, Widget, WidgetCore, WidgetEvent, WidgetKind,
};

// =============================================================================
// HELPERS
// =============================================================================

fn panel(x: u16, y: u16, w: u16, h: u16, content: &str) -> Panel {
    Panel::new(PanelOptions {
        position: Position::new(x, y),
        size: Size::new(w, h),
        content: content.to_string(),
        ..Default::default()
    })
}

fn numbered(lines: usize) -> String {
    (0..lines).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
}

// =============================================================================
// RENDERING
// =============================================================================

#[test]
fn test_panel_rows() {
    let rows = panel(0, 0, 6, 4, "ab").produce_rows();
    assert_eq!(rows.lines, vec!["──────", "|ab  |", "|    |", "──────"]);
    assert_eq!(rows.lines.len(), rows.colors.len());
}

#[test]
fn test_set_color_written_once() {
    let mut surface = Surface::new();
    let red = spark_widgets::Color::rgb(254, 0, 0);
    assert!(surface.set_color(red));
    let after_first = surface.len();
    assert!(!surface.set_color(red));
    assert_eq!(surface.len(), after_first);
    assert_eq!(surface.color_writes(), 1);
}

/// Two-row swatch whose second column blends into the first.
struct Swatch {
    core: WidgetCore,
}

const BLUE: Color = Color::rgb(0, 0, 254);
const YELLOW: Color = Color::rgb(254, 254, 0);

impl Widget for Swatch {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Panel
    }

    fn produce_rows(&self) -> RenderRows {
        let mut rows = RenderRows::new();
        for line in ["ab", "cd"] {
            rows.push(
                line,
                RowColor::Runs(vec![ColorRun::new(1, BLUE), ColorRun::inherit(1, YELLOW)]),
            );
        }
        rows
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_custom_widget_inherit_runs() {
    let mut ui = Compositor::headless();
    ui.add_widget(Swatch {
        core: WidgetCore::new(Position::new(0, 0), Size::new(2, 2), Style::default()),
    });
    ui.paint(false).unwrap();

    // 'b' stays blue, 'd' on the last row takes yellow
    assert_eq!(ui.surface().color_writes(), 2);
    assert_eq!(ui.surface().last_color(), Some(YELLOW));
}

#[test]
fn test_paint_dedups_across_widgets() {
    let mut single = Compositor::headless();
    single.add_widget(panel(0, 0, 4, 3, ""));
    single.paint(false).unwrap();
    // border, background, border
    assert_eq!(single.surface().color_writes(), 3);

    let mut ui = Compositor::headless();
    ui.add_widget(panel(0, 0, 4, 3, ""));
    ui.add_widget(panel(10, 0, 4, 3, ""));
    ui.paint(false).unwrap();
    // The second panel starts on the border colour the first one ended with
    assert_eq!(ui.surface().color_writes(), 5);
}

// =============================================================================
// ROUTING
// =============================================================================

#[test]
fn test_topmost_widget_takes_the_click() {
    let mut ui = Compositor::headless();
    let a = ui.add_widget(panel(0, 0, 6, 6, ""));
    let b = ui.add_widget(panel(2, 2, 6, 6, ""));

    ui.dispatch(MouseEvent::left_down(3, 3)).unwrap();

    assert_eq!(ui.focused(), Some(b));
    assert!(ui.get(b).unwrap().core().is_focused());
    assert!(!ui.get(a).unwrap().core().is_focused());
}

#[test]
fn test_focus_twice_is_one_transition() {
    let mut ui = Compositor::headless();
    let a = ui.add_widget(panel(0, 0, 4, 4, ""));

    ui.focus(a).unwrap();
    let painted = ui.surface().len();
    ui.focus(a).unwrap();

    assert_eq!(ui.surface().len(), painted);
    let focus_events = ui
        .drain_notifications()
        .into_iter()
        .filter(|n| matches!(n, Notification::Widget { event: WidgetEvent::Focus, .. }))
        .count();
    assert_eq!(focus_events, 1);
}

// =============================================================================
// SCROLLING
// =============================================================================

#[test]
fn test_wheel_down_stops_at_max_scroll() {
    let mut ui = Compositor::headless();
    // 10 content rows
    let id = ui.add_widget(ScrollablePanel::new(
        PanelOptions {
            size: Size::new(20, 12),
            content: numbered(100),
            ..Default::default()
        },
        ScrollOptions::default(),
    ));

    assert_eq!(ui.widget::<ScrollablePanel>(id).unwrap().vertical_thumb().max_scroll, 90);
    for _ in 0..95 {
        ui.dispatch(MouseEvent::wheel_down(5, 5)).unwrap();
    }
    assert_eq!(ui.widget::<ScrollablePanel>(id).unwrap().scroll().y, 90);
}

#[test]
fn test_track_press_repeats_until_release() {
    let mut ui = Compositor::headless();
    let id = ui.add_widget(ScrollablePanel::new(
        PanelOptions {
            size: Size::new(20, 12),
            content: numbered(100),
            ..Default::default()
        },
        ScrollOptions::default(),
    ));

    // Right edge, below the thumb
    ui.dispatch(MouseEvent::left_down(19, 8)).unwrap();
    assert!(ui.next_deadline().is_some());

    let start = Instant::now();
    for step in 1..=3 {
        ui.tick(start + Duration::from_millis(60 * step)).unwrap();
    }
    assert_eq!(ui.widget::<ScrollablePanel>(id).unwrap().scroll().y, 3);

    ui.dispatch(MouseEvent::left_up(19, 8)).unwrap();
    assert!(ui.next_deadline().is_none());
    assert_eq!(ui.tick(start + Duration::from_secs(10)).unwrap(), 0);
    assert_eq!(ui.widget::<ScrollablePanel>(id).unwrap().scroll().y, 3);
}

#[test]
fn test_removing_widget_cancels_its_timers() {
    let mut ui = Compositor::headless();
    let id = ui.add_widget(ScrollablePanel::new(
        PanelOptions {
            size: Size::new(20, 12),
            content: numbered(100),
            ..Default::default()
        },
        ScrollOptions::default(),
    ));
    ui.dispatch(MouseEvent::left_down(19, 8)).unwrap();
    ui.remove_widget(id).unwrap();
    assert!(ui.next_deadline().is_none());
    ui.dispatch(MouseEvent::left_up(19, 8)).unwrap();
}

#[test]
fn test_log_pins_to_bottom() {
    let mut ui = Compositor::headless();
    // 3 content rows
    let id = ui.add_widget(Log::new(
        PanelOptions {
            size: Size::new(20, 5),
            ..Default::default()
        },
        ScrollOptions::default(),
    ));

    for i in 0..5 {
        ui.with_widget::<Log, _>(id, |log, ctx| log.append(&format!("entry {i}"), ctx))
            .unwrap();
    }

    let log = ui.widget::<Log>(id).unwrap();
    let total = log.scrollable().panel().total_lines();
    assert_eq!(log.scrollable().scroll().y, total - 3);
}

// =============================================================================
// TEXT AREA
// =============================================================================

#[test]
fn test_text_area_read_through_dispatch() {
    let mut ui = Compositor::headless();
    let id = ui.add_widget(TextArea::new(TextAreaOptions {
        panel: PanelOptions {
            size: Size::new(20, 5),
            ..Default::default()
        },
        termination_keys: vec![keys::ESCAPE.to_string()],
    }));

    let handle = ui
        .with_widget::<TextArea, _>(id, |ta, ctx| ta.start_read(ctx))
        .unwrap();
    assert_eq!(ui.focused(), Some(id));
    assert!(ui.terminal().is_raw().unwrap());

    ui.dispatch(KeyEvent::char('h')).unwrap();
    ui.dispatch(KeyEvent::char('i')).unwrap();
    ui.dispatch(KeyEvent::named(keys::ENTER).with_aliases([keys::RETURN])).unwrap();
    ui.dispatch(KeyEvent::named(keys::ESCAPE)).unwrap();

    let outcome = handle.outcome().unwrap();
    assert_eq!(outcome.text, "hi\n");
    assert_eq!(outcome.end, ReadEnd::Terminated(keys::ESCAPE.to_string()));
    assert_eq!(ui.widget::<TextArea>(id).unwrap().content(), "hi\n");

    // Termination releases focus and raw mode
    assert_eq!(ui.focused(), None);
    assert!(!ui.terminal().is_raw().unwrap());
}

#[test]
fn test_clicking_elsewhere_cancels_read() {
    let mut ui = Compositor::headless();
    let ta = ui.add_widget(TextArea::new(TextAreaOptions {
        panel: PanelOptions {
            size: Size::new(20, 5),
            ..Default::default()
        },
        ..Default::default()
    }));
    let other = ui.add_widget(panel(30, 0, 5, 5, ""));

    ui.dispatch(MouseEvent::left_down(1, 1)).unwrap();
    ui.dispatch(MouseEvent::left_up(1, 1)).unwrap();
    let handle = ui.widget::<TextArea>(ta).unwrap().read_handle().unwrap();

    ui.dispatch(KeyEvent::char('x')).unwrap();
    ui.dispatch(MouseEvent::left_down(31, 1)).unwrap();

    assert_eq!(ui.focused(), Some(other));
    assert_eq!(handle.text().as_deref(), Some("x"));
    assert_eq!(handle.outcome().unwrap().end, ReadEnd::Cancelled);
}

// =============================================================================
// BUTTON
// =============================================================================

#[test]
fn test_button_states_follow_pointer() {
    let mut ui = Compositor::headless();
    let id = ui.add_widget(Button::new(ButtonOptions {
        panel: PanelOptions {
            content: "OK".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }));
    let state = |ui: &Compositor| ui.widget::<Button>(id).unwrap().state();

    ui.dispatch(MouseEvent::motion(1, 1)).unwrap();
    assert_eq!(state(&ui), ButtonState::Hovered);

    ui.dispatch(MouseEvent::left_down(1, 1)).unwrap();
    assert_eq!(state(&ui), ButtonState::Clicked);
    assert_eq!(ui.focused(), Some(id));

    ui.dispatch(MouseEvent::left_up(1, 1)).unwrap();
    assert_eq!(state(&ui), ButtonState::Hovered);

    ui.dispatch(MouseEvent::motion(40, 40)).unwrap();
    assert_eq!(state(&ui), ButtonState::Default);
}
