//! Button - panel with interaction-state styling
//!
//! Sized to fit its content plus padding and centred on both axes by default.
//! Repainted with one of four fixed palettes as the pointer enters, leaves,
//! presses and releases it.

use std::any::Any;

use super::panel::{Palette, Panel, PanelOptions};
use super::{EventContext, Widget, WidgetCore, WidgetKind, WidgetState};
use crate::error::Result;
use crate::renderer::RenderRows;
use crate::state::MouseEvent;
use crate::types::{Color, Size, TextAlign, VerticalAlign};

pub const DEFAULT_BUTTON_PADDING_X: u16 = 3;
pub const DEFAULT_BUTTON_PADDING_Y: u16 = 2;

pub const DEFAULT_BUTTON_COLOR: Color = Color::rgb(220, 220, 220);
pub const DEFAULT_BUTTON_BORDER_COLOR: Color = Color::rgb(100, 100, 254);
pub const DEFAULT_BUTTON_BACKGROUND_COLOR: Color = Color::rgb(50, 50, 50);

/// Colour triple for one interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPalette {
    pub color: Color,
    pub border: Color,
    pub background: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyles {
    pub default: ButtonPalette,
    pub hovered: ButtonPalette,
    pub clicked: ButtonPalette,
    pub disabled: ButtonPalette,
}

impl Default for ButtonStyles {
    fn default() -> Self {
        Self {
            default: ButtonPalette {
                color: DEFAULT_BUTTON_COLOR,
                border: DEFAULT_BUTTON_BORDER_COLOR,
                background: DEFAULT_BUTTON_BACKGROUND_COLOR,
            },
            hovered: ButtonPalette {
                color: Color::rgb(254, 254, 254),
                border: Color::rgb(200, 200, 254),
                background: Color::rgb(100, 100, 100),
            },
            clicked: ButtonPalette {
                color: Color::rgb(254, 254, 254),
                border: Color::rgb(0, 200, 254),
                background: Color::rgb(50, 50, 50),
            },
            disabled: ButtonPalette {
                color: Color::rgb(120, 120, 120),
                border: Color::rgb(100, 100, 100),
                background: Color::rgb(10, 10, 10),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Default,
    Hovered,
    Clicked,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonOptions {
    pub panel: PanelOptions,
    pub padding_x: u16,
    pub padding_y: u16,
    pub disabled: bool,
    pub styles: ButtonStyles,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            panel: PanelOptions::default(),
            padding_x: DEFAULT_BUTTON_PADDING_X,
            padding_y: DEFAULT_BUTTON_PADDING_Y,
            disabled: false,
            styles: ButtonStyles::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    panel: Panel,
    styles: ButtonStyles,
    visual: ButtonState,
}

impl Button {
    pub fn new(options: ButtonOptions) -> Self {
        let ButtonOptions {
            mut panel,
            padding_x,
            padding_y,
            disabled,
            mut styles,
        } = options;

        let longest = panel.content.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
        let lines = panel.content.split('\n').count();
        let fit_w = u16::try_from(longest)
            .unwrap_or(u16::MAX)
            .saturating_add(padding_x.saturating_mul(2));
        let fit_h = u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .saturating_add(padding_y.saturating_mul(2));
        panel.size = Size::new(panel.size.width.max(fit_w), panel.size.height.max(fit_h));

        // Explicit style colours replace the resting palette
        let style = &mut panel.style;
        styles.default = ButtonPalette {
            color: style.color.unwrap_or(styles.default.color),
            border: style.border_color.unwrap_or(styles.default.border),
            background: style.background_color.unwrap_or(styles.default.background),
        };
        style.text_align = style.text_align.or(Some(TextAlign::Center));
        style.vertical_align = style.vertical_align.or(Some(VerticalAlign::Center));

        let mut panel = Panel::new(panel);
        if disabled {
            panel.core_mut().state.insert(WidgetState::DISABLED);
        }

        Self {
            panel,
            styles,
            visual: if disabled { ButtonState::Disabled } else { ButtonState::Default },
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }

    pub fn styles(&self) -> &ButtonStyles {
        &self.styles
    }

    /// The palette currently shown.
    pub fn state(&self) -> ButtonState {
        self.visual
    }

    pub fn is_disabled(&self) -> bool {
        self.panel.core().is_disabled()
    }

    pub fn set_disabled(&mut self, disabled: bool, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.is_disabled() == disabled {
            return Ok(());
        }
        self.panel.core_mut().state.set(WidgetState::DISABLED, disabled);

        let core = self.panel.core();
        let next = if core.is_clicked() {
            ButtonState::Clicked
        } else if core.is_hovered() {
            self.hover_state()
        } else {
            self.rest_state()
        };
        self.visual = next;
        self.paint(ctx.surface)
    }

    fn rest_state(&self) -> ButtonState {
        if self.is_disabled() { ButtonState::Disabled } else { ButtonState::Default }
    }

    fn hover_state(&self) -> ButtonState {
        if self.is_disabled() { ButtonState::Disabled } else { ButtonState::Hovered }
    }

    fn transition(&mut self, next: ButtonState, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.visual == next {
            return Ok(());
        }
        tracing::trace!(id = %ctx.id(), from = ?self.visual, to = ?next, "button state");
        self.visual = next;
        self.paint(ctx.surface)
    }

    pub fn palette(&self) -> Palette {
        let colors = match self.visual {
            ButtonState::Default => &self.styles.default,
            ButtonState::Hovered => &self.styles.hovered,
            ButtonState::Clicked => &self.styles.clicked,
            ButtonState::Disabled => &self.styles.disabled,
        };
        Palette {
            color: colors.color,
            background: colors.background,
            border: colors.border,
            label: self.panel.core().style.label_color.unwrap_or(colors.color),
        }
    }
}

impl Widget for Button {
    fn core(&self) -> &WidgetCore {
        self.panel.core()
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        self.panel.core_mut()
    }

    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn produce_rows(&self) -> RenderRows {
        Panel::rows_from_cells(self.panel.cell_rows(&self.palette()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_hover_start(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.core().is_clicked() {
            return Ok(());
        }
        self.transition(self.hover_state(), ctx)
    }

    fn on_hover_end(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        if self.core().is_clicked() {
            return Ok(());
        }
        self.transition(self.rest_state(), ctx)
    }

    fn on_click_start(&mut self, _event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        self.transition(ButtonState::Clicked, ctx)
    }

    fn on_click_end(&mut self, event: &MouseEvent, ctx: &mut EventContext<'_>) -> Result<()> {
        let next = if self.contains_point(event.position()) {
            self.hover_state()
        } else {
            self.rest_state()
        };
        self.transition(next, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{RowColor, RunColor};
    use crate::types::{Position, Style};
    use crate::widgets::Harness;

    fn button(content: &str) -> Button {
        Button::new(ButtonOptions {
            panel: PanelOptions {
                content: content.to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_auto_size() {
        let b = button("OK");
        assert_eq!(b.core().size, Size::new(2 + 6, 1 + 4));

        let b = Button::new(ButtonOptions {
            panel: PanelOptions {
                content: "OK".to_string(),
                size: Size::new(20, 3),
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(b.core().size, Size::new(20, 5));
    }

    #[test]
    fn test_oversized_content_saturates_size() {
        let b = button(&"x".repeat(70_000));
        assert_eq!(b.core().size, Size::new(u16::MAX, 5));
    }

    #[test]
    fn test_multiline_size_uses_longest_line() {
        let b = button("a\nlonger");
        assert_eq!(b.core().size, Size::new(6 + 6, 2 + 4));
    }

    #[test]
    fn test_content_centered() {
        let rows = button("OK").produce_rows();
        assert_eq!(rows.lines[1], "|      |");
        assert_eq!(rows.lines[2], "|  OK  |");
        assert_eq!(rows.lines[3], "|      |");
    }

    #[test]
    fn test_default_palette() {
        let rows = button("OK").produce_rows();
        assert_eq!(rows.colors[0], RowColor::Uniform(DEFAULT_BUTTON_BORDER_COLOR));
        assert_eq!(
            rows.colors[2].color_at(3),
            Some(RunColor::Plain(DEFAULT_BUTTON_COLOR))
        );
        assert_eq!(
            rows.colors[2].color_at(1),
            Some(RunColor::Plain(DEFAULT_BUTTON_BACKGROUND_COLOR))
        );
    }

    #[test]
    fn test_style_overrides_resting_palette() {
        let b = Button::new(ButtonOptions {
            panel: PanelOptions {
                content: "OK".to_string(),
                style: Style {
                    border_color: Some(Color::GREEN),
                    text_align: Some(TextAlign::Left),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        });
        assert_eq!(b.palette().border, Color::GREEN);
        assert_eq!(b.produce_rows().lines[2], "|OK    |");
    }

    #[test]
    fn test_hover_press_release_cycle() {
        let mut b = button("OK");
        let mut h = Harness::new();
        let inside = MouseEvent::motion(1, 1);

        b.core_mut().state.insert(WidgetState::HOVERED);
        b.on_hover_start(&inside, &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Hovered);

        b.core_mut().state.insert(WidgetState::CLICKED);
        b.on_click_start(&MouseEvent::left_down(1, 1), &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Clicked);

        // Leaving while pressed keeps the clicked look
        b.core_mut().state.remove(WidgetState::HOVERED);
        b.on_hover_end(&MouseEvent::motion(30, 30), &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Clicked);

        b.core_mut().state.remove(WidgetState::CLICKED);
        b.on_click_end(&MouseEvent::left_up(30, 30), &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Default);
    }

    #[test]
    fn test_release_inside_returns_to_hovered() {
        let mut b = button("OK");
        let mut h = Harness::new();
        b.on_click_start(&MouseEvent::left_down(2, 2), &mut h.ctx()).unwrap();
        b.on_click_end(&MouseEvent::left_up(2, 2), &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Hovered);
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let mut b = button("OK");
        let mut h = Harness::new();
        b.on_hover_start(&MouseEvent::motion(1, 1), &mut h.ctx()).unwrap();
        let written = h.surface.len();
        assert!(written > 0);
        b.on_hover_start(&MouseEvent::motion(1, 1), &mut h.ctx()).unwrap();
        assert_eq!(h.surface.len(), written);
    }

    #[test]
    fn test_disabled_suppresses_hover() {
        let mut b = Button::new(ButtonOptions {
            panel: PanelOptions {
                content: "OK".to_string(),
                position: Position::new(0, 0),
                ..Default::default()
            },
            disabled: true,
            ..Default::default()
        });
        let mut h = Harness::new();
        assert_eq!(b.state(), ButtonState::Disabled);

        b.on_hover_start(&MouseEvent::motion(1, 1), &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Disabled);
        assert_eq!(b.palette().background, b.styles().disabled.background);
    }

    #[test]
    fn test_set_disabled_toggles_and_repaints() {
        let mut b = button("OK");
        let mut h = Harness::new();

        b.set_disabled(true, &mut h.ctx()).unwrap();
        assert!(b.is_disabled());
        assert_eq!(b.state(), ButtonState::Disabled);
        assert!(!h.surface.is_empty());

        b.core_mut().state.insert(WidgetState::HOVERED);
        b.set_disabled(false, &mut h.ctx()).unwrap();
        assert_eq!(b.state(), ButtonState::Hovered);
    }
}
