use std::cell::Cell;

use egui::{Color32, Rect, Vec2};
use log::{debug, info};

use crate::error::FigureResult;
use crate::event::{ConfigEvent, EventBus, EventHandler};
use crate::figure::FigureKind;
use crate::style::Style;

pub const DEFAULT_CANVAS_SIZE: Vec2 = Vec2::new(800.0, 600.0);

/// Tool and style state shared by the panels, the controller and the storage.
///
/// One instance lives for the whole session and is handed around as
/// `Rc<Configuration>`. Setters take `&self`; each publishes a
/// [`ConfigEvent`] only when the stored value actually changes.
#[derive(Debug)]
pub struct Configuration {
    active_tool: Cell<Option<FigureKind>>,
    style: Cell<Style>,
    canvas_size: Cell<Vec2>,
    events: EventBus<ConfigEvent>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self {
            active_tool: Cell::new(None),
            style: Cell::new(Style::default()),
            canvas_size: Cell::new(DEFAULT_CANVAS_SIZE),
            events: EventBus::new(),
        }
    }

    pub fn subscribe(&self, handler: impl EventHandler<ConfigEvent> + 'static) {
        self.events.subscribe(handler);
    }

    pub fn active_tool(&self) -> Option<FigureKind> {
        self.active_tool.get()
    }

    /// Copy of the default style for a new figure
    pub fn style(&self) -> Style {
        self.style.get()
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size.get()
    }

    /// Canvas area in canvas-local coordinates
    pub fn canvas_rect(&self) -> Rect {
        Rect::from_min_size(egui::Pos2::ZERO, self.canvas_size.get())
    }

    pub fn set_active_tool(&self, tool: Option<FigureKind>) {
        if self.active_tool.replace(tool) != tool {
            info!("Active tool: {:?}", tool);
            self.events.emit(ConfigEvent::ToolChanged(tool));
        }
    }

    /// Select a tool by its lowercase name
    pub fn set_active_tool_by_name(&self, name: &str) -> FigureResult<()> {
        let kind = name.parse::<FigureKind>()?;
        self.set_active_tool(Some(kind));
        Ok(())
    }

    pub fn set_pen_color(&self, color: Color32) {
        self.update_style(
            |style| std::mem::replace(&mut style.pen_color, color) != color,
            ConfigEvent::PenColorChanged(color),
        );
    }

    pub fn set_brush_color(&self, color: Color32) {
        self.update_style(
            |style| std::mem::replace(&mut style.brush_color, color) != color,
            ConfigEvent::BrushColorChanged(color),
        );
    }

    pub fn set_pen_width(&self, width: u32) {
        if width == 0 {
            debug!("Ignoring zero pen width");
            return;
        }
        self.update_style(
            |style| std::mem::replace(&mut style.pen_width, width) != width,
            ConfigEvent::PenWidthChanged(width),
        );
    }

    pub fn set_radius(&self, radius: u32) {
        if radius == 0 {
            debug!("Ignoring zero radius");
            return;
        }
        self.update_style(
            |style| std::mem::replace(&mut style.radius, radius) != radius,
            ConfigEvent::RadiusChanged(radius),
        );
    }

    /// Record the accepted canvas size. Non-finite or empty sizes are ignored.
    pub fn set_canvas_size(&self, size: Vec2) {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            debug!("Ignoring malformed canvas size {:?}", size);
            return;
        }
        if self.canvas_size.replace(size) != size {
            self.events.emit(ConfigEvent::CanvasSizeChanged(size));
        }
    }

    /// Re-emit every current value, for views created after the configuration
    pub fn broadcast(&self) {
        let style = self.style.get();
        self.events.emit(ConfigEvent::ToolChanged(self.active_tool.get()));
        self.events.emit(ConfigEvent::PenColorChanged(style.pen_color));
        self.events.emit(ConfigEvent::BrushColorChanged(style.brush_color));
        self.events.emit(ConfigEvent::PenWidthChanged(style.pen_width));
        self.events.emit(ConfigEvent::RadiusChanged(style.radius));
        self.events.emit(ConfigEvent::CanvasSizeChanged(self.canvas_size.get()));
    }

    fn update_style(&self, apply: impl FnOnce(&mut Style) -> bool, event: ConfigEvent) {
        let mut style = self.style.get();
        if apply(&mut style) {
            self.style.set(style);
            debug!("Configuration changed: {:?}", event);
            self.events.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(config: &Configuration) -> Rc<RefCell<Vec<ConfigEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        config.subscribe(move |event: &ConfigEvent| sink.borrow_mut().push(*event));
        events
    }

    #[test]
    fn test_setting_same_value_is_silent() {
        let config = Configuration::new();
        let events = recorded(&config);

        config.set_pen_width(5);
        config.set_pen_width(5);
        config.set_pen_color(Color32::BLACK);

        assert_eq!(*events.borrow(), vec![ConfigEvent::PenWidthChanged(5)]);
        assert_eq!(config.style().pen_width, 5);
    }

    #[test]
    fn test_malformed_values_are_rejected_silently() {
        let config = Configuration::new();
        let events = recorded(&config);

        config.set_pen_width(0);
        config.set_radius(0);
        config.set_canvas_size(Vec2::new(f32::NAN, 10.0));
        config.set_canvas_size(Vec2::new(-5.0, 10.0));

        assert!(events.borrow().is_empty());
        assert_eq!(config.canvas_size(), DEFAULT_CANVAS_SIZE);
        assert_eq!(config.style(), Style::default());
    }

    #[test]
    fn test_unknown_tool_name_keeps_tool() {
        let config = Configuration::new();
        config.set_active_tool_by_name("circle").unwrap();
        assert!(config.set_active_tool_by_name("blob").is_err());
        assert_eq!(config.active_tool(), Some(FigureKind::Circle));
    }

    #[test]
    fn test_broadcast_emits_every_field() {
        let config = Configuration::new();
        config.set_active_tool(Some(FigureKind::Line));
        let events = recorded(&config);

        config.broadcast();

        let events = events.borrow();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], ConfigEvent::ToolChanged(Some(FigureKind::Line)));
        assert_eq!(events[5], ConfigEvent::CanvasSizeChanged(DEFAULT_CANVAS_SIZE));
    }

    #[test]
    fn test_style_is_a_copy() {
        let config = Configuration::new();
        let mut style = config.style();
        style.pen_width = 40;
        assert_eq!(config.style().pen_width, Style::default().pen_width);
    }
}
