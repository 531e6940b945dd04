use std::cell::RefCell;
use std::rc::Rc;

use egui::{Rect, ViewportCommand};
use log::{info, warn};

use crate::bounded::{BoundedTriple, Drafts, Triple};
use crate::controller::CanvasController;
use crate::error::FigureError;
use crate::event::StorageEvent;
use crate::input::InputHandler;
use crate::panels::{bounded_window, central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{ConfigSnapshot, Configuration, Storage};

const TRIPLE_KEY: &str = "bounded_triple";

/// The drawing application: one configuration, one canvas
pub struct FigureApp {
    config: Rc<Configuration>,
    storage: Rc<RefCell<Storage>>,
    controller: CanvasController,
    renderer: Renderer,
    input: InputHandler,
    notice: Rc<RefCell<Option<String>>>,
    triple: BoundedTriple,
    drafts: Drafts,
    show_triple: bool,
}

impl FigureApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::with_config(Configuration::new());

        if let Some(storage) = cc.storage {
            if let Some(snapshot) = eframe::get_value::<ConfigSnapshot>(storage, eframe::APP_KEY) {
                info!("Restoring configuration");
                app.config.apply_snapshot(&snapshot);
            }
            if let Some(Triple { a, b, c }) = eframe::get_value::<Triple>(storage, TRIPLE_KEY) {
                app.triple = BoundedTriple::new(a, b, c);
            }
        }

        let ctx = cc.egui_ctx.clone();
        app.storage.borrow().subscribe(move |event: &StorageEvent| {
            if *event == StorageEvent::Changed {
                ctx.request_repaint();
            }
        });
        app.config.broadcast();
        app
    }

    /// Build the app state around a configuration, without any window
    pub fn with_config(config: Configuration) -> Self {
        let config = Rc::new(config);
        let storage = Storage::new(Rc::clone(&config));

        let notice = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&notice);
        storage.borrow().subscribe(move |event: &StorageEvent| {
            if let StorageEvent::Notice(text) = event {
                *sink.borrow_mut() = Some(text.clone());
            }
        });

        Self {
            controller: CanvasController::new(Rc::clone(&config), Rc::clone(&storage)),
            config,
            storage,
            renderer: Renderer::new(),
            input: InputHandler::new(Rect::NOTHING),
            notice,
            triple: BoundedTriple::default(),
            drafts: Drafts::default(),
            show_triple: false,
        }
    }

    pub fn config(&self) -> &Rc<Configuration> {
        &self.config
    }

    pub fn storage(&self) -> &Rc<RefCell<Storage>> {
        &self.storage
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The bounded triple together with the text being typed into it
    pub fn triple_mut(&mut self) -> (&mut BoundedTriple, &mut Drafts) {
        (&mut self.triple, &mut self.drafts)
    }

    pub fn show_triple_mut(&mut self) -> &mut bool {
        &mut self.show_triple
    }

    pub fn notice(&self) -> Option<String> {
        self.notice.borrow().clone()
    }

    pub fn set_notice(&self, text: impl Into<String>) {
        *self.notice.borrow_mut() = Some(text.into());
    }

    pub fn clear_notice(&self) {
        self.notice.borrow_mut().take();
    }

    /// Feed this frame's input on `canvas_area` to the controller
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_area: Rect) {
        self.input.set_canvas_rect(canvas_area);
        for event in self.input.process_input(ctx) {
            match self.controller.handle_event(&event) {
                Ok(()) => {}
                Err(FigureError::ResizeRejected { requested, kept }) => {
                    warn!("Reverting canvas from {:?} to {:?}", requested, kept);
                    if let Some(inner) = ctx.input(|i| i.viewport().inner_rect) {
                        ctx.send_viewport_cmd(ViewportCommand::InnerSize(
                            inner.size() + (kept - requested),
                        ));
                    }
                    self.set_notice("A figure would fall outside the canvas; size kept");
                }
                Err(err) => self.set_notice(err.to_string()),
            }
        }
    }
}

impl eframe::App for FigureApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config.snapshot());
        eframe::set_value(storage, TRIPLE_KEY, &self.triple.values());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
        bounded_window(self, ctx);
    }
}
