#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bounded;
pub mod components;
pub mod controller;
pub mod error;
pub mod event;
pub mod figure;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod style;

pub use app::FigureApp;
pub use bounded::BoundedTriple;
pub use controller::CanvasController;
pub use error::{FigureError, FigureResult};
pub use figure::{Figure, FigureKind, FigureType};
pub use id_generator::FigureId;
pub use input::InputEvent;
pub use renderer::{Renderer, Surface};
pub use state::{Configuration, Storage};
pub use style::Style;
