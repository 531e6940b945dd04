mod bounded_window;
mod central_panel;
mod tools_panel;

pub use bounded_window::bounded_window;
pub use central_panel::central_panel;
pub use tools_panel::tools_panel;
