pub mod renderer;
pub mod theme;

pub use renderer::{RenderContext, Renderer, Screen};
pub use theme::Palette;
