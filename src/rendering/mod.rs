pub mod context;
pub mod html;
pub mod surface;

pub use context::{ControlPanel, DrawCommand, LayerPass, LayerToggle, RenderContext};
pub use html::HtmlSurface;
pub use surface::{MemorySurface, Scene, Surface};
