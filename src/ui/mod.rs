pub mod controls;
pub mod legend;
pub mod popup;

pub use controls::{AttributionControl, Control, ControlKind, ControlManager, ControlPosition, LayersControl};
pub use legend::{Legend, LegendRow};
pub use popup::Popup;
