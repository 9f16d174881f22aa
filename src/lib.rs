#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod params;
pub mod point;
pub mod renderer;
pub mod session;
pub mod surface;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use controls::{ControlEvent, ControlId, ControlSet};
pub use error::{SketchError, SketchResult};
pub use input::{GestureState, PointerEvent};
pub use params::DrawingParams;
pub use point::{Point, PointStore};
pub use renderer::Renderer;
pub use session::DrawingSession;
pub use surface::RasterSurface;
