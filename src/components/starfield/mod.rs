//! Canvas starfield of photons: time on the x axis, company bands on the y axis.

mod animation;
mod backdrop;
mod camera;
mod component;
mod config;
mod error;
mod filter;
mod hit;
mod overlap;
mod palette;
mod project;
mod render;
mod state;
mod surface;
mod types;

pub use animation::{AnimationLoop, FrameClock, LoopState};
pub use camera::{Camera, Gesture, GestureEnd};
pub use component::StarfieldCanvas;
pub use config::{CameraConfig, LayoutConfig, StarfieldConfig, VisualConfig};
pub use error::SurfaceError;
pub use filter::filter;
pub use hit::find_hovered;
pub use overlap::resolve;
pub use palette::{DEFAULT_COLOR, Palette, Rgb};
pub use project::{Projector, groups_of};
pub use render::{FrameStats, render, tick_years, truncate};
pub use state::StarfieldState;
pub use surface::{Align, Surface, container_size, fit_backing_store};
pub use types::{ContentEntity, DEFAULT_GROUP, Filters, Point, RenderEntity, TimeRange, Viewport};
