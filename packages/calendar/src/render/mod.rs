//! Drawing surfaces and the camera they share.

pub mod camera;
pub mod canvas;
pub mod headless;
pub mod surface;

pub use camera::{Camera, Environment, Viewport};
pub use canvas::CanvasSurface;
pub use headless::HeadlessSurface;
pub use surface::{Frame, RenderSurface};
