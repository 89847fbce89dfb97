pub mod audio;
pub mod camera;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod loader;
pub mod model;
pub mod placeholder;
pub mod scene;
pub mod script;
pub mod session;
pub mod timeline;
pub mod tween;
pub mod view;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use audio::*;
pub use camera::*;
pub use error::LoadError;
pub use geometry::*;
pub use interaction::*;
pub use loader::*;
pub use model::*;
pub use placeholder::build_placeholder;
pub use scene::*;
pub use session::*;
pub use timeline::*;
pub use tween::*;
pub use view::*;
