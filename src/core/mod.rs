pub mod ambient;
pub mod bodies;
pub mod camera;
pub mod constants;
pub mod controls;
pub mod melody;
pub mod mesh;
pub mod orbit;
pub mod texture;

pub use ambient::*;
pub use bodies::*;
pub use camera::*;
pub use constants::*;
pub use controls::*;
pub use melody::*;
pub use mesh::*;
pub use orbit::*;
pub use texture::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static SKY_WGSL: &str = include_str!("../../shaders/sky.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
