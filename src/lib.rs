//! CubeStream library - rotating wireframe cube, particle field and a
//! procedurally synthesized melody loop

pub mod audio;
pub mod cli;
pub mod color;
pub mod context;
pub mod cube;
pub mod params;
pub mod particles;
pub mod projection;
pub mod rendering;
pub mod scene;
pub mod timing;
