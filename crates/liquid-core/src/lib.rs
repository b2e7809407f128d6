pub mod bubbles;
pub mod color;
pub mod config;
pub mod constants;
pub mod dynamics;
pub mod engine;
pub mod events;
pub mod headless;
pub mod noise;
pub mod render;
pub mod state;
pub mod surface;
pub mod waves;

pub use bubbles::*;
pub use config::*;
pub use engine::*;
pub use events::*;
pub use noise::*;
pub use state::*;
pub use surface::*;
