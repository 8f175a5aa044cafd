/// Sponge generation, scene state and per-frame draw-call emission.

pub mod error;
pub mod renderer;
pub mod scene;
pub mod sponge;
pub mod types;
