//! Shared GPU types, math, and shaders for the scrollstage viewport.
//!
//! Everything in this crate is platform-independent so the web runtime's
//! math (centering, camera, scroll timeline) can be tested natively.

pub mod camera;
pub mod math;
pub mod shaders;
pub mod timeline;
pub mod uniforms;
