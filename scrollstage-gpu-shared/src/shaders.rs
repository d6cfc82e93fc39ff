/// Embedded WGSL shader source strings for the WebGPU rendering pipeline.
pub const MODEL_SHADER: &str = include_str!("../shaders/model.wgsl");
