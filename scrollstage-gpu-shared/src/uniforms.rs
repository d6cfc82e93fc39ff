use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Interleaved vertex layout shared by the asset loader and the render
/// pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Per-frame uniforms: camera plus the model-root transform
/// (rotation · normalization), updated every frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, camera_pos: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 1.0],
        }
    }
}

/// Fixed scene lighting. RGB in xyz, intensity in w; `direction` points from
/// the surface toward the light.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniforms {
    pub ambient: [f32; 4],
    pub direction: [f32; 4],
    pub color: [f32; 4],
}

impl Default for LightUniforms {
    fn default() -> Self {
        let dir = Vec3::new(2.0, 5.0, 5.0).normalize();
        Self {
            ambient: [1.0, 1.0, 1.0, 1.0],
            direction: [dir.x, dir.y, dir.z, 0.0],
            color: [1.0, 1.0, 1.0, 2.0],
        }
    }
}

/// Per-primitive uniforms, written once at upload: the node's world transform
/// within the asset and its material factors. `flags.x` is 1.0 when a
/// base-color texture is bound.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PrimitiveUniforms {
    pub node_transform: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub flags: [f32; 4],
}

impl PrimitiveUniforms {
    pub fn new(node_transform: Mat4, base_color: [f32; 4], textured: bool) -> Self {
        Self {
            node_transform: node_transform.to_cols_array_2d(),
            base_color,
            flags: [if textured { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        // The WGSL vertex layout assumes 32-byte stride with no padding.
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::offset_of!(Vertex, normal), 12);
        assert_eq!(std::mem::offset_of!(Vertex, uv), 24);
    }

    #[test]
    fn test_light_direction_is_normalized() {
        let light = LightUniforms::default();
        let [x, y, z, _] = light.direction;
        let len = (x * x + y * y + z * z).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_primitive_texture_flag() {
        let with = PrimitiveUniforms::new(Mat4::IDENTITY, [1.0; 4], true);
        let without = PrimitiveUniforms::new(Mat4::IDENTITY, [1.0; 4], false);
        assert_eq!(with.flags[0], 1.0);
        assert_eq!(without.flags[0], 0.0);
    }
}
