use glam::{Mat4, Vec3};

use scrollstage_gpu_shared::math::Aabb;
use scrollstage_gpu_shared::uniforms::Vertex;

/// Decoded RGBA8 texture pixels, ready for GPU upload.
#[derive(Debug)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// A single renderable primitive extracted from the asset.
#[derive(Debug)]
pub struct Primitive {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// World transform of the owning node within the asset.
    pub node_transform: Mat4,
    pub base_color: [f32; 4],
    pub base_color_texture: Option<TextureData>,
}

/// A loaded model: flattened primitives plus the world-space bounding box
/// used for centering.
#[derive(Debug)]
pub struct LoadedModel {
    pub primitives: Vec<Primitive>,
    pub bounds: Aabb,
}

impl LoadedModel {
    /// Parse a glTF or GLB asset from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, String> {
        let (document, buffers, images) =
            gltf::import_slice(data).map_err(|e| format!("failed to parse glTF asset: {e}"))?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or("glTF asset contains no scene")?;

        let mut primitives = Vec::new();
        let mut bounds: Option<Aabb> = None;
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &images, &mut primitives, &mut bounds)?;
        }

        let bounds = bounds.ok_or("glTF asset contains no triangle geometry")?;
        Ok(LoadedModel { primitives, bounds })
    }

    pub fn num_primitives(&self) -> usize {
        self.primitives.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices.len()).sum()
    }
}

/// Walk a node subtree depth-first, composing parent × local transforms and
/// collecting triangle primitives.
fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
    out: &mut Vec<Primitive>,
    bounds: &mut Option<Aabb>,
) -> Result<(), String> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            // Only triangle geometry is rendered; a points or lines primitive
            // must not take the rest of the asset down with it.
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "skipping primitive with unsupported mode {:?}",
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or("primitive has no positions")?
                .collect();
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(iter) => iter.collect(),
                None => vec![[0.0, 0.0, 1.0]; positions.len()],
            };
            let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
                Some(iter) => iter.into_f32().collect(),
                None => vec![[0.0, 0.0]; positions.len()],
            };

            let vertices: Vec<Vertex> = positions
                .iter()
                .zip(&normals)
                .zip(&uvs)
                .map(|((&position, &normal), &uv)| Vertex {
                    position,
                    normal,
                    uv,
                })
                .collect();

            let indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let prim_bounds = Aabb::from_points(
                positions
                    .iter()
                    .map(|position| world.transform_point3(Vec3::from(*position))),
            );
            if let Some(prim_bounds) = prim_bounds {
                *bounds = Some(match *bounds {
                    Some(existing) => existing.union(&prim_bounds),
                    None => prim_bounds,
                });
            }

            let pbr = primitive.material().pbr_metallic_roughness();
            let base_color_texture = pbr
                .base_color_texture()
                .and_then(|info| images.get(info.texture().source().index()))
                .and_then(to_rgba8);

            out.push(Primitive {
                vertices,
                indices,
                node_transform: world,
                base_color: pbr.base_color_factor(),
                base_color_texture,
            });
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, images, out, bounds)?;
    }

    Ok(())
}

/// Expand decoded image data to RGBA8, the upload format. High-bit-depth
/// sources are skipped; the primitive falls back to its base-color factor.
fn to_rgba8(image: &gltf::image::Data) -> Option<TextureData> {
    use gltf::image::Format;

    let pixels = match image.format {
        Format::R8G8B8A8 => image.pixels.clone(),
        Format::R8G8B8 => image
            .pixels
            .chunks(3)
            .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
            .collect(),
        Format::R8G8 => image
            .pixels
            .chunks(2)
            .flat_map(|la| [la[0], la[0], la[0], la[1]])
            .collect(),
        Format::R8 => image.pixels.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => {
            log::warn!("unsupported base-color texture format {other:?}, ignoring texture");
            return None;
        }
    };

    Some(TextureData {
        width: image.width,
        height: image.height,
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    /// Assemble a GLB container from a JSON chunk and a binary chunk.
    fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
        let mut json_bytes = json.as_bytes().to_vec();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }
        let mut bin_bytes = bin.to_vec();
        while bin_bytes.len() % 4 != 0 {
            bin_bytes.push(0);
        }

        let total = 12 + 8 + json_bytes.len() + 8 + bin_bytes.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&0x4654_6C67u32.to_le_bytes()); // "glTF"
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x4E4F_534Au32.to_le_bytes()); // "JSON"
        out.extend_from_slice(&json_bytes);
        out.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x004E_4942u32.to_le_bytes()); // "BIN"
        out.extend_from_slice(&bin_bytes);
        out
    }

    /// A mesh with four vertices spanning (-1,-1,-1)..(1,1,1), attached to a
    /// node translated by (1, 2, 3). Accessor 0 is positions, accessor 1 is
    /// three indices; `primitives_json` decides how the mesh uses them.
    fn asset_with_primitives(primitives_json: &str) -> Vec<u8> {
        let positions: [[f32; 3]; 4] = [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
        ];
        let indices: [u32; 3] = [0, 1, 2];

        let mut bin = Vec::new();
        for p in &positions {
            for c in p {
                bin.extend_from_slice(&c.to_le_bytes());
            }
        }
        for i in &indices {
            bin.extend_from_slice(&i.to_le_bytes());
        }

        let json = format!(
            r#"{{
            "asset": {{"version": "2.0"}},
            "scene": 0,
            "scenes": [{{"nodes": [0]}}],
            "nodes": [{{"mesh": 0, "translation": [1.0, 2.0, 3.0]}}],
            "meshes": [{{"primitives": [{primitives_json}]}}],
            "buffers": [{{"byteLength": 60}}],
            "bufferViews": [
                {{"buffer": 0, "byteOffset": 0, "byteLength": 48}},
                {{"buffer": 0, "byteOffset": 48, "byteLength": 12}}
            ],
            "accessors": [
                {{
                    "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3",
                    "min": [-1.0, -1.0, -1.0], "max": [1.0, 1.0, 1.0]
                }},
                {{"bufferView": 1, "componentType": 5125, "count": 3, "type": "SCALAR"}}
            ]
        }}"#
        );

        glb(&json, &bin)
    }

    /// One triangle-list primitive.
    fn test_asset() -> Vec<u8> {
        asset_with_primitives(r#"{"attributes": {"POSITION": 0}, "indices": 1}"#)
    }

    // ── from_bytes ──

    #[test]
    fn test_load_minimal_glb() {
        let model = LoadedModel::from_bytes(&test_asset()).unwrap();
        assert_eq!(model.num_primitives(), 1);
        assert_eq!(model.num_vertices(), 4);
        assert_eq!(model.primitives[0].indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_bounds_include_node_transform() {
        let model = LoadedModel::from_bytes(&test_asset()).unwrap();
        // Local bounds (-1,-1,-1)..(1,1,1) translated by (1,2,3).
        assert!((model.bounds.min - Vec3::new(0.0, 1.0, 2.0)).length() < EPSILON);
        assert!((model.bounds.max - Vec3::new(2.0, 3.0, 4.0)).length() < EPSILON);
        assert!((model.bounds.center() - Vec3::new(1.0, 2.0, 3.0)).length() < EPSILON);
    }

    #[test]
    fn test_normalization_recenters_loaded_model() {
        let model = LoadedModel::from_bytes(&test_asset()).unwrap();
        let transform = scrollstage_gpu_shared::math::normalize_transform(&model.bounds, 1.5);
        let center = transform.transform_point3(model.bounds.center());
        assert!(center.length() < EPSILON, "center mapped to {center}");
        let (scale, _, _) = transform.to_scale_rotation_translation();
        assert!((scale - Vec3::splat(1.5)).length() < EPSILON);
    }

    #[test]
    fn test_missing_attributes_are_defaulted() {
        let model = LoadedModel::from_bytes(&test_asset()).unwrap();
        let primitive = &model.primitives[0];
        assert!(primitive.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert!(primitive.vertices.iter().all(|v| v.uv == [0.0, 0.0]));
        assert_eq!(primitive.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(primitive.base_color_texture.is_none());
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        assert!(LoadedModel::from_bytes(b"not a gltf asset").is_err());
    }

    #[test]
    fn test_non_triangle_primitives_are_skipped() {
        // A LINES primitive alongside the triangles; the triangle geometry
        // must still load.
        let asset = asset_with_primitives(
            r#"{"attributes": {"POSITION": 0}, "indices": 1},
               {"attributes": {"POSITION": 0}, "indices": 1, "mode": 1}"#,
        );
        let model = LoadedModel::from_bytes(&asset).unwrap();
        assert_eq!(model.num_primitives(), 1);
        assert_eq!(model.num_vertices(), 4);
        assert!((model.bounds.center() - Vec3::new(1.0, 2.0, 3.0)).length() < EPSILON);
    }

    #[test]
    fn test_asset_without_triangles_is_rejected() {
        let asset =
            asset_with_primitives(r#"{"attributes": {"POSITION": 0}, "indices": 1, "mode": 1}"#);
        let err = LoadedModel::from_bytes(&asset).unwrap_err();
        assert!(err.contains("no triangle geometry"), "unexpected error: {err}");
    }

    // ── to_rgba8 ──

    #[test]
    fn test_rgb_expanded_to_rgba() {
        let image = gltf::image::Data {
            pixels: vec![10, 20, 30, 40, 50, 60],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };
        let texture = to_rgba8(&image).unwrap();
        assert_eq!(texture.pixels, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn test_gray_expanded_to_rgba() {
        let image = gltf::image::Data {
            pixels: vec![128],
            format: gltf::image::Format::R8,
            width: 1,
            height: 1,
        };
        let texture = to_rgba8(&image).unwrap();
        assert_eq!(texture.pixels, vec![128, 128, 128, 255]);
    }

    #[test]
    fn test_high_bit_depth_is_skipped() {
        let image = gltf::image::Data {
            pixels: vec![0; 8],
            format: gltf::image::Format::R16G16B16A16,
            width: 1,
            height: 1,
        };
        assert!(to_rgba8(&image).is_none());
    }
}
