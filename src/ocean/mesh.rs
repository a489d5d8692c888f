//! Flat grid meshes for ocean tiles.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::params::{MIN_TILE_RESOLUTION, MIN_TILE_SIZE_M};

/// Meshes with fewer vertices than this use 16-bit indices
pub const MAX_U16_VERTICES: usize = u16::MAX as usize;

/// Vertex data for ocean tiles (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangle indices, narrowed to 16 bits when every index fits
#[derive(Clone, Debug, PartialEq)]
pub enum MeshIndices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl MeshIndices {
    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::U16(indices) => indices.get(i).map(|&v| u32::from(v)),
            Self::U32(indices) => indices.get(i).copied(),
        }
    }

    /// Raw index bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(indices) => bytemuck::cast_slice(indices),
            Self::U32(indices) => bytemuck::cast_slice(indices),
        }
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (0..self.len() / 3).filter_map(move |t| {
            Some([self.get(t * 3)?, self.get(t * 3 + 1)?, self.get(t * 3 + 2)?])
        })
    }
}

/// A flat square grid centered on the origin at height 0
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneMesh {
    pub vertices: Vec<Vertex>,
    pub indices: MeshIndices,
    resolution: u32,
    size: f32,
}

impl PlaneMesh {
    /// Build a `(resolution + 1)^2` vertex grid spanning `[-size/2, size/2]` on X and Z.
    ///
    /// Triangles wind counter-clockwise seen from +Y. Resolution below 2 and
    /// non-positive sizes are clamped to the smallest valid values.
    pub fn generate(resolution: u32, size: f32) -> Self {
        let resolution = resolution.max(MIN_TILE_RESOLUTION);
        let size = if size.is_finite() && size >= MIN_TILE_SIZE_M {
            size
        } else {
            MIN_TILE_SIZE_M
        };

        let grid_size = resolution as usize;
        let row = grid_size + 1;
        let spacing = size / grid_size as f32;
        let half_size = size / 2.0;

        let mut vertices = Vec::with_capacity(row * row);

        // Generate flat XZ plane grid
        for z in 0..=grid_size {
            for x in 0..=grid_size {
                vertices.push(Vertex {
                    position: [
                        x as f32 * spacing - half_size,
                        0.0,
                        z as f32 * spacing - half_size,
                    ],
                    normal: Vec3::Y.to_array(),
                    uv: [x as f32 / grid_size as f32, z as f32 / grid_size as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity(grid_size * grid_size * 6);
        for z in 0..grid_size {
            for x in 0..grid_size {
                let top_left = (z * row + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * row + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        let indices = if vertices.len() < MAX_U16_VERTICES {
            MeshIndices::U16(indices.into_iter().map(|i| i as u16).collect())
        } else {
            MeshIndices::U32(indices)
        };

        Self {
            vertices,
            indices,
            resolution,
            size,
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_mesh_counts() {
        let mesh = PlaneMesh::generate(4, 10.0);

        // (resolution + 1)^2 vertices, resolution^2 * 2 triangles
        assert_eq!(mesh.vertices.len(), 25);
        assert_eq!(mesh.indices.len(), 4 * 4 * 6);
        assert_eq!(mesh.triangle_count(), 32);
    }

    #[test]
    fn test_plane_mesh_extent_and_uvs() {
        let mesh = PlaneMesh::generate(4, 10.0);
        let first = mesh.vertices.first().unwrap();
        let last = mesh.vertices.last().unwrap();

        assert_eq!(first.position, [-5.0, 0.0, -5.0]);
        assert_eq!(last.position, [5.0, 0.0, 5.0]);
        assert_eq!(first.uv, [0.0, 0.0]);
        assert_eq!(last.uv, [1.0, 1.0]);
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.position[1] == 0.0 && v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_generation_is_pure() {
        let a = PlaneMesh::generate(4, 10.0);
        let b = PlaneMesh::generate(4, 10.0);
        assert_eq!(a, b);
        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.indices.as_bytes(), b.indices.as_bytes());
    }

    #[test]
    fn test_winding_faces_up() {
        let mesh = PlaneMesh::generate(3, 6.0);
        for [a, b, c] in mesh.indices.triangles() {
            let p0 = Vec3::from_array(mesh.vertices[a as usize].position);
            let p1 = Vec3::from_array(mesh.vertices[b as usize].position);
            let p2 = Vec3::from_array(mesh.vertices[c as usize].position);
            let face_normal = (p1 - p0).cross(p2 - p0);
            assert!(face_normal.y > 0.0);
        }
    }

    #[test]
    fn test_degenerate_input_is_clamped() {
        let mesh = PlaneMesh::generate(0, -1.0);
        assert_eq!(mesh.resolution(), MIN_TILE_RESOLUTION);
        assert_eq!(mesh.size(), MIN_TILE_SIZE_M);
        assert_eq!(mesh.vertices.len(), 9);
    }

    #[test]
    fn test_wide_indices_for_large_meshes() {
        assert!(matches!(PlaneMesh::generate(64, 1.0).indices, MeshIndices::U16(_)));

        // 256^2 quads -> 257^2 = 66049 vertices
        let mesh = PlaneMesh::generate(256, 1.0);
        assert!(matches!(mesh.indices, MeshIndices::U32(_)));
        let max_index = mesh.indices.triangles().flatten().max().unwrap();
        assert_eq!(max_index as usize, mesh.vertices.len() - 1);
    }
}
