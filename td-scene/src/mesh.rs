//! Box geometry for scene parts.
//!
//! Every part in the door scene is assembled from axis-aligned boxes. Faces do
//! not share vertices so each face keeps a flat outward normal.

/// Vertices per box: 4 per face, 6 faces.
pub const BOX_VERTEX_COUNT: usize = 24;
/// Indices per box: 2 triangles per face, 6 faces.
pub const BOX_INDEX_COUNT: usize = 36;

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Immutable geometry for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Flat triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_textured(&self) -> bool {
        self.uvs.is_some()
    }

    #[cfg(test)]
    fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Parallel streams have equal length and every index is in range.
    pub fn is_well_formed(&self) -> bool {
        let n = self.positions.len();
        let uvs_ok = self.uvs.as_ref().is_none_or(|uvs| uvs.len() == n);
        self.normals.len() == n
            && self.colors.len() == n
            && uvs_ok
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }
}

/// Untextured box centered at the origin.
pub fn box_mesh(size: [f32; 3], color: [f32; 4]) -> MeshData {
    build_box(size, color, false)
}

/// Box centered at the origin with per-face unit-square texture coordinates.
pub fn textured_box_mesh(size: [f32; 3], color: [f32; 4]) -> MeshData {
    build_box(size, color, true)
}

fn build_box(size: [f32; 3], color: [f32; 4], with_uvs: bool) -> MeshData {
    let [w, h, d] = size;
    let (x, y, z) = (w * 0.5, h * 0.5, d * 0.5);

    let mut mesh = MeshData {
        positions: Vec::with_capacity(BOX_VERTEX_COUNT),
        normals: Vec::with_capacity(BOX_VERTEX_COUNT),
        colors: Vec::with_capacity(BOX_VERTEX_COUNT),
        uvs: with_uvs.then(|| Vec::with_capacity(BOX_VERTEX_COUNT)),
        indices: Vec::with_capacity(BOX_INDEX_COUNT),
    };

    // Corners run counter-clockwise seen from outside, starting bottom-left.
    add_face(
        &mut mesh,
        [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
        [0.0, 0.0, 1.0],
        color,
    ); // front
    add_face(
        &mut mesh,
        [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]],
        [0.0, 0.0, -1.0],
        color,
    ); // back
    add_face(
        &mut mesh,
        [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]],
        [0.0, 1.0, 0.0],
        color,
    ); // top
    add_face(
        &mut mesh,
        [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]],
        [0.0, -1.0, 0.0],
        color,
    ); // bottom
    add_face(
        &mut mesh,
        [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]],
        [1.0, 0.0, 0.0],
        color,
    ); // right
    add_face(
        &mut mesh,
        [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]],
        [-1.0, 0.0, 0.0],
        color,
    ); // left

    mesh
}

fn add_face(mesh: &mut MeshData, corners: [[f32; 3]; 4], normal: [f32; 3], color: [f32; 4]) {
    let base = mesh.positions.len() as u32;
    for (corner, uv) in corners.into_iter().zip(FACE_UVS) {
        mesh.positions.push(corner);
        mesh.normals.push(normal);
        mesh.colors.push(color);
        if let Some(uvs) = mesh.uvs.as_mut() {
            uvs.push(uv);
        }
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn box_has_fixed_counts() {
        for size in [[1.0, 1.0, 1.0], [4.0, 0.15, 0.3], [0.08, 0.4, 0.1], [123.0, 0.001, 7.5]] {
            let mesh = box_mesh(size, RED);
            assert_eq!(mesh.positions.len(), BOX_VERTEX_COUNT);
            assert_eq!(mesh.normals.len(), BOX_VERTEX_COUNT);
            assert_eq!(mesh.colors.len(), BOX_VERTEX_COUNT);
            assert_eq!(mesh.indices.len(), BOX_INDEX_COUNT);
            assert!(mesh.indices.iter().all(|&i| i < BOX_VERTEX_COUNT as u32));
            assert!(mesh.uvs.is_none());
            assert!(mesh.is_well_formed());
        }
    }

    #[test]
    fn triangles_face_their_normals() {
        let mesh = box_mesh([2.0, 3.0, 0.5], RED);
        for [a, b, c] in mesh.triangles() {
            let pa = Vec3::from_array(mesh.positions[a as usize]);
            let pb = Vec3::from_array(mesh.positions[b as usize]);
            let pc = Vec3::from_array(mesh.positions[c as usize]);
            let n = Vec3::from_array(mesh.normals[a as usize]);
            let winding = (pb - pa).cross(pc - pa);
            assert!(winding.dot(n) > 0.0, "triangle {a},{b},{c} winds against its normal");
        }
    }

    #[test]
    fn box_is_centered_with_requested_extent() {
        let mesh = box_mesh([2.0, 4.0, 6.0], RED);
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for p in &mesh.positions {
            let p = Vec3::from_array(*p);
            min = min.min(p);
            max = max.max(p);
        }
        assert!(min.abs_diff_eq(Vec3::new(-1.0, -2.0, -3.0), 1e-6));
        assert!(max.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));
    }

    #[test]
    fn textured_faces_use_fixed_uv_winding() {
        let mesh = textured_box_mesh([1.0, 1.0, 1.0], RED);
        let uvs = mesh.uvs.as_ref().expect("textured box carries uvs");
        assert_eq!(uvs.len(), BOX_VERTEX_COUNT);
        for face in uvs.chunks_exact(4) {
            assert_eq!(face, FACE_UVS.as_slice());
        }
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn degenerate_sizes_stay_well_formed() {
        for size in [[0.0, 0.0, 0.0], [-1.0, 2.0, 0.0], [0.0, -3.0, -0.5]] {
            let mesh = textured_box_mesh(size, RED);
            assert!(mesh.is_well_formed());
            assert_eq!(mesh.index_count(), BOX_INDEX_COUNT);
        }
    }

    #[test]
    fn colors_are_uniform() {
        let color = [0.6, 0.8, 1.0, 0.4];
        let mesh = box_mesh([1.0, 2.0, 3.0], color);
        assert!(mesh.colors.iter().all(|c| *c == color));
    }
}
