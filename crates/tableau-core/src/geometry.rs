//! Procedural primitive meshes for the placeholder tableau.
//!
//! All generators emit a triangle list with CCW winding and per-face normals
//! (flat shading for boxes, smooth sides for cylinders).

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append a quad `a b c d` (CCW) with a shared normal.
    fn push_quad(&mut self, corners: [[f32; 3]; 4], nrm: [f32; 3]) {
        let base = self.vertices.len() as u32;
        for pos in corners {
            self.vertices.push(Vertex { pos, nrm });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Axis-aligned box centred on the origin.
pub fn generate_box(width: f32, height: f32, depth: f32) -> MeshData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut mesh = MeshData::default();
    // +X / -X
    mesh.push_quad([[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]], [1.0, 0.0, 0.0]);
    mesh.push_quad([[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]], [-1.0, 0.0, 0.0]);
    // +Y / -Y
    mesh.push_quad([[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]], [0.0, 1.0, 0.0]);
    mesh.push_quad([[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]], [0.0, -1.0, 0.0]);
    // +Z / -Z
    mesh.push_quad([[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]], [0.0, 0.0, 1.0]);
    mesh.push_quad([[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]], [0.0, 0.0, -1.0]);
    mesh
}

/// Plane in the XY plane facing +Z, centred on the origin.
pub fn generate_plane(width: f32, height: f32) -> MeshData {
    let (x, y) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::default();
    mesh.push_quad(
        [[-x, -y, 0.0], [x, -y, 0.0], [x, y, 0.0], [-x, y, 0.0]],
        [0.0, 0.0, 1.0],
    );
    mesh
}

/// Capped cylinder along +Y centred on the origin.
pub fn generate_cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut mesh = MeshData::default();

    // Sides: two rings sharing smooth normals
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
        let (s, c) = theta.sin_cos();
        let n = glam::Vec3::new(s, slope, c).normalize();
        mesh.vertices.push(Vertex {
            pos: [radius_top * s, half, radius_top * c],
            nrm: n.to_array(),
        });
        mesh.vertices.push(Vertex {
            pos: [radius_bottom * s, -half, radius_bottom * c],
            nrm: n.to_array(),
        });
    }
    for i in 0..segments {
        let top0 = i * 2;
        let bot0 = top0 + 1;
        let top1 = top0 + 2;
        let bot1 = top0 + 3;
        mesh.indices
            .extend_from_slice(&[top0, bot0, bot1, top0, bot1, top1]);
    }

    // Caps as triangle fans around a centre vertex
    for (y, r, ny) in [(half, radius_top, 1.0_f32), (-half, radius_bottom, -1.0_f32)] {
        if r <= 0.0 {
            continue;
        }
        let centre = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex {
            pos: [0.0, y, 0.0],
            nrm: [0.0, ny, 0.0],
        });
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            let (s, c) = theta.sin_cos();
            mesh.vertices.push(Vertex {
                pos: [r * s, y, r * c],
                nrm: [0.0, ny, 0.0],
            });
        }
        for i in 0..segments {
            let a = centre + 1 + i;
            let b = a + 1;
            if ny > 0.0 {
                mesh.indices.extend_from_slice(&[centre, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[centre, b, a]);
            }
        }
    }
    mesh
}

/// Fill in smooth vertex normals from triangle faces (area weighted).
pub fn compute_normals(mesh: &mut MeshData) {
    let mut acc = vec![glam::Vec3::ZERO; mesh.vertices.len()];
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= acc.len() || b >= acc.len() || c >= acc.len() {
            continue;
        }
        let pa = glam::Vec3::from(mesh.vertices[a].pos);
        let pb = glam::Vec3::from(mesh.vertices[b].pos);
        let pc = glam::Vec3::from(mesh.vertices[c].pos);
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    for (v, n) in mesh.vertices.iter_mut().zip(acc) {
        v.nrm = n.try_normalize().unwrap_or(glam::Vec3::Y).to_array();
    }
}
