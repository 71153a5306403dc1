use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Slice of the shared index buffer belonging to one shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshRange {
    pub first_index: u32,
    pub index_count: u32,
    pub base_vertex: i32,
}

/// All scene geometry packed into a single vertex/index buffer pair.
#[derive(Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append a unit UV sphere (`segments` around, `stacks` pole to pole).
    pub fn push_uv_sphere(&mut self, segments: u32, stacks: u32) -> MeshRange {
        let segments = segments.max(3);
        let stacks = stacks.max(2);
        let mut verts = Vec::with_capacity(((segments + 1) * (stacks + 1)) as usize);
        for j in 0..=stacks {
            let v = j as f32 / stacks as f32;
            let phi = v * PI;
            let (sp, cp) = phi.sin_cos();
            for i in 0..=segments {
                let u = i as f32 / segments as f32;
                let theta = u * TAU;
                let (st, ct) = theta.sin_cos();
                let n = [sp * st, cp, sp * ct];
                verts.push(Vertex {
                    position: n,
                    normal: n,
                    uv: [u, v],
                });
            }
        }
        let row = segments + 1;
        let mut idx = Vec::with_capacity((segments * stacks * 6) as usize);
        for j in 0..stacks {
            for i in 0..segments {
                let a = j * row + i;
                let b = a + row;
                idx.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        self.append(verts, idx)
    }

    /// Append a flat ring in the XZ plane with normal +Y.
    pub fn push_annulus(&mut self, inner: f32, outer: f32, segments: u32) -> MeshRange {
        let segments = segments.max(3);
        let mut verts = Vec::with_capacity(((segments + 1) * 2) as usize);
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let (s, c) = (u * TAU).sin_cos();
            for (r, v) in [(inner, 0.0), (outer, 1.0)] {
                verts.push(Vertex {
                    position: [r * s, 0.0, r * c],
                    normal: [0.0, 1.0, 0.0],
                    uv: [u, v],
                });
            }
        }
        let mut idx = Vec::with_capacity((segments * 6) as usize);
        for i in 0..segments {
            let a = i * 2;
            idx.extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
        }
        self.append(verts, idx)
    }

    fn append(&mut self, verts: Vec<Vertex>, idx: Vec<u32>) -> MeshRange {
        let range = MeshRange {
            first_index: self.indices.len() as u32,
            index_count: idx.len() as u32,
            base_vertex: self.vertices.len() as i32,
        };
        self.vertices.extend(verts);
        self.indices.extend(idx);
        range
    }
}
