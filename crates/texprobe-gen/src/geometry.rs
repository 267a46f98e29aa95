use bytemuck::{Pod, Zeroable};

/// Depth texture coordinate assigned to each quad, in construction order.
pub const DEPTH_SLICES: [f32; 4] = [0.0, 0.33, 0.66, 1.0];

const CANVAS_LEFT: f32 = -2.75;
const CANVAS_RIGHT: f32 = 2.75;
const CANVAS_TOP: f32 = 1.75;
const CANVAS_BOTTOM: f32 = -1.75;
const CANVAS_MID_X: f32 = 0.0;
const CANVAS_MID_Y: f32 = 0.0;
const QUAD_SPACING: f32 = 0.05;

/// Corner texcoords `(u, v)` of the two triangles that make up a quad.
const BI_TRI_TEXCOORDS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Screen-space position in canvas units (y grows upwards).
    pub position: [f32; 2],
    /// `(u, v, p)`, where `p` selects the depth slice.
    pub texcoord: [f32; 3],
}

/// Axis-aligned quad bounds in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl QuadRect {
    /// Triangle corners in the same order as the texcoords of a bi-tri.
    fn corners(&self) -> [[f32; 2]; 6] {
        [
            [self.left, self.top],
            [self.right, self.top],
            [self.right, self.bottom],
            [self.left, self.top],
            [self.right, self.bottom],
            [self.left, self.bottom],
        ]
    }
}

/// Triangle-list vertex data, six vertices per quad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryBuffer {
    vertices: Vec<Vertex>,
}

impl GeometryBuffer {
    pub fn with_quad_capacity(quads: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(quads * 6),
        }
    }

    /// Appends a quad covering `rect` whose texcoords span `[0,1] x [0,1]` at depth `p`.
    pub fn push_bi_tri(&mut self, rect: QuadRect, p: f32) {
        for (position, [u, v]) in rect.corners().into_iter().zip(BI_TRI_TEXCOORDS) {
            self.vertices.push(Vertex {
                position,
                texcoord: [u, v, p],
            });
        }
    }

    /// Rescales `u` and `v` into texel units of a `width` x `height` texture. The depth
    /// coordinate is left normalized.
    pub fn linearize(&mut self, width: f32, height: f32) {
        for vertex in &mut self.vertices {
            vertex.texcoord[0] *= width;
            vertex.texcoord[1] *= height;
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the vertices in groups of three.
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        self.vertices.chunks_exact(3)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Lays out a 2x2 grid of quads (top-left, top-right, bottom-left, bottom-right) on the
/// canvas, one per entry of [`DEPTH_SLICES`], so a single draw samples every depth slice of
/// a four-layer volume.
pub fn build_volume_quads() -> GeometryBuffer {
    let quads = [
        QuadRect {
            left: CANVAS_LEFT,
            top: CANVAS_TOP,
            right: CANVAS_MID_X - QUAD_SPACING,
            bottom: CANVAS_MID_Y + QUAD_SPACING,
        },
        QuadRect {
            left: CANVAS_MID_X + QUAD_SPACING,
            top: CANVAS_TOP,
            right: CANVAS_RIGHT,
            bottom: CANVAS_MID_Y + QUAD_SPACING,
        },
        QuadRect {
            left: CANVAS_LEFT,
            top: CANVAS_MID_Y - QUAD_SPACING,
            right: CANVAS_MID_X - QUAD_SPACING,
            bottom: CANVAS_BOTTOM,
        },
        QuadRect {
            left: CANVAS_MID_X + QUAD_SPACING,
            top: CANVAS_MID_Y - QUAD_SPACING,
            right: CANVAS_RIGHT,
            bottom: CANVAS_BOTTOM,
        },
    ];

    let mut buffer = GeometryBuffer::with_quad_capacity(quads.len());
    for (rect, p) in quads.into_iter().zip(DEPTH_SLICES) {
        buffer.push_bi_tri(rect, p);
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_quads_of_six_vertices() {
        let buffer = build_volume_quads();
        assert_eq!(buffer.len(), 24);
        assert_eq!(buffer.triangles().count(), 8);
        assert_eq!(buffer.as_bytes().len(), 24 * 20);
    }

    #[test]
    fn depth_constant_per_quad() {
        let buffer = build_volume_quads();
        for (quad, &p) in buffer.vertices().chunks_exact(6).zip(DEPTH_SLICES.iter()) {
            assert!(quad.iter().all(|v| v.texcoord[2] == p));
        }
    }

    #[test]
    fn quads_leave_a_gap_around_the_centre() {
        let buffer = build_volume_quads();
        let first = &buffer.vertices()[..6];
        assert_eq!(first[0].position, [-2.75, 1.75]);
        assert_eq!(first[2].position, [-0.05, 0.05]);
        let last = &buffer.vertices()[18..];
        assert_eq!(last[0].position, [0.05, -0.05]);
        assert_eq!(last[2].position, [2.75, -1.75]);
    }

    #[test]
    fn linearize_scales_uv_only() {
        let mut buffer = build_volume_quads();
        buffer.linearize(256.0, 128.0);
        let quad = &buffer.vertices()[6..12];
        assert_eq!(quad[2].texcoord, [256.0, 128.0, 0.33]);
        assert_eq!(quad[5].texcoord, [0.0, 128.0, 0.33]);
    }
}
