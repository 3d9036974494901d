use crate::device::SurfaceSize;

/// Column-major 4x4 orthographic projection.
///
/// Canonical 2D space:
/// - physical pixels of the bound surface
/// - origin top-left
/// - +X right, +Y down
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub matrix: [[f32; 4]; 4],
}

impl Projection {
    /// Orthographic projection over `[0, w] x [0, h]` with `y = 0` at the top
    /// and a depth range of `[-1, 1]`.
    pub fn ortho_top_left(size: SurfaceSize) -> Self {
        let w = size.width.max(1) as f32;
        let h = size.height.max(1) as f32;

        Self {
            matrix: [
                [2.0 / w, 0.0, 0.0, 0.0],
                [0.0, -2.0 / h, 0.0, 0.0],
                [0.0, 0.0, -1.0, 0.0],
                [-1.0, 1.0, 0.0, 1.0],
            ],
        }
    }

    /// Maps a surface-space point to normalized device coordinates.
    pub fn to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.matrix;
        (
            m[0][0] * x + m[1][0] * y + m[3][0],
            m[0][1] * x + m[1][1] * y + m[3][1],
        )
    }
}
