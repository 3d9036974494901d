use bytemuck::{Pod, Zeroable};

/// Data that survives a suspend/resume cycle.
///
/// The byte layout is `f32 angle`, `i32 last_x`, `i32 last_y` in native byte
/// order, 12 bytes with no padding. Hosts treat the bytes as opaque.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SavedState {
    /// Animation parameter in `[0, wrap]`.
    pub angle: f32,
    /// Last primary-pointer position, truncated to whole pixels.
    pub last_x: i32,
    pub last_y: i32,
}

/// Serialized snapshot size in bytes.
pub const SNAPSHOT_SIZE: usize = 12;

const _: () = assert!(std::mem::size_of::<SavedState>() == SNAPSHOT_SIZE);

impl SavedState {
    pub fn to_bytes(&self) -> [u8; SNAPSHOT_SIZE] {
        let mut out = [0u8; SNAPSHOT_SIZE];
        out.copy_from_slice(bytemuck::bytes_of(self));
        out
    }

    /// Restores a snapshot previously produced by [`SavedState::to_bytes`].
    ///
    /// Returns `None` when the buffer does not have the exact snapshot size.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != SNAPSHOT_SIZE {
            return None;
        }
        bytemuck::try_pod_read_unaligned(bytes).ok()
    }

    /// Advances `angle` by `step`, wrapping to zero once it exceeds `wrap`.
    pub fn advance_angle(&mut self, step: f32, wrap: f32) {
        self.angle += step;
        if self.angle > wrap {
            self.angle = 0.0;
        }
    }
}
