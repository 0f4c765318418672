use crate::world::block_pos::BlockPos;

/// Non-owning handle from a bound device back to its holder.
///
/// Only the holder mints these, and only while binding a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HolderRef {
    position: BlockPos,
}

impl HolderRef {
    pub(crate) fn new(position: BlockPos) -> Self {
        Self { position }
    }

    pub fn position(&self) -> BlockPos {
        self.position
    }
}
