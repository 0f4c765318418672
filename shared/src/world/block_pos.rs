use std::fmt;

use metatile_serde::{BitReader, BitWrite, Serde, SerdeErr, SignedVariableInteger};

/// Integer position of a block within a world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Serde for BlockPos {
    fn ser(&self, writer: &mut dyn BitWrite) {
        SignedVariableInteger::<7>::new(self.x).ser(writer);
        SignedVariableInteger::<7>::new(self.y).ser(writer);
        SignedVariableInteger::<7>::new(self.z).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let x = SignedVariableInteger::<7>::de(reader)?.try_to()?;
        let y = SignedVariableInteger::<7>::de(reader)?.try_to()?;
        let z = SignedVariableInteger::<7>::de(reader)?.try_to()?;
        Ok(Self { x, y, z })
    }

    fn bit_length(&self) -> u32 {
        SignedVariableInteger::<7>::new(self.x).bit_length()
            + SignedVariableInteger::<7>::new(self.y).bit_length()
            + SignedVariableInteger::<7>::new(self.z).bit_length()
    }
}
