use metatile_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

use crate::world::block_pos::BlockPos;

/// A full snapshot of a holder for an observer that is seeing it for the
/// first time. `data` is the holder's initial-sync payload: a presence bit,
/// then the device identifier and the device's own snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitialSyncPacket {
    pub position: BlockPos,
    pub data: Vec<u8>,
}

impl InitialSyncPacket {
    pub fn new(position: BlockPos, data: Vec<u8>) -> Self {
        Self { position, data }
    }

    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.data)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BitWriter::with_capacity(self.bit_length().div_ceil(8) as usize);
        self.ser(&mut writer);
        writer.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerdeErr> {
        Self::de(&mut BitReader::new(bytes))
    }
}

impl Serde for InitialSyncPacket {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.position.ser(writer);
        self.data.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let position = BlockPos::de(reader)?;
        let data = Vec::<u8>::de(reader)?;
        Ok(Self { position, data })
    }

    fn bit_length(&self) -> u32 {
        self.position.bit_length() + self.data.bit_length()
    }
}
