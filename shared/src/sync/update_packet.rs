use metatile_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr};

use crate::world::block_pos::BlockPos;

use super::delta_record::DeltaRecord;

/// Everything a holder queued since the last packet, addressed by position.
/// Observers apply the records in order, as one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdatePacket {
    pub position: BlockPos,
    pub records: Vec<DeltaRecord>,
}

impl UpdatePacket {
    pub fn new(position: BlockPos, records: Vec<DeltaRecord>) -> Self {
        Self { position, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
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

impl Serde for UpdatePacket {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.position.ser(writer);
        for record in &self.records {
            // continue bit
            true.ser(writer);
            record.ser(writer);
        }
        // finish bit
        false.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let position = BlockPos::de(reader)?;
        let mut records = Vec::new();
        loop {
            let record_continue = bool::de(reader)?;
            if !record_continue {
                break;
            }
            records.push(DeltaRecord::de(reader)?);
        }
        Ok(Self { position, records })
    }

    fn bit_length(&self) -> u32 {
        let mut output = self.position.bit_length();
        for record in &self.records {
            output += 1 + record.bit_length();
        }
        output + 1
    }
}
