use metatile_serde::{BitReader, BitWrite, Serde, SerdeErr, SignedVariableInteger};

use crate::constants::INITIAL_SYNC_DISCRIMINATOR;

/// One queued incremental update: a discriminator routing the payload, and
/// the payload bytes themselves
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaRecord {
    discriminator: i32,
    payload: Vec<u8>,
}

impl DeltaRecord {
    pub fn new(discriminator: i32, payload: Vec<u8>) -> Self {
        Self {
            discriminator,
            payload,
        }
    }

    pub fn discriminator(&self) -> i32 {
        self.discriminator
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn is_initial_sync(&self) -> bool {
        self.discriminator == INITIAL_SYNC_DISCRIMINATOR
    }

    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.payload)
    }
}

impl Serde for DeltaRecord {
    fn ser(&self, writer: &mut dyn BitWrite) {
        SignedVariableInteger::<7>::new(self.discriminator).ser(writer);
        self.payload.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let discriminator = SignedVariableInteger::<7>::de(reader)?.try_to()?;
        let payload = Vec::<u8>::de(reader)?;
        Ok(Self {
            discriminator,
            payload,
        })
    }

    fn bit_length(&self) -> u32 {
        SignedVariableInteger::<7>::new(self.discriminator).bit_length()
            + self.payload.bit_length()
    }
}
