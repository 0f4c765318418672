use log::trace;

use metatile_serde::{BitWrite, BitWriter};

use crate::constants::INITIAL_SYNC_DISCRIMINATOR;

use super::{delta_record::DeltaRecord, error::SyncError};

/// Incremental records waiting for the next outgoing update packet, in the
/// order they were queued.
///
/// Records are only ever appended, and only ever removed all at once by
/// `drain`.
#[derive(Debug, Default)]
pub struct DeltaQueue {
    records: Vec<DeltaRecord>,
}

impl DeltaQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `writer` once and queues its output under `discriminator`.
    /// Returns Err for the reserved initial-sync discriminator.
    pub fn try_write(
        &mut self,
        discriminator: i32,
        writer: impl FnOnce(&mut dyn BitWrite),
    ) -> Result<(), SyncError> {
        if discriminator == INITIAL_SYNC_DISCRIMINATOR {
            return Err(SyncError::ReservedDiscriminator { discriminator });
        }
        self.push(discriminator, writer);
        Ok(())
    }

    pub(crate) fn push(&mut self, discriminator: i32, writer: impl FnOnce(&mut dyn BitWrite)) {
        let mut bit_writer = BitWriter::new();
        writer(&mut bit_writer);
        let payload = bit_writer.to_bytes();

        trace!(
            "Queued record {} ({} bytes)",
            discriminator,
            payload.len()
        );
        self.records.push(DeltaRecord::new(discriminator, payload));
    }

    /// Takes every pending record, leaving the queue empty
    pub fn drain(&mut self) -> Vec<DeltaRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn records(&self) -> &[DeltaRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
