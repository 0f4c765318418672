pub mod delta_queue;
pub mod delta_record;
pub mod error;
pub mod initial_sync_packet;
pub mod update_packet;
