pub mod block_pos;
pub mod holder_world;
