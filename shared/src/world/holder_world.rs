use super::block_pos::BlockPos;

/// The slice of the surrounding world a holder talks to.
///
/// The world owns block state, lighting and rendering; a holder only asks it
/// to react to changes of the device it carries.
pub trait HolderWorld {
    /// True on an observer's copy of the world, false on the authoritative one
    fn is_remote(&self) -> bool;

    /// Current opacity flag of the block state at `pos`
    fn is_block_opaque(&self, pos: &BlockPos) -> bool;

    /// Rewrites the block state at `pos` with a new opacity flag
    fn set_block_opaque(&mut self, pos: &BlockPos, opaque: bool);

    /// Lets blocks around `pos` re-evaluate anything that depends on it
    fn neighbor_changed(&mut self, pos: &BlockPos);

    /// Tells neighbours of `pos` that its block state changed
    fn notify_neighbors_of_state_change(&mut self, pos: &BlockPos);

    /// Tells the engine the block at `pos` has fresh data to sync
    fn notify_block_update(&mut self, pos: &BlockPos);

    /// Flags the block at `pos` as needing to be saved
    fn mark_dirty(&mut self, pos: &BlockPos);

    /// Recomputes lighting at `pos`
    fn check_light(&mut self, pos: &BlockPos);

    /// Schedules every block in the inclusive box `min..=max` for re-render
    fn mark_range_for_render_update(&mut self, min: &BlockPos, max: &BlockPos);
}
