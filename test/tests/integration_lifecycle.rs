/// Integration tests for the holder's per-tick lifecycle

use metatile_shared::{BlockPos, Holder};
use metatile_test::{machine_key, registry, ticker_key, Machine, TestWorld};

const POS: BlockPos = BlockPos::new(0, 0, 0);

#[test]
fn first_update_sees_timer_zero() {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&machine_key()).unwrap());

    holder.update(&mut world);

    assert_eq!(
        holder.device_as::<Machine>().unwrap().observed_timers,
        vec![0]
    );
    assert_eq!(holder.timer(), 1);
}

#[test]
fn timer_advances_once_per_tick() {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&machine_key()).unwrap());

    for _ in 0..4 {
        holder.update(&mut world);
    }

    assert_eq!(
        holder.device_as::<Machine>().unwrap().observed_timers,
        vec![0, 1, 2, 3]
    );
}

#[test]
fn timer_runs_without_a_device() {
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);

    holder.update(&mut world);
    holder.update(&mut world);

    assert_eq!(holder.timer(), 2);
    assert!(world.light_checks.is_empty());
}

#[test]
fn light_is_checked_once_after_bind() {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&machine_key()).unwrap());
    assert!(holder.needs_light_update());

    holder.update(&mut world);
    assert_eq!(world.light_checks, vec![POS]);
    assert!(!holder.needs_light_update());

    holder.update(&mut world);
    assert_eq!(world.light_checks.len(), 1);
}

#[test]
fn device_queued_records_mark_block_for_sync() {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&ticker_key()).unwrap());
    holder.flush_deltas();
    world.clear_log();

    holder.update(&mut world);

    assert_eq!(holder.pending_deltas().len(), 1);
    assert_eq!(world.block_updates, vec![POS]);
    assert_eq!(world.dirty, vec![POS]);
}

#[test]
fn invalidated_holder_still_ticks() {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&machine_key()).unwrap());
    holder.invalidate();

    holder.update(&mut world);

    assert!(!holder.is_valid());
    assert_eq!(holder.timer(), 1);
}
