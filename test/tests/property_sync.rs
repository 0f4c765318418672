/// PROPERTY-BASED TESTS: sync and persistence invariants
///
/// Key invariants:
/// 1. Records are delivered in the order they were queued, and flushing empties the queue
/// 2. Applying a delivered batch leaves the observer's device equal to the authoritative one
/// 3. Saving then loading reproduces the device
/// 4. Arbitrary bytes never panic the decoders

use proptest::prelude::*;

use metatile_shared::{
    BitReader, BlockPos, Compound, Holder, InitialSyncPacket, Serde, UpdatePacket,
};
use metatile_test::{
    deliver_initial_sync, deliver_update, machine_key, registry, reload, Machine, TestWorld,
    LABEL_DISCRIMINATOR, PROGRESS_DISCRIMINATOR,
};

#[derive(Clone, Debug)]
enum Change {
    Progress(i32),
    Label(String),
}

fn change_strategy() -> impl Strategy<Value = Change> {
    prop_oneof![
        any::<i32>().prop_map(Change::Progress),
        "[a-z ]{0,24}".prop_map(Change::Label),
    ]
}

fn position_strategy() -> impl Strategy<Value = BlockPos> {
    (any::<i32>(), -64i32..320, any::<i32>()).prop_map(|(x, y, z)| BlockPos::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_flush_preserves_queue_order(
        entries in prop::collection::vec((0i32..1000, prop::collection::vec(any::<u8>(), 0..16)), 0..32)
    ) {
        let mut world = TestWorld::authoritative();
        let mut holder = Holder::new(BlockPos::default());

        for (discriminator, payload) in &entries {
            holder.write_custom_data(&mut world, *discriminator, |writer| {
                for byte in payload {
                    byte.ser(writer);
                }
            });
        }

        let flushed: Vec<(i32, Vec<u8>)> = holder
            .flush_deltas()
            .iter()
            .map(|record| (record.discriminator(), record.payload().to_vec()))
            .collect();
        prop_assert_eq!(flushed, entries);
        prop_assert!(holder.flush_deltas().is_empty());
    }

    #[test]
    fn prop_observer_matches_after_batch(
        changes in prop::collection::vec(change_strategy(), 0..20),
        initial_progress in any::<i32>(),
    ) {
        let registry = registry();
        let mut server_world = TestWorld::authoritative();
        let mut client_world = TestWorld::observer();
        let mut server = Holder::new(BlockPos::default());
        let mut client = Holder::new(BlockPos::default());

        server.bind(&mut server_world, registry.get(&machine_key()).unwrap());
        server.device_as_mut::<Machine>().unwrap().progress = initial_progress;
        server.flush_deltas();
        deliver_initial_sync(&server, &mut client, &mut client_world, &registry).unwrap();

        for change in &changes {
            let machine = server.device_as_mut::<Machine>().unwrap();
            match change {
                Change::Progress(progress) => {
                    machine.progress = *progress;
                    server.write_custom_data(&mut server_world, PROGRESS_DISCRIMINATOR, |writer| {
                        progress.ser(writer)
                    });
                }
                Change::Label(label) => {
                    machine.label = label.clone();
                    server.write_custom_data(&mut server_world, LABEL_DISCRIMINATOR, |writer| {
                        label.ser(writer)
                    });
                }
            }
        }
        deliver_update(&mut server, &mut client, &mut client_world, &registry).unwrap();

        let expected = server.device_as::<Machine>().unwrap();
        let actual = client.device_as::<Machine>().unwrap();
        prop_assert_eq!(actual.progress, expected.progress);
        prop_assert_eq!(&actual.label, &expected.label);
    }

    #[test]
    fn prop_save_and_load_reproduces_device(
        position in position_strategy(),
        progress in any::<i32>(),
        label in ".{0,32}",
    ) {
        let registry = registry();
        let mut holder = Holder::new(position);
        holder.bind_detached(registry.get(&machine_key()).unwrap());
        {
            let machine = holder.device_as_mut::<Machine>().unwrap();
            machine.progress = progress;
            machine.label = label.clone();
        }

        let loaded = reload(&holder, &registry).unwrap();

        prop_assert_eq!(loaded.position(), position);
        let machine = loaded.device_as::<Machine>().unwrap();
        prop_assert_eq!(machine.progress, progress);
        prop_assert_eq!(&machine.label, &label);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let registry = registry();
        let mut world = TestWorld::observer();
        let mut holder = Holder::new(BlockPos::default());

        let _ = UpdatePacket::from_bytes(&bytes);
        let _ = InitialSyncPacket::from_bytes(&bytes);
        let _ = Compound::from_bytes(&bytes);
        let _ = holder.read_initial_sync(&mut world, &registry, &mut BitReader::new(&bytes));
    }
}
