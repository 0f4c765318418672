/// Integration tests for initial sync: the full snapshot an observer gets
/// when it first sees a holder

use metatile_shared::{
    BitReader, BitWriter, BlockPos, Holder, HolderConfig, InitialSyncPacket, Serde, SyncError,
    INITIAL_SYNC_DISCRIMINATOR,
};
use metatile_test::{
    deliver_initial_sync, init_logging, lamp_key, machine_key, registry, Lamp, Machine,
    TestWorld,
};

const POS: BlockPos = BlockPos::new(7, 80, -7);

fn server_machine(progress: i32, label: &str) -> Holder {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&machine_key()).unwrap());
    let machine = holder.device_as_mut::<Machine>().unwrap();
    machine.progress = progress;
    machine.label = label.to_string();
    holder
}

fn snapshot(identifier: &str, tail: impl FnOnce(&mut BitWriter)) -> Vec<u8> {
    let mut writer = BitWriter::new();
    true.ser(&mut writer);
    identifier.to_string().ser(&mut writer);
    tail(&mut writer);
    writer.to_bytes()
}

#[test]
fn observer_receives_full_device_state() {
    init_logging();
    let registry = registry();
    let server = server_machine(12, "crusher");
    let mut client_world = TestWorld::observer();
    let mut client = Holder::new(POS);

    deliver_initial_sync(&server, &mut client, &mut client_world, &registry).unwrap();

    let machine = client.device_as::<Machine>().unwrap();
    assert_eq!(machine.progress, 12);
    assert_eq!(machine.label, "crusher");
    assert_eq!(client.device().unwrap().key(), &machine_key());
}

#[test]
fn snapshot_schedules_render_and_light() {
    let registry = registry();
    let server = server_machine(0, "");
    let mut client_world = TestWorld::observer();
    let mut client = Holder::new(POS);

    deliver_initial_sync(&server, &mut client, &mut client_world, &registry).unwrap();

    assert_eq!(
        client_world.render_updates,
        vec![(BlockPos::new(6, 79, -8), BlockPos::new(8, 81, -6))]
    );
    assert!(client.needs_light_update());
    // an observer never echoes the snapshot back
    assert!(client.pending_deltas().is_empty());
    assert!(client_world.opacity_writes.is_empty());

    client.update(&mut client_world);
    assert_eq!(client_world.light_checks, vec![POS]);
}

#[test]
fn empty_holder_snapshot_leaves_observer_unchanged() {
    let registry = registry();
    let server = Holder::new(POS);
    let mut client_world = TestWorld::observer();
    let mut client = Holder::new(POS);

    let packet = server.initial_sync_packet();
    assert_eq!(packet.data, vec![0]);

    client
        .receive_initial_sync_packet(&mut client_world, &registry, &packet)
        .unwrap();

    assert!(!client.has_device());
    assert!(client_world.render_updates.is_empty());
}

#[test]
fn snapshot_replaces_bound_device() {
    let registry = registry();
    let mut server_world = TestWorld::authoritative();
    let mut server = Holder::new(POS);
    server.bind(&mut server_world, registry.get(&lamp_key()).unwrap());
    server.device_as_mut::<Lamp>().unwrap().lit = true;

    let mut client_world = TestWorld::observer();
    let mut client = Holder::new(POS);
    client.bind(&mut client_world, registry.get(&machine_key()).unwrap());

    deliver_initial_sync(&server, &mut client, &mut client_world, &registry).unwrap();

    assert!(client.device_as::<Lamp>().unwrap().lit);
}

#[test]
fn initial_sync_record_in_update_stream_rebinds() {
    let registry = registry();
    let mut client_world = TestWorld::observer();
    let mut client = Holder::new(POS);

    let payload = {
        let mut writer = BitWriter::new();
        "mymod:lamp".to_string().ser(&mut writer);
        true.ser(&mut writer);
        writer.to_bytes()
    };
    client
        .receive_custom_data(
            &mut client_world,
            &registry,
            INITIAL_SYNC_DISCRIMINATOR,
            &mut BitReader::new(&payload),
        )
        .unwrap();

    assert!(client.device_as::<Lamp>().unwrap().lit);
}

// Errors

#[test]
fn unknown_device_is_an_error() {
    let registry = registry();
    let mut world = TestWorld::observer();
    let mut client = Holder::new(POS);
    let bytes = snapshot("totally:unknown", |_| {});

    let result = client.read_initial_sync(&mut world, &registry, &mut BitReader::new(&bytes));

    assert_eq!(
        result,
        Err(SyncError::UnknownDevice {
            key: "totally:unknown".to_string()
        })
    );
    assert!(!client.has_device());
}

#[test]
fn bare_identifier_is_not_migrated_on_the_wire() {
    let registry = registry();
    let mut world = TestWorld::observer();
    let mut client = Holder::new(POS);
    let bytes = snapshot("machine", |writer| {
        0i32.ser(writer);
        String::new().ser(writer);
    });

    let result = client.read_initial_sync(&mut world, &registry, &mut BitReader::new(&bytes));

    assert!(matches!(result, Err(SyncError::InvalidKey(_))));
}

#[test]
fn overlong_identifier_is_rejected() {
    let registry = registry();
    let mut world = TestWorld::observer();
    let config = HolderConfig {
        max_identifier_length: 8,
        ..HolderConfig::default()
    };
    let mut client = Holder::with_config(POS, config);
    let bytes = snapshot("gregtech:machine", |_| {});

    let result = client.read_initial_sync(&mut world, &registry, &mut BitReader::new(&bytes));

    assert_eq!(
        result,
        Err(SyncError::IdentifierTooLong { length: 16, max: 8 })
    );
}

#[test]
fn truncated_snapshot_is_malformed() {
    let registry = registry();
    let server = server_machine(1234, "long enough label");
    let data = server.initial_sync_packet().data;

    for cut in 0..data.len() {
        let mut world = TestWorld::observer();
        let mut client = Holder::new(POS);
        let result =
            client.read_initial_sync(&mut world, &registry, &mut BitReader::new(&data[..cut]));
        assert!(
            matches!(result, Err(SyncError::Malformed(_))),
            "cut at {} gave {:?}",
            cut,
            result
        );
    }
}

#[test]
fn snapshot_payload_without_label_binds_nothing() {
    let registry = registry();
    let mut world = TestWorld::observer();
    let mut client = Holder::new(POS);
    let bytes = snapshot("gregtech:machine", |writer| 42i32.ser(writer));

    let result = client.read_initial_sync(&mut world, &registry, &mut BitReader::new(&bytes));

    assert!(matches!(result, Err(SyncError::Malformed(_))));
    assert!(!client.has_device());
    assert!(world.render_updates.is_empty());
    assert!(!client.needs_light_update());
}

#[test]
fn failed_snapshot_keeps_previous_device() {
    let registry = registry();
    let mut world = TestWorld::authoritative();
    let mut holder = Holder::new(POS);
    holder.bind(&mut world, registry.get(&lamp_key()).unwrap());
    holder.device_as_mut::<Lamp>().unwrap().lit = true;
    holder.flush_deltas();
    world.clear_log();
    let bytes = snapshot("gregtech:machine", |writer| 42i32.ser(writer));

    let result = holder.read_initial_sync(&mut world, &registry, &mut BitReader::new(&bytes));

    assert!(matches!(result, Err(SyncError::Malformed(_))));
    assert!(holder.device_as::<Lamp>().unwrap().lit);
    assert!(holder.pending_deltas().is_empty());
    assert!(world.opacity_writes.is_empty());
    assert!(world.dirty.is_empty());
}

#[test]
fn snapshot_starts_with_optional_identifier() {
    let server = server_machine(3, "press");
    let data = server.initial_sync_packet().data;
    let mut reader = BitReader::new(&data);

    assert_eq!(
        Option::<String>::de(&mut reader),
        Ok(Some("gregtech:machine".to_string()))
    );
    assert_eq!(i32::de(&mut reader), Ok(3));
    assert_eq!(String::de(&mut reader), Ok("press".to_string()));

    let mut writer = BitWriter::new();
    None::<String>.ser(&mut writer);
    assert_eq!(Holder::new(POS).initial_sync_packet().data, writer.to_bytes());
}

#[test]
fn garbled_packet_bytes_are_rejected() {
    assert!(InitialSyncPacket::from_bytes(&[0xFF]).is_err());
}
