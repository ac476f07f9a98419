/// Validates the visualization packet wire layout byte by byte, plus the
/// serde representations used for snapshots and logs
use serde_json;
use stewart_kin::packets::{Packet, PacketType, PosePacket, POSE_PACKET_SIZE, VIZ_MAGIC};
use stewart_kin::{Pose, RobotType};

fn bincode_round_trip<P: Packet + PartialEq + std::fmt::Debug>(packet: &P) -> P {
    let bytes = bincode::serialize(packet).unwrap();
    bincode::deserialize(&bytes).unwrap()
}

#[test]
fn test_wire_layout_matches_the_visualizer_contract() {
    let pose = Pose::new(1.0, 2.0, 3.0, 4.0, 205.0, 6.0);
    let packet = PosePacket::new_pose(RobotType::Mx64, &pose);
    let bytes = packet.to_bytes();

    println!("\n=== Pose packet bytes ===");
    for chunk in bytes.chunks(4) {
        println!("  {:02x} {:02x} {:02x} {:02x}", chunk[0], chunk[1], chunk[2], chunk[3]);
    }
    println!("=========================\n");

    assert_eq!(bytes.len(), POSE_PACKET_SIZE, "packet must be exactly 36 bytes");

    // Header words, little-endian: magic "STWP", type 1 (pose), robot 0.
    assert_eq!(&bytes[0..4], &VIZ_MAGIC.to_le_bytes());
    assert_eq!(&bytes[0..4], &[0x50, 0x57, 0x54, 0x53]);
    assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &0u32.to_le_bytes());

    // Pose fields in rx ry rz tx ty tz order.
    assert_eq!(&bytes[12..16], &1.0f32.to_le_bytes());
    assert_eq!(&bytes[16..20], &2.0f32.to_le_bytes());
    assert_eq!(&bytes[20..24], &3.0f32.to_le_bytes());
    assert_eq!(&bytes[24..28], &4.0f32.to_le_bytes());
    assert_eq!(&bytes[28..32], &205.0f32.to_le_bytes());
    assert_eq!(&bytes[32..36], &6.0f32.to_le_bytes());
}

#[test]
fn test_decode_rejects_malformed_datagrams() {
    let packet = PosePacket::new_pose(RobotType::Ax18, &Pose::home(140.0));
    let bytes = packet.to_bytes();

    // Valid bytes decode back to the identical packet.
    assert_eq!(PosePacket::from_bytes(&bytes).unwrap(), packet);

    // Truncation at any point is refused.
    for len in 0..POSE_PACKET_SIZE {
        assert!(
            PosePacket::from_bytes(&bytes[..len]).is_err(),
            "accepted a {} byte datagram",
            len
        );
    }

    // Corrupted magic is refused with a readable message.
    let mut corrupted = bytes;
    corrupted[3] = 0x00;
    let error = PosePacket::from_bytes(&corrupted).unwrap_err();
    println!("corrupt magic error: {}", error);
    assert!(error.to_string().contains("bad magic"));
}

#[test]
fn test_geometry_packets_decode_but_are_distinct_from_poses() {
    let mut packet = PosePacket::new_pose(RobotType::Mx64, &Pose::home(205.0));
    packet.packet_type = PacketType::Geometry;
    let decoded = PosePacket::from_bytes(&packet.to_bytes()).unwrap();
    assert_eq!(decoded.packet_type, PacketType::Geometry);
    assert_ne!(decoded.packet_type, PacketType::Pose);
}

#[test]
fn test_pose_packet_json_field_names() {
    let packet = PosePacket::new_pose(RobotType::Ax18, &Pose::new(1.5, 0.0, -2.0, 0.0, 140.0, 3.0));
    let json = serde_json::to_string(&packet).unwrap();

    println!("\n=== PosePacket JSON ===");
    println!("{}", serde_json::to_string_pretty(&packet).unwrap());
    println!("=======================\n");

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.get("packet_type").unwrap(), "Pose");
    assert_eq!(value.get("robot").unwrap(), "Ax18");
    assert!(value.get("rx").is_some());
    assert!(value.get("tz").is_some());
}

#[test]
fn test_pose_packet_bincode_round_trip() {
    let packet = PosePacket::new_pose(RobotType::Mx64, &Pose::new(4.0, 0.0, 6.0, 8.0, 235.0, -5.0));
    let back = bincode_round_trip(&packet);
    assert_eq!(back, packet);
}
