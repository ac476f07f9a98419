use int_enum::IntEnum;
use serde::{Deserialize, Serialize};

use super::Packet;
use crate::errors::StewartError;
use crate::{Pose, RobotType};

/// Header word that opens every visualization datagram: the ASCII bytes
/// "STWP" packed into a u32, written little-endian like the rest of the
/// header.
pub const VIZ_MAGIC: u32 = 0x5354_5750;

/// Default UDP port the visualizer listens on.
pub const VIZ_PORT: u16 = 9001;

/// Wire size of a [`PosePacket`]: three u32 header words and six f32 pose
/// fields, all little-endian, no padding.
pub const POSE_PACKET_SIZE: usize = 36;

/// Discriminates what a visualization datagram carries.
///
/// # Variants
///
/// * `Pose` - A six-float platform pose; the payload of [`PosePacket`].
/// * `Geometry` - Reserved for broadcasting geometry tables so a viewer
///   can draw an unfamiliar rig. No sender emits it yet; receivers drop it.
#[repr(u32)]
#[derive(Debug, Serialize, Deserialize, IntEnum, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    Pose = 1,
    Geometry = 2,
}

/// One pose broadcast to the visualizer.
///
/// Layout on the wire, little-endian throughout:
///
/// | offset | field       | type |
/// |--------|-------------|------|
/// | 0      | magic       | u32  |
/// | 4      | packet type | u32  |
/// | 8      | robot id    | u32  |
/// | 12     | rx, ry, rz  | f32  |
/// | 24     | tx, ty, tz  | f32  |
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PosePacket {
    pub packet_type: PacketType,
    pub robot: RobotType,
    pub rx: f32,
    pub ry: f32,
    pub rz: f32,
    pub tx: f32,
    pub ty: f32,
    pub tz: f32,
}

impl PosePacket {
    pub fn new_pose(robot: RobotType, pose: &Pose) -> Self {
        Self {
            packet_type: PacketType::Pose,
            robot,
            rx: pose.rx,
            ry: pose.ry,
            rz: pose.rz,
            tx: pose.tx,
            ty: pose.ty,
            tz: pose.tz,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.rx, self.ry, self.rz, self.tx, self.ty, self.tz)
    }

    pub fn to_bytes(&self) -> [u8; POSE_PACKET_SIZE] {
        let mut bytes = [0u8; POSE_PACKET_SIZE];
        bytes[0..4].copy_from_slice(&VIZ_MAGIC.to_le_bytes());
        bytes[4..8].copy_from_slice(&u32::from(self.packet_type).to_le_bytes());
        bytes[8..12].copy_from_slice(&u32::from(self.robot).to_le_bytes());
        let fields = [self.rx, self.ry, self.rz, self.tx, self.ty, self.tz];
        for (i, value) in fields.iter().enumerate() {
            let start = 12 + i * 4;
            bytes[start..start + 4].copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StewartError> {
        if bytes.len() != POSE_PACKET_SIZE {
            return Err(StewartError::PacketParseError(format!(
                "expected {} bytes, got {}",
                POSE_PACKET_SIZE,
                bytes.len()
            )));
        }
        let magic = read_u32(bytes, 0);
        if magic != VIZ_MAGIC {
            return Err(StewartError::PacketParseError(format!(
                "bad magic 0x{:08x}",
                magic
            )));
        }
        let packet_type = PacketType::try_from(read_u32(bytes, 4)).map_err(|value| {
            StewartError::PacketParseError(format!("unknown packet type {}", value))
        })?;
        let robot = RobotType::try_from(read_u32(bytes, 8))
            .map_err(|value| StewartError::PacketParseError(format!("unknown robot id {}", value)))?;

        Ok(Self {
            packet_type,
            robot,
            rx: read_f32(bytes, 12),
            ry: read_f32(bytes, 16),
            rz: read_f32(bytes, 20),
            tx: read_f32(bytes, 24),
            ty: read_f32(bytes, 28),
            tz: read_f32(bytes, 32),
        })
    }
}

impl Packet for PosePacket {}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_layout_starts_with_the_magic_bytes() {
        let packet = PosePacket::new_pose(RobotType::Mx64, &Pose::home(205.0));
        let bytes = packet.to_bytes();
        assert_eq!(&bytes[0..4], &[0x50, 0x57, 0x54, 0x53]);
        assert_eq!(read_u32(&bytes, 4), 1);
        assert_eq!(read_u32(&bytes, 8), 0);
        assert_eq!(read_f32(&bytes, 28), 205.0);
    }

    #[test]
    fn encode_decode_round_trip_preserves_every_field() {
        let pose = Pose::new(1.5, -2.25, 3.0, 4.5, 218.75, -6.125);
        let packet = PosePacket::new_pose(RobotType::Ax18, &pose);
        let decoded = PosePacket::from_bytes(&packet.to_bytes()).unwrap();
        assert_eq!(decoded, packet);
        assert_eq!(decoded.pose(), pose);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let packet = PosePacket::new_pose(RobotType::Mx64, &Pose::default());
        let bytes = packet.to_bytes();
        assert!(PosePacket::from_bytes(&bytes[0..35]).is_err());
        assert!(PosePacket::from_bytes(&[]).is_err());
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut bytes = PosePacket::new_pose(RobotType::Mx64, &Pose::default()).to_bytes();
        bytes[0] = 0xff;
        let error = PosePacket::from_bytes(&bytes).unwrap_err();
        assert!(error.to_string().contains("bad magic"));
    }

    #[test]
    fn unknown_packet_type_is_rejected() {
        let mut bytes = PosePacket::new_pose(RobotType::Mx64, &Pose::default()).to_bytes();
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        assert!(PosePacket::from_bytes(&bytes).is_err());
    }

    #[test]
    fn unknown_robot_id_is_rejected() {
        let mut bytes = PosePacket::new_pose(RobotType::Ax18, &Pose::default()).to_bytes();
        bytes[8..12].copy_from_slice(&42u32.to_le_bytes());
        assert!(PosePacket::from_bytes(&bytes).is_err());
    }
}
