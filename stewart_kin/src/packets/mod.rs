use serde::{Deserialize, Serialize};

mod pose_packet;

pub use pose_packet::*;

/// Marker for messages that can be snapshotted or shipped between
/// processes with serde. Wire encoding onto the UDP socket itself is the
/// fixed binary layout of each packet type, not a serde format.
pub trait Packet: Serialize + for<'de> Deserialize<'de> {}
