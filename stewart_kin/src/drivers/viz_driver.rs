use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::{broadcast, Mutex};

use super::VizConfig;
use crate::errors::StewartError;
use crate::packets::{PacketType, PosePacket};
use crate::{Pose, RobotType};

/// Broadcasts poses to a visualizer over UDP.
///
/// The sender binds an ephemeral local socket and fires datagrams at the
/// configured endpoint. Cloning is cheap and clones share the socket and
/// log channel.
#[derive(Debug, Clone)]
pub struct VizSender {
    pub config: VizConfig,
    pub log_channel: broadcast::Sender<String>,
    socket: Arc<UdpSocket>,
    target: String,
}

impl VizSender {
    /// Opens a UDP socket for talking to the visualizer described by
    /// `config`.
    ///
    /// # Arguments
    /// * `config` - Where the visualizer listens and how much log history
    ///   to keep.
    ///
    /// # Returns
    /// A `VizSender` ready to broadcast poses.
    ///
    /// # Errors
    /// Returns `StewartError::ConfigError` when the configuration fails
    /// validation or the address cannot be resolved, and
    /// `StewartError::SocketError` when the local socket cannot be opened.
    ///
    /// # Example
    /// ```rust,ignore
    /// let sender = VizSender::bind(VizConfig::default()).await?;
    /// sender.send_pose(RobotType::Mx64, &Pose::home(205.0)).await?;
    /// ```
    pub async fn bind(config: VizConfig) -> Result<Self, StewartError> {
        config.validate().map_err(StewartError::ConfigError)?;
        let target = config.resolve().map_err(StewartError::ConfigError)?;

        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| StewartError::SocketError(e.to_string()))?;
        let (log_channel, _rx) = broadcast::channel(config.channel_capacity);

        let sender = Self {
            config,
            log_channel,
            socket: Arc::new(socket),
            target,
        };
        sender.log_message(format!("Bound UDP pose sender targeting {}", sender.target)).await;
        Ok(sender)
    }

    pub async fn send_pose(&self, robot: RobotType, pose: &Pose) -> Result<(), StewartError> {
        let packet = PosePacket::new_pose(robot, pose);
        self.send_packet(&packet).await
    }

    pub async fn send_packet(&self, packet: &PosePacket) -> Result<(), StewartError> {
        let bytes = packet.to_bytes();
        if let Err(e) = self.socket.send_to(&bytes, &self.target).await {
            let error = StewartError::SocketError(e.to_string());
            self.log_message(error.to_string()).await;
            return Err(error);
        }
        tracing::trace!(endpoint = %self.target, "sent pose packet");
        Ok(())
    }

    /// Sends a pose to a different port on the configured host. Lets one
    /// sender feed several viewer channels, like a reference pose next to a
    /// solved pose.
    pub async fn send_pose_to(
        &self,
        port: u16,
        robot: RobotType,
        pose: &Pose,
    ) -> Result<(), StewartError> {
        let packet = PosePacket::new_pose(robot, pose);
        let target = format!("{}:{}", self.config.addr, port);
        self.socket
            .send_to(&packet.to_bytes(), &target)
            .await
            .map_err(|e| StewartError::SocketError(e.to_string()))?;
        tracing::trace!(endpoint = %target, "sent pose packet");
        Ok(())
    }

    async fn log_message<T: Into<String>>(&self, message: T) {
        let message = message.into();
        let _ = self.log_channel.send(message.clone());
        #[cfg(feature = "logging")]
        println!("{:?}", message);
    }
}

/// Receives pose packets from the network and fans them out to
/// subscribers.
///
/// Binding spawns a background task that decodes each datagram and pushes
/// valid pose packets onto a broadcast channel; call
/// [`subscribe`](VizReceiver::subscribe) to get a receiving end. Datagrams
/// that fail to decode are logged and skipped, so one bad sender cannot
/// stall the stream.
#[derive(Debug, Clone)]
pub struct VizReceiver {
    pub config: VizConfig,
    pub log_channel: broadcast::Sender<String>,
    socket: Arc<UdpSocket>,
    packet_channel: broadcast::Sender<PosePacket>,
    connected: Arc<Mutex<bool>>,
}

impl VizReceiver {
    /// Binds the configured endpoint and starts the background read task.
    ///
    /// # Errors
    /// Returns `StewartError::ConfigError` when the configuration fails
    /// validation or the address cannot be resolved, and
    /// `StewartError::SocketError` when the port cannot be bound.
    pub async fn bind(config: VizConfig) -> Result<Self, StewartError> {
        config.validate().map_err(StewartError::ConfigError)?;
        let endpoint = config.resolve().map_err(StewartError::ConfigError)?;

        let socket = UdpSocket::bind(&endpoint)
            .await
            .map_err(|e| StewartError::SocketError(e.to_string()))?;
        let (log_channel, _log_rx) = broadcast::channel(config.channel_capacity);
        let (packet_channel, _packet_rx) = broadcast::channel(config.channel_capacity);

        let receiver = Self {
            config,
            log_channel,
            socket: Arc::new(socket),
            packet_channel,
            connected: Arc::new(Mutex::new(true)),
        };
        receiver.log_message(format!("Listening for pose packets on {}", endpoint)).await;

        let reader = receiver.clone();
        tokio::spawn(async move {
            reader.read_packets().await;
        });

        Ok(receiver)
    }

    /// The address the receiver actually bound.
    pub fn local_addr(&self) -> Result<SocketAddr, StewartError> {
        self.socket
            .local_addr()
            .map_err(|e| StewartError::SocketError(e.to_string()))
    }

    /// A new receiving end of the decoded pose stream.
    pub fn subscribe(&self) -> broadcast::Receiver<PosePacket> {
        self.packet_channel.subscribe()
    }

    /// Stops the read task after the next datagram is handled.
    pub async fn disconnect(&self) {
        {
            let mut connected = self.connected.lock().await;
            *connected = false;
        }
        self.log_message("Shutting down pose receiver").await;
    }

    async fn read_packets(&self) {
        let mut buffer = [0u8; 64];
        loop {
            let (len, from) = match self.socket.recv_from(&mut buffer).await {
                Ok(received) => received,
                Err(e) => {
                    tracing::warn!(error = %e, "pose socket receive failed");
                    self.log_message(format!("Receive failed: {}", e)).await;
                    break;
                }
            };
            match PosePacket::from_bytes(&buffer[..len]) {
                Ok(packet) if packet.packet_type == PacketType::Pose => {
                    let _ = self.packet_channel.send(packet);
                }
                Ok(packet) => {
                    tracing::debug!(packet_type = ?packet.packet_type, "ignoring non-pose packet");
                }
                Err(e) => {
                    tracing::warn!(source = %from, "undecodable datagram: {}", e);
                    self.log_message(format!("Undecodable datagram from {}: {}", from, e)).await;
                }
            }
            if !*self.connected.lock().await {
                break;
            }
        }
    }

    async fn log_message<T: Into<String>>(&self, message: T) {
        let message = message.into();
        let _ = self.log_channel.send(message.clone());
        #[cfg(feature = "logging")]
        println!("{:?}", message);
    }
}

/// Opens a throwaway sender, ships one pose and drops the socket. Handy
/// for scripts that only need to poke the visualizer once.
pub async fn send_pose(
    config: &VizConfig,
    robot: RobotType,
    pose: &Pose,
) -> Result<(), StewartError> {
    let sender = VizSender::bind(config.clone()).await?;
    sender.send_pose(robot, pose).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_rejects_an_invalid_config() {
        let result = VizSender::bind(VizConfig::new(String::new(), 9001, 30)).await;
        match result {
            Err(StewartError::ConfigError(msg)) => assert!(msg.contains("Address")),
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn receiver_bind_rejects_a_zero_port() {
        let result = VizReceiver::bind(VizConfig::new("127.0.0.1".to_string(), 0, 30)).await;
        assert!(matches!(result, Err(StewartError::ConfigError(_))));
    }
}
