/// Loopback exercises of the UDP pose driver pair on localhost
use std::time::Duration;

use stewart_kin::drivers::{self, VizConfig, VizReceiver, VizSender};
use stewart_kin::{Pose, RobotType};
use tokio::net::UdpSocket;
use tokio::time::timeout;

fn local_config(port: u32) -> VizConfig {
    VizConfig::new("127.0.0.1".to_string(), port, 30)
}

#[tokio::test]
async fn test_sender_to_receiver_loopback() {
    let receiver = VizReceiver::bind(local_config(9150)).await.unwrap();
    let mut packets = receiver.subscribe();

    let sender = VizSender::bind(local_config(9150)).await.unwrap();
    let pose = Pose::new(1.0, -2.0, 3.0, 4.0, 218.0, -6.0);
    sender.send_pose(RobotType::Mx64, &pose).await.unwrap();

    let packet = timeout(Duration::from_secs(2), packets.recv())
        .await
        .expect("no packet arrived")
        .unwrap();
    assert_eq!(packet.robot, RobotType::Mx64);
    assert_eq!(packet.pose(), pose);
}

#[tokio::test]
async fn test_garbage_datagrams_are_skipped_not_fatal() {
    let receiver = VizReceiver::bind(local_config(9151)).await.unwrap();
    let mut packets = receiver.subscribe();
    let mut logs = receiver.log_channel.subscribe();
    let target = receiver.local_addr().unwrap();

    let raw = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    raw.send_to(b"not a pose packet", target).await.unwrap();

    let sender = VizSender::bind(local_config(9151)).await.unwrap();
    let pose = Pose::home(205.0);
    sender.send_pose(RobotType::Mx64, &pose).await.unwrap();

    // The valid packet still comes through after the garbage one.
    let packet = timeout(Duration::from_secs(2), packets.recv())
        .await
        .expect("receiver died on garbage input")
        .unwrap();
    assert_eq!(packet.pose(), pose);

    let complaint = timeout(Duration::from_secs(2), logs.recv())
        .await
        .expect("no log entry for the bad datagram")
        .unwrap();
    assert!(complaint.contains("Undecodable"), "log said: {}", complaint);
}

#[tokio::test]
async fn test_send_pose_to_reaches_an_alternate_port() {
    let main_receiver = VizReceiver::bind(local_config(9152)).await.unwrap();
    let alt_receiver = VizReceiver::bind(local_config(9153)).await.unwrap();
    let mut main_packets = main_receiver.subscribe();
    let mut alt_packets = alt_receiver.subscribe();

    let sender = VizSender::bind(local_config(9152)).await.unwrap();
    let reference = Pose::home(205.0);
    let solved = Pose::new(0.0, 0.0, 0.0, 0.0, 207.1, 0.0);
    sender.send_pose(RobotType::Mx64, &reference).await.unwrap();
    sender.send_pose_to(9153, RobotType::Mx64, &solved).await.unwrap();

    let on_main = timeout(Duration::from_secs(2), main_packets.recv())
        .await
        .expect("main port got nothing")
        .unwrap();
    let on_alt = timeout(Duration::from_secs(2), alt_packets.recv())
        .await
        .expect("alternate port got nothing")
        .unwrap();
    assert_eq!(on_main.pose(), reference);
    assert_eq!(on_alt.pose(), solved);
}

#[tokio::test]
async fn test_one_shot_send_pose() {
    let receiver = VizReceiver::bind(local_config(9154)).await.unwrap();
    let mut packets = receiver.subscribe();

    let pose = Pose::new(0.0, 5.0, 0.0, 0.0, 140.0, 2.0);
    drivers::send_pose(&local_config(9154), RobotType::Ax18, &pose)
        .await
        .unwrap();

    let packet = timeout(Duration::from_secs(2), packets.recv())
        .await
        .expect("one-shot pose never arrived")
        .unwrap();
    assert_eq!(packet.robot, RobotType::Ax18);
    assert_eq!(packet.pose(), pose);
}

#[tokio::test]
async fn test_disconnect_stops_delivery_after_the_next_datagram() {
    let receiver = VizReceiver::bind(local_config(9155)).await.unwrap();
    let mut packets = receiver.subscribe();
    let sender = VizSender::bind(local_config(9155)).await.unwrap();

    receiver.disconnect().await;

    // The read loop parks in recv, so one more datagram flows through
    // before the flag is noticed.
    let last = Pose::home(205.0);
    sender.send_pose(RobotType::Mx64, &last).await.unwrap();
    let packet = timeout(Duration::from_secs(2), packets.recv())
        .await
        .expect("final packet was dropped")
        .unwrap();
    assert_eq!(packet.pose(), last);

    sender.send_pose(RobotType::Mx64, &Pose::default()).await.unwrap();
    let after = timeout(Duration::from_millis(300), packets.recv()).await;
    assert!(after.is_err(), "receiver kept delivering after disconnect");
}
