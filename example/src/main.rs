use std::time::Duration;

use stewart_kin::{
    drivers::{VizConfig, VizSender},
    geometry::Geometry,
    kinematics::solve_inverse,
    Pose, RobotType, StewartError,
};

use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<(), StewartError> {
    // let viz_settings = VizConfig::default();

    let viz_settings = VizConfig {
        addr: "127.0.0.1".to_string(),
        port: 9001,
        channel_capacity: 30,
    };

    println!("going to bind");
    let sender = VizSender::bind(viz_settings.clone()).await;

    let sender = match sender {
        Ok(sender) => {
            println!("Bound successfully");
            sender
        }
        Err(e) => {
            println!("Failed to bind with {:?} : {}", viz_settings, e);
            return Err(e);
        }
    };

    let geometry = Geometry::mx64();
    let mut pose = Pose::home(geometry.home_height);

    println!("sending home pose");
    sender.send_pose(RobotType::Mx64, &pose).await?;
    sleep(Duration::from_secs(1)).await;

    // Two seconds of bobbing with a gentle roll, streamed at 60 fps.
    for frame in 0..120u32 {
        let t = frame as f32 / 60.0;
        pose.ty = geometry.home_height + 15.0 * (t * 3.0).sin();
        pose.rx = 6.0 * (t * 2.0).sin();

        let solved = solve_inverse(&geometry, &pose);
        if solved.error {
            println!("solver flagged frame {} : {:?}", frame, solved.motor_angles_deg);
        }
        sender.send_pose(RobotType::Mx64, &pose).await?;
        sleep(Duration::from_millis(16)).await;
    }

    pose = Pose::home(geometry.home_height);
    sender.send_pose(RobotType::Mx64, &pose).await?;

    let solved = solve_inverse(&geometry, &pose);
    println!("back at home:\n{}", pose);
    println!("motor angles: {:?}", solved.motor_angles_deg);

    Ok(())
}
