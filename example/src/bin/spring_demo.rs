// Forward-solver comparison demo: streams a moving target pose on the
// main port and the spring-relaxed follower on port 9002
// Run with: cargo run -p example --bin spring_demo

use std::f32::consts::TAU;
use std::time::Duration;

use stewart_kin::{
    drivers::{VizConfig, VizSender},
    geometry::Geometry,
    kinematics::{solve_forward, solve_inverse, ForwardConfig},
    Pose, RobotType, StewartError,
};
use tokio::time::interval;

const FRAME_MS: u64 = 16;
const RUN_SECONDS: f32 = 20.0;
const FOLLOWER_PORT: u16 = 9002;

#[tokio::main]
async fn main() -> Result<(), StewartError> {
    println!("Spring Follower Demo\n");

    let sender = VizSender::bind(VizConfig::default()).await?;
    println!("1) Target pose streams to {}", sender.config.endpoint());
    println!(
        "2) Spring-relaxed follower streams to port {}\n",
        FOLLOWER_PORT
    );

    let geometry = Geometry::mx64();

    // Forty relaxation steps per frame: enough to chase the target,
    // little enough that the lag stays visible.
    let forward_config = ForwardConfig {
        max_iterations: 40,
        ..ForwardConfig::default()
    };

    let mut follower = Pose::home(geometry.home_height);
    let mut worst_lag = 0.0f32;

    let mut tick = interval(Duration::from_millis(FRAME_MS));
    let frames = (RUN_SECONDS * 1000.0 / FRAME_MS as f32) as u32;

    for frame in 0..frames {
        tick.tick().await;
        let t = frame as f32 * FRAME_MS as f32 / 1000.0;

        let mut target = Pose::home(geometry.home_height);
        target.ty += 15.0 * (t * TAU * 0.3).sin();
        target.rx = 5.0 * (t * TAU * 0.2).sin();

        let inverse = solve_inverse(&geometry, &target);
        let solution = solve_forward(&geometry, &follower, &inverse, &forward_config);
        follower = solution.result.pose;

        let lag = (target.ty - follower.ty).abs();
        worst_lag = worst_lag.max(lag);

        sender.send_pose(RobotType::Mx64, &target).await?;
        sender
            .send_pose_to(FOLLOWER_PORT, RobotType::Mx64, &follower)
            .await?;

        if frame % 30 == 0 {
            println!(
                "t = {:>5.2}s  target ty {:7.2}  follower ty {:7.2}  lag {:5.2}  iters {:>3}  |F| {:6.3}",
                t,
                target.ty,
                follower.ty,
                lag,
                solution.iterations,
                solution.result.total_force.length()
            );
        }
    }

    println!("\nworst vertical lag over the run: {:.2} mm", worst_lag);
    println!("Done.");
    Ok(())
}
