// Motion generator lab: streams canned trajectories to the visualizer
// Run with: cargo run -p example --bin motion_lab
// Point a viewer at UDP 9001 to watch

use std::f32::consts::TAU;
use std::io::{self, Write};
use std::time::Duration;

use moves::{MoveLibrary, MoveLimits, Playback};
use stewart_kin::{
    drivers::{VizConfig, VizSender},
    geometry::Geometry,
    kinematics::solve_inverse,
    Pose, RobotType, StewartError,
};
use tokio::time::interval;

const RUN_SECONDS: f32 = 10.0;
const FRAME_MS: u64 = 16;

#[tokio::main]
async fn main() -> Result<(), StewartError> {
    println!("=== Motion Generator Lab ===\n");

    let sender = VizSender::bind(VizConfig::default()).await?;
    let mut robot = RobotType::Mx64;

    loop {
        let geometry = Geometry::from_robot(robot);
        print_menu(robot);

        print!("\nChoice: ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();

        match input.trim() {
            "q" => break,
            "r" => {
                robot = match robot {
                    RobotType::Mx64 => RobotType::Ax18,
                    RobotType::Ax18 => RobotType::Mx64,
                };
                println!("→ Switched to {}", robot);
            }
            "1" => run_generator(&sender, robot, &geometry, orbit).await?,
            "2" => run_generator(&sender, robot, &geometry, rock).await?,
            "3" => run_generator(&sender, robot, &geometry, weave).await?,
            "4" => run_preset(&sender, robot, &geometry).await?,
            other => println!("Unknown choice: '{}'", other),
        }
    }

    println!("Done.");
    Ok(())
}

fn print_menu(robot: RobotType) {
    println!("\n┌──────────────────────────────────────────────┐");
    println!("│ GENERATORS (current robot: {:>6})            │", robot.to_string());
    println!("│  1 = Circular sway                           │");
    println!("│  2 = Rocking tilt                            │");
    println!("│  3 = Sway + tilt + bob                       │");
    println!("│  4 = Preset playback                         │");
    println!("│                                              │");
    println!("│  r = Switch robot    q = Quit                │");
    println!("└──────────────────────────────────────────────┘");
}

fn orbit(t: f32) -> Pose {
    let angle = t * TAU * 0.4;
    Pose {
        tx: 12.0 * angle.cos(),
        tz: 12.0 * angle.sin(),
        ..Default::default()
    }
}

fn rock(t: f32) -> Pose {
    Pose {
        rx: 8.0 * (t * TAU * 0.5).sin(),
        ry: 8.0 * (t * TAU * 0.35).cos(),
        ..Default::default()
    }
}

fn weave(t: f32) -> Pose {
    let mut pose = orbit(t);
    let tilt = rock(t);
    pose.rx = tilt.rx;
    pose.ry = tilt.ry;
    pose.ty = 8.0 * (t * TAU * 0.25).sin();
    pose
}

async fn run_generator<F>(
    sender: &VizSender,
    robot: RobotType,
    geometry: &Geometry,
    shape: F,
) -> Result<(), StewartError>
where
    F: Fn(f32) -> Pose,
{
    println!("Streaming for {:.0} seconds...", RUN_SECONDS);

    let mut tick = interval(Duration::from_millis(FRAME_MS));
    let frames = (RUN_SECONDS * 1000.0 / FRAME_MS as f32) as u32;
    let mut flagged = 0u32;

    for frame in 0..frames {
        tick.tick().await;
        let t = frame as f32 * FRAME_MS as f32 / 1000.0;

        let mut pose = shape(t);
        pose.ty += geometry.home_height;

        let solved = solve_inverse(geometry, &pose);
        if solved.error {
            flagged += 1;
        }
        sender.send_pose(robot, &pose).await?;

        if frame % 30 == 0 {
            println!(
                "t = {:>5.2}s  rx {:+6.2} ry {:+6.2} rz {:+6.2}  tx {:+7.2} ty {:7.2} tz {:+7.2}",
                t, pose.rx, pose.ry, pose.rz, pose.tx, pose.ty, pose.tz
            );
        }
    }

    if flagged > 0 {
        println!("⚠ {} of {} frames were flagged by the solver", flagged, frames);
    }
    Ok(())
}

async fn run_preset(
    sender: &VizSender,
    robot: RobotType,
    geometry: &Geometry,
) -> Result<(), StewartError> {
    let library = MoveLibrary::with_presets();

    println!("\nPresets:");
    for (slot, entry) in library.iter().take(10).enumerate() {
        println!("  {} = {}", slot, entry.name);
    }

    print!("Slot: ");
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    let slot: usize = match input.trim().parse() {
        Ok(n) if n < 10 => n,
        _ => {
            println!("Bad slot");
            return Ok(());
        }
    };

    print!("BPM [120]: ");
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    let bpm: f32 = input.trim().parse().unwrap_or(120.0);

    let limits = MoveLimits::from_geometry(geometry);
    let mut playback = Playback::default();
    playback.set_bpm(bpm);

    let chosen = library.get(slot).unwrap().clone();
    println!(
        "Playing '{}' at {:.0} BPM for {:.0} seconds...",
        chosen.name, playback.bpm, RUN_SECONDS
    );

    let mut tick = interval(Duration::from_millis(FRAME_MS));
    let frames = (RUN_SECONDS * 1000.0 / FRAME_MS as f32) as u32;

    for frame in 0..frames {
        tick.tick().await;
        playback.tick(FRAME_MS as f32 / 1000.0);

        let mut pose = chosen.evaluate(&playback, &limits);
        pose.ty += geometry.home_height;

        let solved = solve_inverse(geometry, &pose);
        sender.send_pose(robot, &pose).await?;

        if frame % 30 == 0 {
            println!(
                "beat {:>6.2}  ty {:7.2}  flagged {}",
                playback.t * playback.bpm / 60.0,
                pose.ty,
                solved.error
            );
        }
    }
    Ok(())
}
