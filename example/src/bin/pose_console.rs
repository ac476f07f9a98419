// Interactive pose console for the platform visualizer
// Run with: cargo run -p example --bin pose_console
// Point a viewer at UDP 9001 to watch the datagrams arrive

use std::io::{self, Write};

use stewart_kin::{
    drivers::{VizConfig, VizSender},
    geometry::Geometry,
    kinematics::solve_inverse,
    packets::PosePacket,
    Pose, RobotType, StewartError,
};

#[derive(Debug, Clone)]
struct ConsoleConfig {
    robot: RobotType,
    jog_distance: f32, // mm
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            robot: RobotType::Mx64,
            jog_distance: 5.0,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), StewartError> {
    println!("=== Stewart Platform Pose Console ===\n");

    let viz_settings = VizConfig::default();
    println!("Binding pose sender for {}...", viz_settings.endpoint());
    let sender = VizSender::bind(viz_settings).await?;

    let mut config = ConsoleConfig::default();
    let mut geometry = Geometry::from_robot(config.robot);
    let mut pose = Pose::home(geometry.home_height);

    sender.send_pose(config.robot, &pose).await?;
    println!("\n✓ Bound and homed!\n");

    loop {
        let solved = solve_inverse(&geometry, &pose);
        display_status(&config, &pose, solved.motor_angles_deg, solved.error);
        print_help();

        print!("\nCommand: ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap();

        match cmd {
            "q" => {
                println!("\nShutting down...");
                break;
            }
            "home" | "0" => {
                pose = Pose::home(geometry.home_height);
                println!("→ Back to home");
            }
            "r" => {
                config.robot = match config.robot {
                    RobotType::Mx64 => RobotType::Ax18,
                    RobotType::Ax18 => RobotType::Mx64,
                };
                geometry = Geometry::from_robot(config.robot);
                pose = Pose::home(geometry.home_height);
                println!("→ Switched to {} and homed", config.robot);
            }
            "d" => {
                if let Err(e) = set_jog_distance(&mut config) {
                    println!("Error: {}", e);
                }
                continue;
            }
            "json" => {
                println!("{}", serde_json::to_string_pretty(&pose).unwrap());
                continue;
            }
            "x" => {
                dump_packet(config.robot, &pose);
                continue;
            }
            "rx" | "ry" | "rz" | "tx" | "ty" | "tz" => {
                match parts.next().and_then(|v| v.parse::<f32>().ok()) {
                    Some(value) => {
                        set_component(&mut pose, cmd, value);
                        println!("→ {} set to {:.2}", cmd, value);
                    }
                    None => {
                        println!("Usage: {} <value>", cmd);
                        continue;
                    }
                }
            }
            "j" | "k" | "h" | "l" | "f" | "b" => {
                let key = cmd.chars().next().unwrap();
                let offset = get_direction_offset(key, config.jog_distance);
                pose.tx += offset.tx;
                pose.ty += offset.ty;
                pose.tz += offset.tz;
                println!("→ Jog {} ({:.2} mm)", get_direction_name(key), config.jog_distance);
            }
            _ => {
                println!("Unknown command: '{}'", cmd);
                continue;
            }
        }

        let solved = solve_inverse(&geometry, &pose);
        if solved.error {
            println!("⚠ Solver flagged this pose; one or more angles hit their limits");
        }
        sender.send_pose(config.robot, &pose).await?;
    }

    println!("Done.");
    Ok(())
}

fn display_status(config: &ConsoleConfig, pose: &Pose, angles: [f32; 6], flagged: bool) {
    println!("\n╔════════════════════════════════════════════════════╗");
    println!("║                   PLATFORM POSE                    ║");
    println!("╠════════════════════════════════════════════════════╣");
    println!(
        "║ Robot: {:>6}        Jog step: {:>6.2} mm           ║",
        config.robot.to_string(),
        config.jog_distance
    );
    println!(
        "║ rx: {:>8.2}°   ry: {:>8.2}°   rz: {:>8.2}°     ║",
        pose.rx, pose.ry, pose.rz
    );
    println!(
        "║ tx: {:>8.2}    ty: {:>8.2}    tz: {:>8.2}  mm  ║",
        pose.tx, pose.ty, pose.tz
    );
    println!("╠════════════════════════════════════════════════════╣");
    println!(
        "║ Motors 0-2: {:>8.2}  {:>8.2}  {:>8.2}          ║",
        angles[0], angles[1], angles[2]
    );
    println!(
        "║ Motors 3-5: {:>8.2}  {:>8.2}  {:>8.2}          ║",
        angles[3], angles[4], angles[5]
    );
    println!(
        "║ Flagged: {:>3}                                       ║",
        if flagged { "yes" } else { "no" }
    );
    println!("╚════════════════════════════════════════════════════╝");
}

fn print_help() {
    println!("\n┌────────────────────────────────────────────────┐");
    println!("│ JOG (translation):                             │");
    println!("│  k = Up    (+ty)    j = Down  (-ty)            │");
    println!("│  l = Right (+tx)    h = Left  (-tx)            │");
    println!("│  f = Fore  (+tz)    b = Back  (-tz)            │");
    println!("│                                                │");
    println!("│ SET:  rx|ry|rz <deg>    tx|ty|tz <mm>          │");
    println!("│  d = jog step    r = switch robot    0 = home  │");
    println!("│                                                │");
    println!("│ INSPECT:  json = pose JSON    x = packet hex   │");
    println!("│  q = Quit                                      │");
    println!("└────────────────────────────────────────────────┘");
}

fn set_jog_distance(config: &mut ConsoleConfig) -> Result<(), String> {
    print!("Enter jog step (mm): ");
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();

    let distance: f32 = input
        .trim()
        .parse()
        .map_err(|_| "Invalid number".to_string())?;

    if distance <= 0.0 || distance > 50.0 {
        return Err("Step must be between 0 and 50 mm".to_string());
    }

    config.jog_distance = distance;
    println!("✓ Jog step set to {:.2} mm", distance);
    Ok(())
}

fn set_component(pose: &mut Pose, axis: &str, value: f32) {
    match axis {
        "rx" => pose.rx = value,
        "ry" => pose.ry = value,
        "rz" => pose.rz = value,
        "tx" => pose.tx = value,
        "ty" => pose.ty = value,
        "tz" => pose.tz = value,
        _ => {}
    }
}

fn get_direction_offset(key: char, distance: f32) -> Pose {
    match key {
        'k' => Pose { ty: distance, ..Default::default() },
        'j' => Pose { ty: -distance, ..Default::default() },
        'l' => Pose { tx: distance, ..Default::default() },
        'h' => Pose { tx: -distance, ..Default::default() },
        'f' => Pose { tz: distance, ..Default::default() },
        'b' => Pose { tz: -distance, ..Default::default() },
        _ => Pose::default(),
    }
}

fn get_direction_name(key: char) -> &'static str {
    match key {
        'k' => "Up (+ty)",
        'j' => "Down (-ty)",
        'l' => "Right (+tx)",
        'h' => "Left (-tx)",
        'f' => "Forward (+tz)",
        'b' => "Backward (-tz)",
        _ => "Unknown",
    }
}

fn dump_packet(robot: RobotType, pose: &Pose) {
    let bytes = PosePacket::new_pose(robot, pose).to_bytes();
    println!("{} byte datagram:", bytes.len());
    for chunk in bytes.chunks(12) {
        for byte in chunk {
            print!("{:02x} ", byte);
        }
        println!();
    }
}
