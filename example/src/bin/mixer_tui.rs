// Two-deck move mixer with TUI, streaming blended poses to the visualizer
// Run with: cargo run -p example --bin mixer_tui
// Point a viewer at UDP 9001 to watch the platform follow the mix

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::interval;

use moves::{Mixer, MoveLibrary, MoveLimits, Playback};
use stewart_kin::{
    drivers::{VizConfig, VizSender},
    geometry::Geometry,
    kinematics::solve_inverse,
    Pose, RobotType,
};

const FRAME_MS: u64 = 33;

struct AppState {
    robot: RobotType,
    geometry: Geometry,
    limits: MoveLimits,
    library: MoveLibrary,
    mixer: Mixer,
    playback: Playback,
    last_pose: Pose,
    last_angles: [f32; 6],
    last_flagged: bool,
    event_log: VecDeque<String>,
    status_message: String,
    should_quit: bool,
}

impl AppState {
    fn new() -> Self {
        let robot = RobotType::Mx64;
        let geometry = Geometry::from_robot(robot);
        let mut mixer = Mixer::new();
        mixer.set_deck_a(4); // bounce
        mixer.set_deck_b(1); // nod
        Self {
            robot,
            limits: MoveLimits::from_geometry(&geometry),
            last_pose: Pose::home(geometry.home_height),
            geometry,
            library: MoveLibrary::with_presets(),
            mixer,
            playback: Playback::default(),
            last_angles: [0.0; 6],
            last_flagged: false,
            event_log: VecDeque::new(),
            status_message: "Streaming".to_string(),
            should_quit: false,
        }
    }

    fn log(&mut self, message: String) {
        self.event_log.push_back(message);
        if self.event_log.len() > 50 {
            self.event_log.pop_front();
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
    }

    fn deck_name(&self, slot: usize) -> String {
        match self.library.get(slot) {
            Some(entry) if !entry.name.is_empty() => entry.name.clone(),
            _ => format!("slot {}", slot),
        }
    }

    fn switch_robot(&mut self) {
        self.robot = match self.robot {
            RobotType::Mx64 => RobotType::Ax18,
            RobotType::Ax18 => RobotType::Mx64,
        };
        self.geometry = Geometry::from_robot(self.robot);
        self.limits = MoveLimits::from_geometry(&self.geometry);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let sender = VizSender::bind(VizConfig::default())
        .await
        .map_err(|e| format!("Failed to bind: {}", e))?;

    let app_state = Arc::new(Mutex::new(AppState::new()));

    // Streamer: tick the clock, blend the decks, solve and send
    let streamer_state = Arc::clone(&app_state);
    let streamer_sender = sender.clone();
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(FRAME_MS));
        loop {
            tick.tick().await;
            let (robot, pose) = {
                let mut state = streamer_state.lock().await;
                if state.should_quit {
                    break;
                }
                state.playback.tick(FRAME_MS as f32 / 1000.0);
                let mut pose =
                    state
                        .mixer
                        .evaluate(&state.library, &state.playback, &state.limits);
                pose.ty += state.geometry.home_height;

                let solved = solve_inverse(&state.geometry, &pose);
                state.last_pose = pose;
                state.last_angles = solved.motor_angles_deg;
                if solved.error && !state.last_flagged {
                    state.log("Solver clamp engaged".to_string());
                }
                state.last_flagged = solved.error;
                (state.robot, pose)
            };
            let _ = streamer_sender.send_pose(robot, &pose).await;
        }
    });

    // Run the app
    let res = run_app(&mut terminal, sender, app_state).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    sender: VizSender,
    app_state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Render UI
        {
            let state = app_state.lock().await;
            terminal.draw(|f| ui(f, &state))?;
            if state.should_quit {
                break;
            }
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                let mut state = app_state.lock().await;
                handle_key_event(key.code, &mut state);
            }
        }
    }

    // Park the platform before leaving
    let state = app_state.lock().await;
    let home = Pose::home(state.geometry.home_height);
    let _ = sender.send_pose(state.robot, &home).await;

    Ok(())
}

fn ui(f: &mut Frame, state: &AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Mixer panel
            Constraint::Min(10),    // Data panels
            Constraint::Length(8),  // Help panel
        ])
        .split(f.area());

    render_mixer_panel(f, main_chunks[0], state);

    let data_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30), // Library
            Constraint::Percentage(40), // Pose & motors
            Constraint::Percentage(30), // Event log
        ])
        .split(main_chunks[1]);

    render_library_panel(f, data_chunks[0], state);
    render_pose_panel(f, data_chunks[1], state);
    render_log_panel(f, data_chunks[2], state);

    render_help_panel(f, main_chunks[2]);
}

fn render_mixer_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let filled = (state.mixer.crossfader * 20.0).round() as usize;
    let gauge = format!("A {}{} B", "█".repeat(filled), "░".repeat(20 - filled));

    let mixer_text = vec![
        Line::from(vec![
            Span::styled("Deck A: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:<10}", state.deck_name(state.mixer.deck_a)),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!("  vol {:.1}", state.mixer.volume_a)),
        ]),
        Line::from(vec![
            Span::styled("Deck B: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{:<10}", state.deck_name(state.mixer.deck_b)),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(
                "  vol {:.1}  phase +{:.3} beats",
                state.mixer.volume_b, state.mixer.phase_offset_b
            )),
        ]),
        Line::from(vec![
            Span::styled("Crossfade: ", Style::default().fg(Color::Cyan)),
            Span::raw(gauge),
            Span::raw(format!("  {:.2}", state.mixer.crossfader)),
        ]),
        Line::from(vec![
            Span::styled("Clock: ", Style::default().fg(Color::Cyan)),
            Span::raw(format!(
                "{:.0} BPM  master volume {:.2}  robot {}",
                state.playback.bpm, state.playback.master_volume, state.robot
            )),
        ]),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Cyan)),
            Span::raw(&state.status_message),
        ]),
    ];

    let mixer_block = Paragraph::new(mixer_text)
        .block(Block::default().borders(Borders::ALL).title("Mixer"));
    f.render_widget(mixer_block, area);
}

fn render_library_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .library
        .iter()
        .take(10)
        .enumerate()
        .map(|(slot, entry)| {
            let marker = if slot == state.mixer.deck_a && slot == state.mixer.deck_b {
                "AB"
            } else if slot == state.mixer.deck_a {
                "A "
            } else if slot == state.mixer.deck_b {
                " B"
            } else {
                "  "
            };
            let style = if slot == state.mixer.deck_a {
                Style::default().fg(Color::Green)
            } else if slot == state.mixer.deck_b {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(Color::Magenta)),
                Span::styled(format!("{:>2}  {}", slot, entry.name), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Library")
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(list, area);
}

fn render_pose_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let mut lines = vec![];

    lines.push(Line::from(vec![Span::styled(
        "Pose",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]));
    lines.push(Line::from(vec![
        Span::styled("  rot: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "{:+6.2}  {:+6.2}  {:+6.2} deg",
            state.last_pose.rx, state.last_pose.ry, state.last_pose.rz
        )),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  pos: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "{:+7.2} {:7.2} {:+7.2} mm",
            state.last_pose.tx, state.last_pose.ty, state.last_pose.tz
        )),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Motors",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]));
    lines.push(Line::from(vec![
        Span::styled("  0-2: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "{:7.2}  {:7.2}  {:7.2}",
            state.last_angles[0], state.last_angles[1], state.last_angles[2]
        )),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  3-5: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "{:7.2}  {:7.2}  {:7.2}",
            state.last_angles[3], state.last_angles[4], state.last_angles[5]
        )),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Limits: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            if state.last_flagged { "clamped" } else { "clear" },
            Style::default().fg(if state.last_flagged {
                Color::Red
            } else {
                Color::Green
            }),
        ),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Platform")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(paragraph, area);
}

fn render_log_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let items: Vec<ListItem> = if state.event_log.is_empty() {
        vec![ListItem::new(Line::from(vec![Span::styled(
            "Nothing yet",
            Style::default().fg(Color::DarkGray),
        )]))]
    } else {
        state
            .event_log
            .iter()
            .rev()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::Green)),
                    Span::raw(entry),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Events")
            .border_style(Style::default().fg(Color::Green)),
    );
    f.render_widget(list, area);
}

fn render_help_panel(f: &mut Frame, area: ratatui::layout::Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Decks:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  a/A=Deck A next/prev   b/B=Deck B next/prev   s=Swap decks"),
        Line::from(Span::styled(
            "Mix:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Left/Right=Crossfade   [ ]=Volume A   { }=Volume B   p=Deck B phase"),
        Line::from(Span::styled(
            "Clock:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  +/-=Tempo   m=Master volume   r=Switch robot   q=Quit"),
    ];

    let help_block =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help_block, area);
}

fn handle_key_event(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('q') => {
            state.should_quit = true;
        }
        KeyCode::Char('a') => {
            let next = (state.mixer.deck_a + 1) % 10;
            state.mixer.set_deck_a(next);
            state.set_status(format!("Deck A -> {}", state.deck_name(next)));
        }
        KeyCode::Char('A') => {
            let previous = (state.mixer.deck_a + 9) % 10;
            state.mixer.set_deck_a(previous);
            state.set_status(format!("Deck A -> {}", state.deck_name(previous)));
        }
        KeyCode::Char('b') => {
            let next = (state.mixer.deck_b + 1) % 10;
            state.mixer.set_deck_b(next);
            state.set_status(format!("Deck B -> {}", state.deck_name(next)));
        }
        KeyCode::Char('B') => {
            let previous = (state.mixer.deck_b + 9) % 10;
            state.mixer.set_deck_b(previous);
            state.set_status(format!("Deck B -> {}", state.deck_name(previous)));
        }
        KeyCode::Left => {
            let position = state.mixer.crossfader - 0.05;
            state.mixer.set_crossfade(position);
            state.set_status(format!("Crossfade {:.2}", state.mixer.crossfader));
        }
        KeyCode::Right => {
            let position = state.mixer.crossfader + 0.05;
            state.mixer.set_crossfade(position);
            state.set_status(format!("Crossfade {:.2}", state.mixer.crossfader));
        }
        KeyCode::Char('[') => {
            state.mixer.volume_a = (state.mixer.volume_a - 0.1).max(0.0);
            state.set_status(format!("Volume A {:.1}", state.mixer.volume_a));
        }
        KeyCode::Char(']') => {
            state.mixer.volume_a = (state.mixer.volume_a + 0.1).min(1.0);
            state.set_status(format!("Volume A {:.1}", state.mixer.volume_a));
        }
        KeyCode::Char('{') => {
            state.mixer.volume_b = (state.mixer.volume_b - 0.1).max(0.0);
            state.set_status(format!("Volume B {:.1}", state.mixer.volume_b));
        }
        KeyCode::Char('}') => {
            state.mixer.volume_b = (state.mixer.volume_b + 0.1).min(1.0);
            state.set_status(format!("Volume B {:.1}", state.mixer.volume_b));
        }
        KeyCode::Char('s') => {
            state.mixer.swap_decks();
            let a = state.deck_name(state.mixer.deck_a);
            let b = state.deck_name(state.mixer.deck_b);
            state.log(format!("Swapped decks: A={} B={}", a, b));
        }
        KeyCode::Char('p') => {
            let beats = state.mixer.phase_offset_b + 0.125;
            state.mixer.set_phase_offset(beats);
            state.set_status(format!(
                "Deck B phase +{:.3} beats",
                state.mixer.phase_offset_b
            ));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let bpm = state.playback.bpm + 10.0;
            state.playback.set_bpm(bpm);
            state.set_status(format!("{:.0} BPM", state.playback.bpm));
        }
        KeyCode::Char('-') => {
            let bpm = state.playback.bpm - 10.0;
            state.playback.set_bpm(bpm);
            state.set_status(format!("{:.0} BPM", state.playback.bpm));
        }
        KeyCode::Char('m') => {
            state.playback.master_volume = if state.playback.master_volume <= 0.0 {
                1.0
            } else {
                (state.playback.master_volume - 0.25).max(0.0)
            };
            state.set_status(format!(
                "Master volume {:.2}",
                state.playback.master_volume
            ));
        }
        KeyCode::Char('r') => {
            state.switch_robot();
            let robot = state.robot;
            state.log(format!("Robot -> {}", robot));
        }
        _ => {}
    }
}
