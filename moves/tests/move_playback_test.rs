/// Playback simulation tests: preset moves driven by a shared clock must
/// stay inside their scaled envelope and produce poses the leg solver can
/// reach without flagging.
use moves::{Mixer, MoveLibrary, MoveLimits, Playback};
use stewart_kin::geometry::Geometry;
use stewart_kin::kinematics::solve_inverse;
use stewart_kin::packets::Packet;

fn bincode_round_trip<P: Packet + PartialEq + std::fmt::Debug>(packet: &P) -> P {
    let bytes = bincode::serialize(packet).unwrap();
    let restored = bincode::deserialize(&bytes).unwrap();
    assert_eq!(&restored, packet);
    restored
}

#[test]
fn test_preset_sampling_stays_inside_the_envelope() {
    let library = MoveLibrary::with_presets();
    let limits = MoveLimits::default();
    let mut playback = Playback::default();

    println!("\n=== Preset envelope sweep ===");
    let mut peak_ty = 0.0f32;
    for step in 0..400 {
        playback.tick(0.01);
        for slot in library.iter().take(10) {
            let pose = slot.evaluate(&playback, &limits);
            // Three unit-amplitude harmonics plus a fully biased channel
            // bound every component.
            let rotation_bound =
                3.0 * limits.max_rotation_amplitude + 0.5 * limits.max_rotation_bias;
            let translation_bound =
                3.0 * limits.max_translation_amplitude + 0.5 * limits.max_translation_bias;
            assert!(pose.rx.abs() <= rotation_bound, "{}: rx = {}", slot.name, pose.rx);
            assert!(pose.ry.abs() <= rotation_bound);
            assert!(pose.rz.abs() <= rotation_bound);
            assert!(pose.tx.abs() <= translation_bound);
            assert!(pose.ty.abs() <= translation_bound, "{}: ty = {}", slot.name, pose.ty);
            assert!(pose.tz.abs() <= translation_bound);
            if slot.name == "bounce" {
                peak_ty = peak_ty.max(pose.ty.abs());
            }
        }
        if step % 100 == 0 {
            let bounce = library.get(4).unwrap().evaluate(&playback, &limits);
            println!("t = {:.2}s  bounce ty = {:+.3}", playback.t, bounce.ty);
        }
    }
    println!("bounce peak |ty| = {:.3}", peak_ty);
    // Bounce runs one full-beat harmonic at amplitude 0.7, so over four
    // seconds of 120 BPM playback it should come close to 25 * 0.7.
    assert!(peak_ty > 17.0 && peak_ty <= 17.5 + 1e-3, "peak = {}", peak_ty);
}

#[test]
fn test_preset_offsets_solve_on_the_mx64_rig() {
    let geometry = Geometry::mx64();
    let limits = MoveLimits::from_geometry(&geometry);
    let library = MoveLibrary::with_presets();
    let mut playback = Playback::default();

    println!("\n=== Preset reachability on MX-64 ===");
    for _ in 0..16 {
        playback.tick(0.125);
        for slot in library.iter().take(10) {
            let mut pose = slot.evaluate(&playback, &limits);
            pose.ty += geometry.home_height;
            let solved = solve_inverse(&geometry, &pose);
            assert!(
                !solved.error,
                "{} at t = {} flagged the solver: {:?}",
                slot.name, playback.t, solved.motor_angles_deg
            );
            for angle in solved.motor_angles_deg.iter() {
                assert!(angle.is_finite());
            }
        }
    }
    println!("all presets reachable across two seconds of playback");
}

#[test]
fn test_loopable_presets_repeat_every_four_beats() {
    let library = MoveLibrary::with_presets();
    let limits = MoveLimits::default();

    // Harmonics run at full, half and quarter beat rate, so four beats is
    // a common period. At the default 120 BPM that is two seconds.
    for slot in library.iter().take(10) {
        if !slot.has_flag(moves::FLAG_LOOPABLE) {
            continue;
        }
        for &t in [0.125f32, 0.375, 0.625, 1.0].iter() {
            let mut early = Playback::default();
            early.tick(t);
            let mut late = Playback::default();
            late.tick(t + 2.0);

            let first = slot.evaluate(&early, &limits);
            let second = slot.evaluate(&late, &limits);
            assert!((first.rx - second.rx).abs() < 0.01, "{} rx drifted", slot.name);
            assert!((first.ry - second.ry).abs() < 0.01);
            assert!((first.rz - second.rz).abs() < 0.01);
            assert!((first.tx - second.tx).abs() < 0.01);
            assert!((first.ty - second.ty).abs() < 0.01, "{} ty drifted", slot.name);
            assert!((first.tz - second.tz).abs() < 0.01);
        }
    }
}

#[test]
fn test_crossfade_sweep_is_continuous() {
    let library = MoveLibrary::with_presets();
    let limits = MoveLimits::default();
    let mut playback = Playback::default();
    playback.tick(0.3);

    let mut mixer = Mixer::new();
    mixer.set_deck_a(1);
    mixer.set_deck_b(6);

    let mut previous = mixer.evaluate(&library, &playback, &limits);
    for step in 1..=20 {
        mixer.set_crossfade(step as f32 / 20.0);
        let current = mixer.evaluate(&library, &playback, &limits);
        // A 5% fader step at fixed time can only move each component a
        // twentieth of the span between the pure deck outputs.
        assert!((current.rx - previous.rx).abs() < 5.0);
        assert!((current.tx - previous.tx).abs() < 5.0);
        assert!((current.tz - previous.tz).abs() < 5.0);
        previous = current;
    }

    // The endpoints are the pure decks.
    mixer.set_crossfade(0.0);
    let deck_a = mixer.evaluate(&library, &playback, &limits);
    let nod = library.get(1).unwrap().evaluate(&playback, &limits);
    assert!((deck_a.rx - nod.rx).abs() < 1e-5);
    assert_eq!(deck_a.tx, 0.0);
}

#[test]
fn test_move_bincode_round_trip() {
    let library = MoveLibrary::with_presets();
    let complex = library.get(7).unwrap();
    let restored = bincode_round_trip(complex);
    assert_eq!(restored.name, "complex");
    assert!(restored.has_flag(moves::FLAG_PRESET));
}
