use neontrail::{
    Car, CarConfig, CarState, DirectionalInput, DriveRecorder, FixedStep, Playback, Sandbox,
    SandboxConfig, TrailConfig, TrailSystem, WanderDriver, WheelIndex,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

const DT: f32 = 1.0 / 60.0;

fn assert_same_state(a: &Sandbox, b: &Sandbox) {
    let (sa, sb) = (a.car().state(), b.car().state());
    assert_eq!(sa.heading.to_bits(), sb.heading.to_bits());
    assert_eq!(sa.speed.to_bits(), sb.speed.to_bits());
    assert_eq!(sa.position.x.to_bits(), sb.position.x.to_bits());
    assert_eq!(sa.position.z.to_bits(), sb.position.z.to_bits());
    for wheel in WheelIndex::ALL.iter().copied() {
        assert_eq!(a.trails().points(wheel), b.trails().points(wheel));
        assert_eq!(a.trails().ribbon(wheel), b.trails().ribbon(wheel));
    }
}

#[test]
fn replaying_a_drive_is_bit_identical() {
    let mut wander = WanderDriver::new(2024);
    let mut recorder = DriveRecorder::new(DT);
    let mut live = Sandbox::new(SandboxConfig::default());

    for _ in 0..3000 {
        let input = wander.next_input(DT);
        recorder.record(input);
        live.tick(DT, input);
    }
    assert!(live.trails().total_points() > 0);

    let recording = recorder.finish();
    let mut first = Sandbox::new(SandboxConfig::default());
    let mut second = Sandbox::new(SandboxConfig::default());
    first.run(recording.tick_seconds, Playback::new(&recording));
    second.run(recording.tick_seconds, Playback::new(&recording));

    assert_same_state(&first, &second);
    assert_same_state(&first, &live);
}

#[test]
fn uneven_frames_replay_from_fixed_ticks() {
    let mut rng = XorShiftRng::seed_from_u64(31);
    let mut wander = WanderDriver::new(8);
    let mut clock = FixedStep::new(DT);
    let mut recorder = DriveRecorder::new(clock.step());
    let mut live = Sandbox::new(SandboxConfig::default());
    let max_delta = live.config().car.max_delta;

    for _ in 0..2000 {
        let frame = rng.gen_range(0.002..0.05);
        let input = wander.next_input(frame);
        for _ in 0..clock.advance(frame, max_delta) {
            recorder.record(input);
            live.tick(clock.step(), input);
        }
    }
    assert!(live.ticks() > 1000);

    let recording = recorder.finish();
    assert_eq!(recording.tick_count() as u64, live.ticks());
    let mut replay = Sandbox::new(SandboxConfig::default());
    replay.run(recording.tick_seconds, Playback::new(&recording));
    assert_same_state(&replay, &live);
}

#[test]
fn invariants_hold_under_random_driving() {
    let mut rng = XorShiftRng::seed_from_u64(11);
    let mut wander = WanderDriver::new(5);
    let mut sandbox = Sandbox::new(SandboxConfig::default());
    let config = *sandbox.config();

    for _ in 0..6000 {
        let dt = rng.gen_range(0.0..0.15);
        let report = sandbox.tick(dt, wander.next_input(dt));

        assert!(report.car.speed <= config.car.max_speed);
        assert!(report.car.speed >= config.car.min_speed());

        for wheel in WheelIndex::ALL.iter().copied() {
            let pts = sandbox.trails().points(wheel);
            assert!(pts.len() <= config.trail.max_points);
            for (a, b) in pts.iter().zip(pts.iter().skip(1)) {
                assert!(a.distance(*b) > config.trail.min_point_spacing);
            }
            let ribbon = sandbox.trails().ribbon(wheel);
            assert_eq!(ribbon.segment_count(), pts.len().saturating_sub(1));
        }
    }
}

#[test]
fn straight_cruise_reaches_equilibrium() {
    let car_config = CarConfig::default();
    let start = CarState {
        position: Vec3::new(0.0, car_config.ride_height, 0.0),
        heading: 0.0,
        speed: car_config.max_speed,
        moving: true,
    };
    let mut car = Car::with_state(car_config, start);
    let trail_config = TrailConfig {
        fade_interval: 0.1,
        max_points: 200,
        min_point_spacing: 0.2,
        ..Default::default()
    };
    let mut trails = TrailSystem::new(trail_config);

    let ticks = (5.0 / DT) as usize;
    for tick in 0..ticks {
        let state = car.update(DT, DirectionalInput::new(0.0, 1.0));
        assert_eq!(state.speed, car_config.max_speed);
        trails.update(DT, &car.wheel_positions(), state.moving);

        if tick >= ticks - 30 {
            for wheel in WheelIndex::ALL.iter().copied() {
                let len = trails.points(wheel).len();
                assert!(len == 199 || len == 200, "len {}", len);
            }
        }
    }
}

#[test]
fn parked_car_trails_run_out() {
    let mut sandbox = Sandbox::new(SandboxConfig::default());
    sandbox.run(DT, vec![DirectionalInput::new(0.3, 1.0); 300]);
    assert!(sandbox.trails().total_points() > 0);

    let mut coast = 0;
    while sandbox.car().is_moving() {
        sandbox.tick(DT, DirectionalInput::NEUTRAL);
        coast += 1;
        assert!(coast < 1000);
    }
    assert_eq!(sandbox.car().state().speed, 0.0);

    let trail = sandbox.config().trail;
    // A decay step fires on the first tick past the interval.
    let hold = trail.max_points as f32 * (trail.fade_interval + DT) + 1.0;
    let parked_at = sandbox.car().state().position;
    sandbox.run(DT, vec![DirectionalInput::NEUTRAL; (hold / DT) as usize]);

    assert_eq!(sandbox.car().state().position, parked_at);
    for wheel in WheelIndex::ALL.iter().copied() {
        assert!(sandbox.trails().points(wheel).len() < 2);
        assert!(sandbox.trails().ribbon(wheel).is_empty());
    }
}

#[test]
fn disposing_releases_all_ribbons() {
    let mut sandbox = Sandbox::new(SandboxConfig::default());
    sandbox.run(DT, vec![DirectionalInput::new(-1.0, 1.0); 200]);
    assert!(!sandbox.trails().ribbon(WheelIndex::BackLeft).is_empty());

    sandbox.dispose();
    sandbox.run(DT, vec![DirectionalInput::new(-1.0, 1.0); 20]);
    assert_eq!(sandbox.trails().total_points(), 0);
    for wheel in WheelIndex::ALL.iter().copied() {
        assert!(sandbox.trails().ribbon(wheel).is_empty());
    }
}
