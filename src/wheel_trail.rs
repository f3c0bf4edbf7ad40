use crate::car::WheelIndex;
use crate::input::clamp_delta;
use crate::ribbon::RibbonMesh;
use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub trail_width: f32,
    /// Seconds between two decay steps.
    pub fade_interval: f32,
    pub max_points: usize,
    pub min_point_spacing: f32,
    /// Points a trail keeps through decay while the car is still driving.
    pub min_retained_points: usize,
    pub ground_height: f32,
}

impl Default for TrailConfig {
    fn default() -> TrailConfig {
        TrailConfig {
            trail_width: 0.2,
            fade_interval: 0.1,
            max_points: 200,
            min_point_spacing: 0.2,
            min_retained_points: 2,
            ground_height: 0.05,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TrailPhase {
    Empty,
    Growing,
    SteadyFading,
    Disposed,
}

#[derive(Debug, Clone, Default)]
struct WheelTrail {
    points: VecDeque<Vec3>,
    ribbon: RibbonMesh,
    revision: u64,
    grew: bool,
    dirty: bool,
}

impl WheelTrail {
    fn push(&mut self, p: Vec3, config: &TrailConfig) -> bool {
        if let Some(last) = self.points.back() {
            if last.distance(p) <= config.min_point_spacing {
                return false;
            }
        }

        self.points.push_back(p);
        while self.points.len() > config.max_points {
            self.points.pop_front();
        }
        self.grew = true;
        self.dirty = true;
        true
    }

    fn trim(&mut self, keep: usize) {
        if self.points.len() > keep {
            self.points.pop_front();
            self.dirty = true;
        }
    }

    fn rebuild(&mut self, width: f32) {
        if self.dirty {
            self.ribbon = RibbonMesh::build(self.points.iter().copied(), width);
            self.revision += 1;
            self.dirty = false;
        }
    }

    fn release(&mut self) {
        self.points = VecDeque::new();
        self.ribbon = RibbonMesh::empty();
        self.revision += 1;
        self.grew = false;
        self.dirty = false;
    }
}

/// Per-wheel light trails: motion appends points, a fixed cadence trims the
/// oldest ones, and each change rebuilds that wheel's ribbon.
#[derive(Debug, Clone)]
pub struct TrailSystem {
    config: TrailConfig,
    trails: [WheelTrail; 4],
    decay_timer: f32,
    disposed: bool,
}

impl TrailSystem {
    pub fn new(config: TrailConfig) -> TrailSystem {
        TrailSystem {
            config,
            trails: Default::default(),
            decay_timer: 0.0,
            disposed: false,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn update(&mut self, delta_time: f32, wheel_positions: &[Vec3; 4], is_moving: bool) {
        if self.disposed {
            return;
        }

        let dt = clamp_delta(delta_time, f32::MAX);
        for trail in self.trails.iter_mut() {
            trail.grew = false;
        }

        if is_moving {
            for (trail, p) in self.trails.iter_mut().zip(wheel_positions.iter()) {
                trail.push(Vec3::new(p.x, self.config.ground_height, p.z), &self.config);
            }
        }

        // A parked car lets its trails run out completely.
        let keep = if is_moving {
            self.config.min_retained_points
        } else {
            0
        };

        // At most one step per update, however long the tick.
        self.decay_timer += dt;
        if self.decay_timer > self.config.fade_interval {
            self.decay_timer = 0.0;
            self.decay_step(keep);
        }

        for trail in self.trails.iter_mut() {
            trail.rebuild(self.config.trail_width);
        }
    }

    fn decay_step(&mut self, keep: usize) {
        for trail in self.trails.iter_mut() {
            trail.trim(keep);
        }
    }

    pub fn clear(&mut self) {
        for trail in self.trails.iter_mut() {
            trail.release();
        }
        self.decay_timer = 0.0;
        debug!("trails cleared");
    }

    /// Drops every point and ribbon; later updates are ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.clear();
        self.disposed = true;
        debug!("trail system disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn points(&self, wheel: WheelIndex) -> &VecDeque<Vec3> {
        &self.trails[wheel.index()].points
    }

    pub fn ribbon(&self, wheel: WheelIndex) -> &RibbonMesh {
        &self.trails[wheel.index()].ribbon
    }

    /// Bumped whenever the ribbon is replaced.
    pub fn ribbon_revision(&self, wheel: WheelIndex) -> u64 {
        self.trails[wheel.index()].revision
    }

    pub fn phase(&self, wheel: WheelIndex) -> TrailPhase {
        let trail = &self.trails[wheel.index()];
        if self.disposed {
            TrailPhase::Disposed
        } else if trail.points.is_empty() {
            TrailPhase::Empty
        } else if trail.grew {
            TrailPhase::Growing
        } else {
            TrailPhase::SteadyFading
        }
    }

    pub fn total_points(&self) -> usize {
        self.trails.iter().map(|t| t.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn wheels_at(z: f32) -> [Vec3; 4] {
        [
            Vec3::new(-0.8, 0.05, z + 1.3),
            Vec3::new(0.8, 0.05, z + 1.3),
            Vec3::new(-0.8, 0.05, z - 1.3),
            Vec3::new(0.8, 0.05, z - 1.3),
        ]
    }

    fn assert_spacing(trails: &TrailSystem) {
        let spacing = trails.config().min_point_spacing;
        for wheel in WheelIndex::ALL.iter().copied() {
            let pts = trails.points(wheel);
            for (a, b) in pts.iter().zip(pts.iter().skip(1)) {
                assert!(a.distance(*b) > spacing);
            }
        }
    }

    #[test]
    fn first_point_starts_growing() {
        let mut trails = TrailSystem::new(TrailConfig::default());
        assert_eq!(trails.phase(WheelIndex::FrontLeft), TrailPhase::Empty);

        trails.update(DT, &wheels_at(0.0), true);
        assert_eq!(trails.phase(WheelIndex::FrontLeft), TrailPhase::Growing);
        assert_eq!(trails.points(WheelIndex::FrontLeft).len(), 1);
        assert!(trails.ribbon(WheelIndex::FrontLeft).is_empty());

        trails.update(DT, &wheels_at(0.5), true);
        assert_eq!(trails.ribbon(WheelIndex::FrontLeft).segment_count(), 1);

        trails.update(DT, &wheels_at(0.5), true);
        assert_eq!(trails.phase(WheelIndex::FrontLeft), TrailPhase::SteadyFading);
    }

    #[test]
    fn near_duplicates_are_skipped() {
        let mut trails = TrailSystem::new(TrailConfig::default());
        for i in 0..600 {
            trails.update(DT, &wheels_at(i as f32 * 0.05), true);
            assert_spacing(&trails);
        }
        assert!(trails.points(WheelIndex::BackRight).len() > 10);
    }

    #[test]
    fn points_are_projected_to_the_ground() {
        let mut trails = TrailSystem::new(TrailConfig::default());
        let mut wheels = wheels_at(0.0);
        wheels[0].y = 3.0;
        trails.update(DT, &wheels, true);
        assert_eq!(trails.points(WheelIndex::FrontRight)[0].y, 0.05);
    }

    #[test]
    fn history_is_capped() {
        let config = TrailConfig {
            max_points: 20,
            fade_interval: 100.0,
            ..Default::default()
        };
        let mut trails = TrailSystem::new(config);
        for i in 0..100 {
            trails.update(DT, &wheels_at(i as f32), true);
            assert!(trails.points(WheelIndex::FrontRight).len() <= 20);
        }
        let pts = trails.points(WheelIndex::FrontRight);
        assert_eq!(pts.len(), 20);
        assert_eq!(pts[0].z, 80.0 + 1.3);
        assert_eq!(trails.ribbon(WheelIndex::FrontRight).segment_count(), 19);
    }

    #[test]
    fn decay_keeps_a_stub_while_driving() {
        let mut trails = TrailSystem::new(TrailConfig::default());
        for i in 0..10 {
            trails.update(DT, &wheels_at(i as f32), true);
        }
        // Creeping forward slower than the point spacing.
        for _ in 0..600 {
            trails.update(DT, &wheels_at(9.1), true);
        }
        assert_eq!(trails.points(WheelIndex::BackLeft).len(), 2);
        assert_eq!(trails.ribbon(WheelIndex::BackLeft).segment_count(), 1);
    }

    #[test]
    fn parked_trails_drain() {
        let mut trails = TrailSystem::new(TrailConfig::default());
        for i in 0..50 {
            trails.update(DT, &wheels_at(i as f32), true);
        }
        let revision = trails.ribbon_revision(WheelIndex::FrontRight);

        let mut t = 0.0;
        while t < 8.0 {
            trails.update(DT, &wheels_at(0.0), false);
            t += DT;
        }
        for wheel in WheelIndex::ALL.iter().copied() {
            assert!(trails.points(wheel).is_empty());
            assert!(trails.ribbon(wheel).is_empty());
            assert_eq!(trails.phase(wheel), TrailPhase::Empty);
        }
        assert!(trails.ribbon_revision(WheelIndex::FrontRight) > revision);
    }

    #[test]
    fn decay_runs_on_a_fixed_cadence() {
        let config = TrailConfig {
            fade_interval: 0.5,
            ..Default::default()
        };
        let mut trails = TrailSystem::new(config);
        for i in 0..10 {
            trails.update(0.01, &wheels_at(i as f32), true);
        }
        assert_eq!(trails.total_points(), 40);

        trails.update(0.35, &wheels_at(0.0), false);
        assert_eq!(trails.total_points(), 40);
        trails.update(0.1, &wheels_at(0.0), false);
        assert_eq!(trails.total_points(), 36);
        // The timer restarts from zero after each step.
        trails.update(0.45, &wheels_at(0.0), false);
        assert_eq!(trails.total_points(), 36);
        // Reaching the interval exactly is not enough.
        trails.update(0.05, &wheels_at(0.0), false);
        assert_eq!(trails.total_points(), 36);
        trails.update(0.01, &wheels_at(0.0), false);
        assert_eq!(trails.total_points(), 32);
    }

    #[test]
    fn long_tick_drops_a_single_point() {
        let config = TrailConfig {
            fade_interval: 0.1,
            ..Default::default()
        };
        let mut trails = TrailSystem::new(config);
        for i in 0..20 {
            trails.update(0.001, &wheels_at(i as f32), true);
        }
        let before = trails.points(WheelIndex::FrontLeft).len();
        assert_eq!(before, 20);

        trails.update(0.35, &wheels_at(19.0), true);
        assert_eq!(trails.points(WheelIndex::FrontLeft).len(), before - 1);

        trails.update(10.0, &wheels_at(19.0), false);
        assert_eq!(trails.points(WheelIndex::FrontLeft).len(), before - 2);
    }

    #[test]
    fn dispose_releases_everything() {
        let mut trails = TrailSystem::new(TrailConfig::default());
        for i in 0..10 {
            trails.update(DT, &wheels_at(i as f32), true);
        }
        trails.dispose();
        assert!(trails.is_disposed());
        assert_eq!(trails.total_points(), 0);
        for wheel in WheelIndex::ALL.iter().copied() {
            assert!(trails.ribbon(wheel).is_empty());
            assert_eq!(trails.phase(wheel), TrailPhase::Disposed);
        }

        trails.update(DT, &wheels_at(20.0), true);
        assert_eq!(trails.total_points(), 0);
    }
}
