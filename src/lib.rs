//! Kinematic car that paints decaying neon ribbons behind its wheels.
//!
//! [`Sandbox`] is the per-frame entry point; renderers read the ribbons back
//! through [`TrailSystem`].

pub mod car;
pub mod config;
pub mod input;
pub mod playback;
pub mod ribbon;
pub mod sandbox;
pub mod wander;
pub mod wheel_trail;

pub use crate::car::{Car, CarConfig, CarState, WheelIndex};
pub use crate::config::{ConfigError, ConfigWatcher, SandboxConfig};
pub use crate::input::{DirectionalInput, DriveKey, KeyState};
pub use crate::playback::{DriveRecorder, DriveRecording, DriveState, Playback, RecordingError};
pub use crate::ribbon::RibbonMesh;
pub use crate::sandbox::{FixedStep, Sandbox, TickReport};
pub use crate::wander::WanderDriver;
pub use crate::wheel_trail::{TrailConfig, TrailPhase, TrailSystem};
