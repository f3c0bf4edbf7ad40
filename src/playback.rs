use crate::input::DirectionalInput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// An input held for `update_id + 1` consecutive ticks.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize)]
pub struct DriveState {
    pub turn: f32,
    pub throttle: f32,
    pub update_id: usize,
}

impl PartialEq for DriveState {
    fn eq(&self, other: &Self) -> bool {
        self.turn.eq(&other.turn) && self.throttle.eq(&other.throttle)
    }
}

impl DriveState {
    pub fn from_input(input: DirectionalInput) -> DriveState {
        DriveState {
            turn: input.turn,
            throttle: input.throttle,
            update_id: 0,
        }
    }

    pub fn input(&self) -> DirectionalInput {
        DirectionalInput::new(self.turn, self.throttle)
    }
}

#[derive(Debug)]
pub enum RecordingError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for RecordingError {
    fn from(e: std::io::Error) -> Self {
        RecordingError::IoError(e)
    }
}
impl From<serde_json::Error> for RecordingError {
    fn from(e: serde_json::Error) -> Self {
        RecordingError::SerdeError(e)
    }
}

impl fmt::Display for RecordingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordingError::IoError(e) => write!(f, "recording io error: {}", e),
            RecordingError::SerdeError(e) => write!(f, "malformed recording: {}", e),
        }
    }
}

impl std::error::Error for RecordingError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveRecording {
    pub tick_seconds: f32,
    pub states: Vec<DriveState>,
}

impl DriveRecording {
    pub fn tick_count(&self) -> usize {
        self.states.iter().map(|s| s.update_id + 1).sum()
    }

    pub fn duration_secs(&self) -> f32 {
        self.tick_count() as f32 * self.tick_seconds
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<DriveRecording, RecordingError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), RecordingError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Run-length encodes the per-tick input stream.
#[derive(Debug, Clone)]
pub struct DriveRecorder {
    tick_seconds: f32,
    state: Option<DriveState>,
    states: Vec<DriveState>,
}

impl DriveRecorder {
    pub fn new(tick_seconds: f32) -> DriveRecorder {
        DriveRecorder {
            tick_seconds,
            state: None,
            states: vec![],
        }
    }

    pub fn record(&mut self, input: DirectionalInput) {
        let new_state = DriveState::from_input(input);

        if let Some(state) = self.state.as_mut() {
            if *state == new_state {
                state.update_id += 1;
                return;
            }
            self.states.push(*state);
        }
        self.state = Some(new_state);
    }

    pub fn clear(&mut self) {
        self.state = None;
        self.states = vec![];
    }

    pub fn snapshot(&self) -> DriveRecording {
        let mut states = self.states.clone();
        states.extend(self.state);
        DriveRecording {
            tick_seconds: self.tick_seconds,
            states,
        }
    }

    pub fn finish(self) -> DriveRecording {
        let mut states = self.states;
        states.extend(self.state);
        DriveRecording {
            tick_seconds: self.tick_seconds,
            states,
        }
    }
}

/// Yields one input per tick until the recording runs out.
#[derive(Debug, Clone)]
pub struct Playback {
    state_stack: Vec<DriveState>,
    update_id: usize,
}

impl Playback {
    pub fn new(recording: &DriveRecording) -> Playback {
        let mut state_stack = recording.states.clone();
        state_stack.reverse();

        Playback {
            state_stack,
            update_id: 0,
        }
    }
}

impl Iterator for Playback {
    type Item = DirectionalInput;

    fn next(&mut self) -> Option<DirectionalInput> {
        let state = *self.state_stack.last()?;
        if state.update_id == self.update_id {
            self.state_stack.pop();
            self.update_id = 0;
        } else {
            self.update_id += 1;
        }
        Some(state.input())
    }
}
