//! Platform backend seam.
//!
//! The engine never talks to a window, a GPU or an audio device directly.
//! Everything host-specific goes through [`Platform`]: window events, the
//! frame clock, gamepad snapshots, the render target and audio playback.
//!
//! [`HeadlessPlatform`] is the backend used by the binary and the tests. It
//! runs a fixed number of frames with a fixed delta, records draw commands
//! in a [`RecordingTarget`] and replays a scripted gamepad timeline.
//!
//! # Input script
//!
//! ```json
//! [
//!   { "frame": 2, "pad": 0, "button": "START", "pressed": true },
//!   { "frame": 3, "pad": 0, "button": "START", "pressed": false }
//! ]
//! ```
//!
//! Entries set the state of one button starting at `frame`; the state holds
//! until a later entry changes it.

use std::path::Path;

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::render::{DrawCommand, RecordingTarget, RenderTarget};
use crate::error::EngineError;
use crate::events::audio::AudioCmd;
use crate::events::gamepad::GamepadButton;
use crate::resources::input::GamepadState;

/// Window-level notifications polled at the start of each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    CloseRequested,
    /// Toggle the debug overlay.
    ToggleDebug,
    Resized { width: u32, height: u32 },
    FocusLost,
    FocusGained,
}

pub trait Platform {
    /// Next pending window event, if any.
    fn poll_event(&mut self) -> Option<WindowEvent>;

    /// Seconds elapsed since the previous frame.
    fn frame_time(&mut self) -> f32;

    /// Button state of every connected gamepad.
    fn gamepad_states(&mut self) -> Vec<GamepadState>;

    fn target(&mut self) -> &mut dyn RenderTarget;

    /// Finish the frame.
    fn present(&mut self);

    fn play_audio(&mut self, cmd: AudioCmd);
}

/// One entry of a scripted input timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u64,
    pub pad: u32,
    pub button: GamepadButton,
    pub pressed: bool,
}

/// Gamepad timeline replayed by [`HeadlessPlatform`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(json: &str) -> Result<Self, EngineError> {
        let mut script: InputScript = serde_json::from_str(json)?;
        script.steps.sort_by_key(|s| s.frame);
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path).map_err(|source| EngineError::Asset {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Hold `button` on `pad` from `frame` on.
    pub fn press(mut self, frame: u64, pad: u32, button: GamepadButton) -> Self {
        self.push(ScriptStep { frame, pad, button, pressed: true });
        self
    }

    /// Release `button` on `pad` at `frame`.
    pub fn release(mut self, frame: u64, pad: u32, button: GamepadButton) -> Self {
        self.push(ScriptStep { frame, pad, button, pressed: false });
        self
    }

    /// Press at `frame`, release on the next frame.
    pub fn tap(self, frame: u64, pad: u32, button: GamepadButton) -> Self {
        self.press(frame, pad, button).release(frame + 1, pad, button)
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.steps.last().map(|s| s.frame)
    }

    fn push(&mut self, step: ScriptStep) {
        // keep frame order, insertion order within a frame
        let at = self.steps.partition_point(|s| s.frame <= step.frame);
        self.steps.insert(at, step);
    }
}

/// Windowless backend with a fixed frame budget.
pub struct HeadlessPlatform {
    max_frames: u64,
    dt: f32,
    frame: u64,
    close_sent: bool,
    pending: Vec<WindowEvent>,
    script: InputScript,
    cursor: usize,
    pads: FxHashMap<u32, GamepadState>,
    target: RecordingTarget,
    last_frame: Vec<DrawCommand>,
    audio_log: Vec<AudioCmd>,
}

impl HeadlessPlatform {
    /// Run `max_frames` frames of `dt` seconds, then request close.
    pub fn new(max_frames: u64, dt: f32) -> Self {
        Self {
            max_frames,
            dt,
            frame: 0,
            close_sent: false,
            pending: Vec::new(),
            script: InputScript::new(),
            cursor: 0,
            pads: FxHashMap::default(),
            target: RecordingTarget::new(),
            last_frame: Vec::new(),
            audio_log: Vec::new(),
        }
    }

    pub fn with_script(mut self, script: InputScript) -> Self {
        self.script = script;
        self.cursor = 0;
        self
    }

    /// Deliver `event` on the next poll.
    pub fn push_event(&mut self, event: WindowEvent) {
        self.pending.push(event);
    }

    /// Frames presented so far.
    pub fn frames_run(&self) -> u64 {
        self.frame
    }

    /// Draw commands of the last presented frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Text drawn in the last presented frame.
    pub fn last_frame_texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every audio command played so far.
    pub fn audio_log(&self) -> &[AudioCmd] {
        &self.audio_log
    }
}

impl Platform for HeadlessPlatform {
    fn poll_event(&mut self) -> Option<WindowEvent> {
        if !self.pending.is_empty() {
            return Some(self.pending.remove(0));
        }
        if self.frame >= self.max_frames && !self.close_sent {
            info!("headless frame budget of {} reached", self.max_frames);
            self.close_sent = true;
            return Some(WindowEvent::CloseRequested);
        }
        None
    }

    fn frame_time(&mut self) -> f32 {
        self.dt
    }

    fn gamepad_states(&mut self) -> Vec<GamepadState> {
        let steps = self.script.steps();
        while let Some(step) = steps.get(self.cursor) {
            if step.frame > self.frame {
                break;
            }
            debug!(
                "frame {}: pad {} {} {}",
                self.frame,
                step.pad,
                step.button.as_str(),
                if step.pressed { "down" } else { "up" }
            );
            self.pads
                .entry(step.pad)
                .or_insert_with(|| GamepadState::new(step.pad))
                .set(step.button, step.pressed);
            self.cursor += 1;
        }
        self.pads.values().copied().collect()
    }

    fn target(&mut self) -> &mut dyn RenderTarget {
        &mut self.target
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.target.commands);
        self.frame += 1;
    }

    fn play_audio(&mut self, cmd: AudioCmd) {
        debug!("audio: {:?}", cmd);
        self.audio_log.push(cmd);
    }
}
