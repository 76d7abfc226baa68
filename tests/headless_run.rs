//! Whole-program runs against a recording canvas and a fake audio channel.

use std::cell::Cell;
use std::rc::Rc;

use cubestream::audio::{AudioChannel, AudioError, LoopBuffer, PlaybackState};
use cubestream::context::SimulationContext;
use cubestream::params::{Mood, RenderConfig};
use cubestream::rendering::{DrawCommand, DrawList};
use cubestream::scene::{InputEvent, Key, SceneState};

/// Channel that finishes its plays after a fixed number of busy polls
struct ScriptedChannel {
    busy_for: u32,
    remaining: Cell<u32>,
    plays: Rc<Cell<u32>>,
    last_frames: Rc<Cell<usize>>,
}

impl ScriptedChannel {
    fn new(busy_for: u32) -> (Self, Rc<Cell<u32>>, Rc<Cell<usize>>) {
        let plays = Rc::new(Cell::new(0));
        let frames = Rc::new(Cell::new(0));
        let channel = Self {
            busy_for,
            remaining: Cell::new(0),
            plays: Rc::clone(&plays),
            last_frames: Rc::clone(&frames),
        };
        (channel, plays, frames)
    }
}

impl AudioChannel for ScriptedChannel {
    fn is_busy(&self) -> bool {
        let left = self.remaining.get();
        if left == 0 {
            return false;
        }
        self.remaining.set(left - 1);
        true
    }

    fn play(&mut self, buffer: LoopBuffer, plays: u32) -> Result<(), AudioError> {
        assert_eq!(plays, 2);
        self.remaining.set(self.busy_for);
        self.plays.set(self.plays.get() + 1);
        self.last_frames.set(buffer.frames());
        Ok(())
    }
}

fn context(
    mood: Mood,
    channel: Result<ScriptedChannel, AudioError>,
) -> SimulationContext<ScriptedChannel> {
    let config = RenderConfig::default();
    let params = mood.params(&config);
    SimulationContext::new(config, &params, channel, 42)
}

#[test]
fn test_runs_until_escape() {
    let (channel, _, _) = ScriptedChannel::new(1000);
    let mut ctx = context(Mood::Arcade, Ok(channel));
    let mut canvas = DrawList::new();

    for _ in 0..120 {
        let state = ctx.frame([], &mut canvas).unwrap();
        assert_eq!(state, SceneState::Running);
    }
    assert_eq!(canvas.frames_presented(), 120);

    let state = ctx
        .frame([InputEvent::KeyDown(Key::Escape)], &mut canvas)
        .unwrap();
    assert_eq!(state, SceneState::Stopped);
    assert_eq!(canvas.frames_presented(), 121);

    for _ in 0..5 {
        ctx.frame([], &mut canvas).unwrap();
    }
    assert_eq!(canvas.frames_presented(), 121);
    assert_eq!(ctx.scene().frames_presented(), 121);
}

#[test]
fn test_quit_event_stops() {
    let (channel, _, _) = ScriptedChannel::new(1000);
    let mut ctx = context(Mood::Mystical, Ok(channel));
    let mut canvas = DrawList::new();

    ctx.frame([InputEvent::KeyDown(Key::Other)], &mut canvas)
        .unwrap();
    let state = ctx.frame([InputEvent::Quit], &mut canvas).unwrap();
    assert_eq!(state, SceneState::Stopped);
    assert_eq!(canvas.frames_presented(), 2);
}

#[test]
fn test_music_loops_forever() {
    let (channel, plays, frames) = ScriptedChannel::new(10);
    let mut ctx = context(Mood::Arcade, Ok(channel));
    let mut canvas = DrawList::new();

    // Base loop: 4 s at 22050 Hz
    assert_eq!(plays.get(), 1);
    assert_eq!(frames.get(), 88_200);

    for _ in 0..55 {
        ctx.frame([], &mut canvas).unwrap();
    }
    // Idle every 11th poll
    assert_eq!(plays.get(), 6);
    assert_eq!(ctx.playback_state(), PlaybackState::Playing);

    let transpose = ctx.playback().transpose();
    assert!((-7..=7).contains(&transpose));
    // Loop length never depends on transpose
    assert_eq!(frames.get(), 88_200);
}

#[test]
fn test_audio_failure_keeps_visuals() {
    let mut ctx = context(Mood::Arcade, Err(AudioError::NoOutputDevice));
    let mut canvas = DrawList::new();
    assert_eq!(ctx.playback_state(), PlaybackState::Disabled);

    for _ in 0..30 {
        assert_eq!(ctx.frame([], &mut canvas).unwrap(), SceneState::Running);
    }
    assert_eq!(canvas.frames_presented(), 30);
    assert_eq!(ctx.playback_state(), PlaybackState::Disabled);
}

#[test]
fn test_particle_count_constant_and_in_bounds() {
    let (channel, _, _) = ScriptedChannel::new(1000);
    let mut ctx = context(Mood::Arcade, Ok(channel));
    let mut canvas = DrawList::new();

    for _ in 0..400 {
        ctx.frame([], &mut canvas).unwrap();
        let field = ctx.scene().particles();
        assert_eq!(field.len(), 100);
        for p in field.particles() {
            assert!(p.life <= p.max_life);
        }
    }

    // Every radius drawn stays within the cap
    for cmd in canvas.last_frame() {
        if let DrawCommand::Circle { radius, .. } = cmd {
            assert!(*radius <= 48);
        }
    }
}
