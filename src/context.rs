//! Simulation context: everything the frame loop mutates, in one place.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::{AudioChannel, AudioError, PlaybackController, PlaybackState};
use crate::params::{MoodParams, RenderConfig};
use crate::rendering::Canvas;
use crate::scene::{InputEvent, Scene, SceneState};

/// Scene plus music, advanced together once per frame
pub struct SimulationContext<A: AudioChannel> {
    scene: Scene,
    playback: PlaybackController<A>,
}

impl<A: AudioChannel> SimulationContext<A> {
    /// Build the scene and start the music.
    ///
    /// `seed` drives both particle spawning and transpose choice.
    pub fn new(
        config: RenderConfig,
        mood: &MoodParams,
        channel: Result<A, AudioError>,
        seed: u64,
    ) -> Self {
        let scene = Scene::new(config, mood, StdRng::seed_from_u64(seed));
        let playback = PlaybackController::new(
            channel,
            mood.synth.clone(),
            mood.playback.clone(),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        );
        Self { scene, playback }
    }

    /// One frame: scene update and draw, then the audio completion check
    pub fn frame<I, C>(&mut self, events: I, canvas: &mut C) -> Result<SceneState, C::Error>
    where
        I: IntoIterator<Item = InputEvent>,
        C: Canvas + ?Sized,
    {
        let state = self.scene.frame(events, canvas)?;
        if state == SceneState::Running {
            self.playback.poll();
        }
        Ok(state)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn playback(&self) -> &PlaybackController<A> {
        &self.playback
    }
}
