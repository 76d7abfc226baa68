//! Loop retrigger logic: poll the channel once per frame, resynthesize with
//! a random transpose when it goes idle, go silent for good on any failure.

use rand::rngs::StdRng;
use rand::Rng;

use super::{synthesize, AudioChannel, AudioError};
use crate::params::{PlaybackParams, SynthParams};

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// A loop is scheduled on the channel
    Playing,
    /// Channel went idle; a new loop is being synthesized and started
    Retrigger,
    /// Audio failed once and stays off
    Disabled,
}

/// Owns the audio channel and the loop currently handed to it
pub struct PlaybackController<C: AudioChannel> {
    channel: Option<C>,
    synth: SynthParams,
    policy: PlaybackParams,
    rng: StdRng,
    state: PlaybackState,
    transpose: i32,
    triggers: u64,
}

impl<C: AudioChannel> PlaybackController<C> {
    /// Start the base melody (no transpose) on `channel`.
    ///
    /// A channel that failed to open, or a first loop that fails to
    /// synthesize, leaves the controller disabled.
    pub fn new(
        channel: Result<C, AudioError>,
        synth: SynthParams,
        policy: PlaybackParams,
        rng: StdRng,
    ) -> Self {
        let mut controller = Self {
            channel: None,
            synth,
            policy,
            rng,
            state: PlaybackState::Disabled,
            transpose: 0,
            triggers: 0,
        };

        match channel {
            Ok(channel) => {
                controller.channel = Some(channel);
                controller.state = PlaybackState::Retrigger;
                controller.start_loop(0);
            }
            Err(e) => log::warn!("Music disabled: {}", e),
        }

        controller
    }

    /// Per-frame check; retriggers once the channel has finished its plays
    pub fn poll(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Disabled {
            return self.state;
        }

        let idle = self.channel.as_ref().is_some_and(|c| !c.is_busy());
        if idle {
            self.state = PlaybackState::Retrigger;
            let (lo, hi) = self.policy.transpose_range;
            let transpose = self.rng.random_range(lo.min(hi)..=hi.max(lo));
            self.start_loop(transpose);
        }

        self.state
    }

    fn start_loop(&mut self, transpose: i32) {
        let result = synthesize(&self.synth, transpose)
            .map_err(AudioError::from)
            .and_then(|buffer| match self.channel.as_mut() {
                Some(channel) => channel.play(buffer, self.policy.plays_per_trigger),
                None => Ok(()),
            });

        match result {
            Ok(()) => {
                log::debug!("Loop started, transpose {:+} semitones", transpose);
                self.transpose = transpose;
                self.triggers += 1;
                self.state = PlaybackState::Playing;
            }
            Err(e) => {
                log::warn!("Music disabled: {}", e);
                self.disable();
            }
        }
    }

    fn disable(&mut self) {
        self.channel = None;
        self.state = PlaybackState::Disabled;
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Transpose of the loop currently scheduled (semitones)
    pub fn transpose(&self) -> i32 {
        self.transpose
    }

    /// Number of loops successfully started
    pub fn triggers(&self) -> u64 {
        self.triggers
    }

    pub fn channel(&self) -> Option<&C> {
        self.channel.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::LoopBuffer;
    use rand::SeedableRng;

    /// Channel that finishes after a fixed number of polls
    struct FakeChannel {
        started: Vec<(usize, u32)>,
        busy_polls: u32,
        fail_play: bool,
    }

    impl FakeChannel {
        fn new() -> Self {
            Self {
                started: Vec::new(),
                busy_polls: 0,
                fail_play: false,
            }
        }
    }

    impl AudioChannel for FakeChannel {
        fn is_busy(&self) -> bool {
            self.busy_polls > 0
        }

        fn play(&mut self, buffer: LoopBuffer, plays: u32) -> Result<(), AudioError> {
            if self.fail_play {
                return Err(AudioError::NoOutputDevice);
            }
            self.started.push((buffer.frames(), plays));
            self.busy_polls = 3;
            Ok(())
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_starts_base_melody_on_open() {
        let controller = PlaybackController::new(
            Ok(FakeChannel::new()),
            SynthParams::default(),
            PlaybackParams::default(),
            rng(),
        );
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.transpose(), 0);
        assert_eq!(controller.triggers(), 1);

        let started = &controller.channel().unwrap().started;
        assert_eq!(started, &vec![(88200, 2)]);
    }

    #[test]
    fn test_retriggers_only_when_idle() {
        let mut controller = PlaybackController::new(
            Ok(FakeChannel::new()),
            SynthParams::default(),
            PlaybackParams::default(),
            rng(),
        );

        for _ in 0..3 {
            assert_eq!(controller.poll(), PlaybackState::Playing);
            controller.channel.as_mut().unwrap().busy_polls -= 1;
        }
        assert_eq!(controller.triggers(), 1);

        // Channel idle now: next poll starts a new loop
        assert_eq!(controller.poll(), PlaybackState::Playing);
        assert_eq!(controller.triggers(), 2);
        assert!((-7..=7).contains(&controller.transpose()));
        assert_eq!(controller.channel().unwrap().started.len(), 2);
    }

    #[test]
    fn test_transposes_stay_in_range() {
        let mut controller = PlaybackController::new(
            Ok(FakeChannel::new()),
            SynthParams {
                // Short loop keeps the test fast
                duration_s: 0.1,
                ..SynthParams::default()
            },
            PlaybackParams::default(),
            rng(),
        );

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            controller.channel.as_mut().unwrap().busy_polls = 0;
            controller.poll();
            seen.insert(controller.transpose());
        }
        assert!(seen.iter().all(|t| (-7..=7).contains(t)));
        assert!(seen.len() > 5);
    }

    #[test]
    fn test_open_failure_disables_audio() {
        let mut controller: PlaybackController<FakeChannel> = PlaybackController::new(
            Err(AudioError::NoOutputDevice),
            SynthParams::default(),
            PlaybackParams::default(),
            rng(),
        );
        assert_eq!(controller.state(), PlaybackState::Disabled);
        assert_eq!(controller.poll(), PlaybackState::Disabled);
        assert_eq!(controller.triggers(), 0);
    }

    #[test]
    fn test_synthesis_failure_disables_audio() {
        let controller = PlaybackController::new(
            Ok(FakeChannel::new()),
            SynthParams {
                melody_hz: vec![],
                ..SynthParams::default()
            },
            PlaybackParams::default(),
            rng(),
        );
        assert_eq!(controller.state(), PlaybackState::Disabled);
        assert!(controller.channel().is_none());
    }

    #[test]
    fn test_play_failure_disables_audio_for_good() {
        let mut channel = FakeChannel::new();
        channel.fail_play = true;
        let mut controller = PlaybackController::new(
            Ok(channel),
            SynthParams::default(),
            PlaybackParams::default(),
            rng(),
        );
        assert_eq!(controller.state(), PlaybackState::Disabled);
        for _ in 0..5 {
            assert_eq!(controller.poll(), PlaybackState::Disabled);
        }
    }
}
