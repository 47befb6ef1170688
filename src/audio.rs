//! Synthesized sound cues.
//!
//! Every cue is a single oscillator shaped by a frequency schedule and an
//! exponential gain decay, so no sample assets ship with the game. [`Tone`]
//! describes the envelope as plain data; a [`ToneBackend`] turns it into sound.
//! [`WebAudioTones`] uses the page's Web Audio API and [`SilentTones`] is the
//! stand-in for hosts without audio output.

use web_sys::AudioContextState;

use crate::error::PlatformError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Tick,
    Correct,
    Wrong,
    GameOver,
}

/// One point in an oscillator's frequency schedule. `at` is seconds after start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FreqStep {
    Set { at: f64, hz: f32 },
    Ramp { at: f64, hz: f32 }, // exponential ramp ending at `at`
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub steps: &'static [FreqStep],
    pub gain_start: f32,
    pub gain_end: f32,
    pub duration: f64, // seconds; gain decays over the whole duration
}

const GAIN_START: f32 = 0.3;
const GAIN_END: f32 = 0.01;

// Short descending click.
static TICK: Tone = Tone {
    steps: &[FreqStep::Set { at: 0.0, hz: 800.0 }, FreqStep::Ramp { at: 0.1, hz: 400.0 }],
    gain_start: GAIN_START,
    gain_end: GAIN_END,
    duration: 0.1,
};

// C5, E5, G5.
static CORRECT: Tone = Tone {
    steps: &[
        FreqStep::Set { at: 0.0, hz: 523.0 },
        FreqStep::Set { at: 0.1, hz: 659.0 },
        FreqStep::Set { at: 0.2, hz: 784.0 },
    ],
    gain_start: GAIN_START,
    gain_end: GAIN_END,
    duration: 0.4,
};

static WRONG: Tone = Tone {
    steps: &[FreqStep::Set { at: 0.0, hz: 200.0 }, FreqStep::Ramp { at: 0.3, hz: 100.0 }],
    gain_start: GAIN_START,
    gain_end: GAIN_END,
    duration: 0.3,
};

static GAME_OVER: Tone = Tone {
    steps: &[
        FreqStep::Set { at: 0.0, hz: 400.0 },
        FreqStep::Ramp { at: 0.5, hz: 200.0 },
        FreqStep::Ramp { at: 1.0, hz: 100.0 },
    ],
    gain_start: GAIN_START,
    gain_end: GAIN_END,
    duration: 1.0,
};

impl Sound {
    pub fn tone(self) -> &'static Tone {
        match self {
            Sound::Tick => &TICK,
            Sound::Correct => &CORRECT,
            Sound::Wrong => &WRONG,
            Sound::GameOver => &GAME_OVER,
        }
    }
}

/// Something that can play a [`Tone`].
pub trait ToneBackend {
    fn play(&mut self, tone: &Tone) -> Result<(), PlatformError>;

    /// Called from inside a user gesture so output can be unlocked.
    fn wake(&mut self) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Backend for environments without audio output.
#[derive(Debug, Default)]
pub struct SilentTones;

impl ToneBackend for SilentTones {
    fn play(&mut self, _tone: &Tone) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Web Audio backend. The `AudioContext` is created lazily and resumed whenever
/// it is found suspended; browsers only let it run after a user gesture.
#[derive(Default)]
pub struct WebAudioTones {
    ctx: Option<web_sys::AudioContext>,
}

impl WebAudioTones {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&web_sys::AudioContext, PlatformError> {
        if self.ctx.is_none() {
            let ctx = web_sys::AudioContext::new()
                .map_err(|e| PlatformError::AudioUnavailable(format!("{:?}", e)))?;
            self.ctx = Some(ctx);
        }
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| PlatformError::AudioUnavailable("no context".into()))?;
        if needs_resume(ctx.state()) {
            // promise settles on its own; failures surface as silence
            let _ = ctx.resume()?;
        }
        Ok(ctx)
    }
}

fn needs_resume(state: AudioContextState) -> bool {
    state == AudioContextState::Suspended
}

impl ToneBackend for WebAudioTones {
    fn wake(&mut self) -> Result<(), PlatformError> {
        self.context().map(|_| ())
    }

    fn play(&mut self, tone: &Tone) -> Result<(), PlatformError> {
        let ctx = self.context()?;
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let t0 = ctx.current_time();
        let freq = osc.frequency();
        for step in tone.steps {
            match *step {
                FreqStep::Set { at, hz } => {
                    freq.set_value_at_time(hz, t0 + at)?;
                }
                FreqStep::Ramp { at, hz } => {
                    freq.exponential_ramp_to_value_at_time(hz, t0 + at)?;
                }
            }
        }
        let g = gain.gain();
        g.set_value_at_time(tone.gain_start, t0)?;
        g.exponential_ramp_to_value_at_time(tone.gain_end, t0 + tone.duration)?;

        osc.start_with_when(t0)?;
        osc.stop_with_when(t0 + tone.duration)?;
        Ok(())
    }
}

/// The four game cues behind an on/off switch. Failures are logged and dropped.
pub struct Sfx<B: ToneBackend> {
    backend: B,
    enabled: bool,
}

impl<B: ToneBackend> Sfx<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the switch and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn play(&mut self, sound: Sound) {
        if !self.enabled {
            return;
        }
        if let Err(err) = self.backend.play(sound.tone()) {
            log::warn!("could not play {:?}: {}", sound, err);
        }
    }

    /// Unlock output from a click or key handler. No-op while muted.
    pub fn wake(&mut self) {
        if !self.enabled {
            return;
        }
        if let Err(err) = self.backend.wake() {
            log::warn!("could not start audio: {}", err);
        }
    }

    pub fn tick(&mut self) {
        self.play(Sound::Tick);
    }
    pub fn correct(&mut self) {
        self.play(Sound::Correct);
    }
    pub fn wrong(&mut self) {
        self.play(Sound::Wrong);
    }
    pub fn game_over(&mut self) {
        self.play(Sound::GameOver);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
