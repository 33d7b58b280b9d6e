//! Sound cues. Playback is best effort and never reports failure.

use std::io::Write;

/// Moments of the game that have a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Start,
    Eat,
    GameOver,
}

pub trait AudioCue {
    fn play(&self, cue: SoundCue);
}

/// Rings the terminal bell for every cue
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&self, cue: SoundCue) {
        tracing::trace!("sound cue {cue:?}");
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07").and_then(|_| err.flush());
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&self, _cue: SoundCue) {}
}

/// Wraps an output and drops cues while sound is turned off
pub struct Speaker {
    output: Box<dyn AudioCue>,
    enabled: bool,
}

impl Speaker {
    pub fn new(output: Box<dyn AudioCue>, enabled: bool) -> Self {
        Self { output, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn play(&self, cue: SoundCue) {
        if self.enabled {
            self.output.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    struct Recorder(Rc<RefCell<Vec<SoundCue>>>);

    impl AudioCue for Recorder {
        fn play(&self, cue: SoundCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    #[test]
    fn test_muted_speaker_drops_cues() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut speaker = Speaker::new(Box::new(Recorder(played.clone())), true);

        speaker.play(SoundCue::Start);
        speaker.set_enabled(false);
        speaker.play(SoundCue::Eat);
        speaker.set_enabled(true);
        speaker.play(SoundCue::GameOver);

        assert_eq!(*played.borrow(), vec![SoundCue::Start, SoundCue::GameOver]);
    }

    #[test]
    fn test_silent_does_nothing() {
        Silent.play(SoundCue::Eat);
    }
}
