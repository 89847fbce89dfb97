//! Audio cue registry: fixed cue table plus play-state bookkeeping.
//!
//! Playback itself lives behind [`crate::view::CuePlayer`]. The registry only
//! tracks which cues are playing and which were refused by the browser's
//! autoplay policy so they can be retried on the next user gesture.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Ambient,
    PianoStab,
    ChairCreak,
    Whisper,
    WindChime,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CueSpec {
    pub path: &'static str,
    pub volume: f64,
    pub looped: bool,
}

impl Cue {
    pub const ALL: [Cue; 5] = [
        Cue::Ambient,
        Cue::PianoStab,
        Cue::ChairCreak,
        Cue::Whisper,
        Cue::WindChime,
    ];

    pub fn spec(self) -> CueSpec {
        match self {
            Cue::Ambient => CueSpec {
                path: "/audio/ambient.mp3",
                volume: 0.3,
                looped: true,
            },
            Cue::PianoStab => CueSpec {
                path: "/audio/piano_stab.mp3",
                volume: 0.7,
                looped: false,
            },
            Cue::ChairCreak => CueSpec {
                path: "/audio/chair_creak.mp3",
                volume: 0.4,
                looped: false,
            },
            Cue::Whisper => CueSpec {
                path: "/audio/whisper.mp3",
                volume: 0.5,
                looped: false,
            },
            Cue::WindChime => CueSpec {
                path: "/audio/wind_chime.mp3",
                volume: 0.4,
                looped: false,
            },
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, Default)]
pub struct AudioRegistry {
    playing: [bool; 5],
    deferred: SmallVec<[Cue; 5]>,
}

impl AudioRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.playing[cue.index()]
    }

    /// Mirror the element's `playing` / `pause` events.
    pub fn set_playing(&mut self, cue: Cue, playing: bool) {
        self.playing[cue.index()] = playing;
        if playing {
            self.deferred.retain(|c| *c != cue);
        }
    }

    /// Remember a cue the browser refused to start.
    pub fn defer(&mut self, cue: Cue) {
        if !self.deferred.contains(&cue) {
            log::info!("[audio] {:?} deferred until next gesture", cue);
            self.deferred.push(cue);
        }
    }

    pub fn deferred(&self) -> &[Cue] {
        &self.deferred
    }

    /// Cues to start on a user gesture: everything deferred, plus the
    /// ambient loop if it is not already running. Drains the deferred list.
    pub fn on_gesture(&mut self) -> SmallVec<[Cue; 5]> {
        let mut cues: SmallVec<[Cue; 5]> = self.deferred.drain(..).collect();
        if !self.is_playing(Cue::Ambient) && !cues.contains(&Cue::Ambient) {
            cues.push(Cue::Ambient);
        }
        cues
    }
}
