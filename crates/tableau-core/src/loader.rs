//! Asset intake: default-model timeout, ticketed fetches and the placeholder
//! fallback.
//!
//! The machine performs no I/O. Every transition returns [`LoadEffect`]s for
//! the caller to carry out, and every asynchronous result comes back tagged
//! with the ticket it was started under.

use crate::constants::{DEFAULT_MODEL_PATH, MODEL_EXTENSION};
use crate::scene::ModelKind;
use smallvec::{smallvec, SmallVec};

pub type Ticket = u32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelSource {
    /// Fetched from a same-origin path.
    Path(String),
    /// A file the user dropped; the front end holds the bytes or object URL.
    Dropped(String),
}

impl ModelSource {
    pub fn default_model() -> Self {
        ModelSource::Path(DEFAULT_MODEL_PATH.to_string())
    }

    pub fn describe(&self) -> &str {
        match self {
            ModelSource::Path(p) => p,
            ModelSource::Dropped(name) => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    AwaitingLoad { timeout_left: f32 },
    Fetching { ticket: Ticket, source: ModelSource },
    PlaceholderPending { ticket: Ticket, delay_left: f32 },
    Loaded(ModelKind),
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadEffect {
    StartFetch { ticket: Ticket, source: ModelSource },
    HideDropMessage,
    SetStatus(String),
    InstallReal(Ticket),
    InstallPlaceholder,
}

pub type Effects = SmallVec<[LoadEffect; 4]>;

/// Tunables, separate so tests can shrink them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoaderTiming {
    pub default_delay_sec: f32,
    pub placeholder_delay_sec: f32,
}

impl Default for LoaderTiming {
    fn default() -> Self {
        Self {
            default_delay_sec: crate::constants::DEFAULT_LOAD_DELAY_SEC,
            placeholder_delay_sec: crate::constants::PLACEHOLDER_DELAY_SEC,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadMachine {
    state: LoadState,
    timing: LoaderTiming,
    last_ticket: Ticket,
}

/// True for names ending in `.glb`, any case.
pub fn is_model_file(name: &str) -> bool {
    let ext = MODEL_EXTENSION.len();
    name.len() >= ext
        && name.is_char_boundary(name.len() - ext)
        && name[name.len() - ext..].eq_ignore_ascii_case(MODEL_EXTENSION)
}

/// `Loading: N%`, or `None` when the total is unknown.
pub fn progress_text(loaded: u64, total: Option<u64>) -> Option<String> {
    let total = total.filter(|t| *t > 0)?;
    let pct = (loaded.min(total) as f64 / total as f64 * 100.0).floor() as u32;
    Some(format!("Loading: {}%", pct))
}

impl LoadMachine {
    pub fn new(timing: LoaderTiming) -> Self {
        Self {
            state: LoadState::AwaitingLoad {
                timeout_left: timing.default_delay_sec,
            },
            timing,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    pub fn current_ticket(&self) -> Option<Ticket> {
        match self.state {
            LoadState::Fetching { ticket, .. } | LoadState::PlaceholderPending { ticket, .. } => {
                Some(ticket)
            }
            _ => None,
        }
    }

    fn start_fetch(&mut self, source: ModelSource) -> Effects {
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        log::info!("[loader] fetch #{} {}", ticket, source.describe());
        self.state = LoadState::Fetching {
            ticket,
            source: source.clone(),
        };
        smallvec![
            LoadEffect::HideDropMessage,
            LoadEffect::SetStatus(crate::constants::TEXT_LOADING_MODEL.to_string()),
            LoadEffect::StartFetch { ticket, source },
        ]
    }

    /// Count down whichever timer is armed.
    pub fn advance(&mut self, dt_sec: f32) -> Effects {
        match &mut self.state {
            LoadState::AwaitingLoad { timeout_left } => {
                *timeout_left -= dt_sec;
                if *timeout_left <= 0.0 {
                    log::info!("[loader] no drop in time; using default model");
                    return self.start_fetch(ModelSource::default_model());
                }
            }
            LoadState::PlaceholderPending { delay_left, .. } => {
                *delay_left -= dt_sec;
                if *delay_left <= 0.0 {
                    self.state = LoadState::Loaded(ModelKind::Placeholder);
                    return smallvec![LoadEffect::InstallPlaceholder];
                }
            }
            LoadState::Fetching { .. } | LoadState::Loaded(_) => {}
        }
        Effects::new()
    }

    /// A `.glb` file was dropped. Returns nothing once a model is installed.
    pub fn on_drop(&mut self, file_name: &str) -> Effects {
        if self.is_loaded() {
            log::debug!("[loader] drop of {} ignored; already loaded", file_name);
            return Effects::new();
        }
        self.start_fetch(ModelSource::Dropped(file_name.to_string()))
    }

    pub fn on_progress(&self, ticket: Ticket, loaded: u64, total: Option<u64>) -> Effects {
        if self.fetching_ticket() != Some(ticket) {
            return Effects::new();
        }
        match progress_text(loaded, total) {
            Some(text) => smallvec![LoadEffect::SetStatus(text)],
            None => Effects::new(),
        }
    }

    /// Fetch and parse succeeded. The caller installs the model it holds
    /// for `ticket` when `InstallReal` comes back.
    pub fn on_success(&mut self, ticket: Ticket) -> Effects {
        if self.fetching_ticket() != Some(ticket) {
            log::debug!("[loader] stale result #{} ignored", ticket);
            return Effects::new();
        }
        self.state = LoadState::Loaded(ModelKind::Real);
        smallvec![LoadEffect::InstallReal(ticket)]
    }

    pub fn on_failure(&mut self, ticket: Ticket, reason: &str) -> Effects {
        if self.fetching_ticket() != Some(ticket) {
            log::debug!("[loader] stale failure #{} ignored", ticket);
            return Effects::new();
        }
        log::warn!("[loader] fetch #{} failed: {}", ticket, reason);
        self.state = LoadState::PlaceholderPending {
            ticket,
            delay_left: self.timing.placeholder_delay_sec,
        };
        smallvec![LoadEffect::SetStatus(
            crate::constants::TEXT_LOAD_ERROR.to_string()
        )]
    }

    fn fetching_ticket(&self) -> Option<Ticket> {
        match self.state {
            LoadState::Fetching { ticket, .. } => Some(ticket),
            _ => None,
        }
    }
}

impl Default for LoadMachine {
    fn default() -> Self {
        Self::new(LoaderTiming::default())
    }
}
