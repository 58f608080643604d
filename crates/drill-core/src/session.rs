//! Practice session state and the drill scheduler
//!
//! The scheduler is a small state machine:
//!
//! ```text
//! ActivatingRoot -> SelectingElement -> PlayingElement -> SelectingElement ...
//!                         |
//!                         v (every degree at quota)
//!                   RootExhausted -> ActivatingRoot (next root, wrapping)
//! ```
//!
//! There is no terminal state. [`Drill::run`] keeps stepping until the
//! cancellation flag is raised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::collaborators::{Announcer, Clock, TonePlayer};
use crate::config::DrillConfig;
use crate::degree::{normalize, spoken_degree, CanonicalDegree};
use crate::error::{DrillError, Result};
use crate::intervals::IntervalTable;
use crate::naming::note_name;
use crate::pitch;
use crate::root::{resolve_all, zeroed_counts, PlayCounts, RootContext};
use crate::timing::{IdleDecision, TimingBudget};

/// Where the scheduler is in its cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    ActivatingRoot,
    SelectingElement,
    /// Holds the raw token that was drawn
    PlayingElement(String),
    RootExhausted,
}

/// One running practice session.
///
/// Counts are keyed by the raw token, so `"b3"` and `"flat 3"` are tracked
/// separately even though they sound the same.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    roots: Vec<RootContext>,
    root_index: usize,
    tokens: Vec<String>,
    counts: PlayCounts,
    quota: u32,
    state: SessionState,
    activations: u64,
}

impl PracticeSession {
    pub fn new(config: &DrillConfig) -> Result<Self> {
        let tokens = config.unique_degrees();
        if tokens.is_empty() {
            return Err(DrillError::NoDegrees);
        }
        let roots = resolve_all(&config.root_sequence(), config.octave)?;
        let counts = zeroed_counts(&tokens);

        Ok(Self {
            roots,
            root_index: 0,
            tokens,
            counts,
            quota: config.plays_per_root.max(1),
            state: SessionState::ActivatingRoot,
            activations: 0,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn counts(&self) -> &PlayCounts {
        &self.counts
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn quota(&self) -> u32 {
        self.quota
    }

    pub fn root_index(&self) -> usize {
        self.root_index
    }

    pub fn roots(&self) -> &[RootContext] {
        &self.roots
    }

    /// The root currently being drilled
    pub fn current_root(&self) -> &RootContext {
        &self.roots[self.root_index]
    }

    /// Number of root activations so far
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Tokens still below quota for the current root
    pub fn eligible(&self) -> Vec<&String> {
        self.tokens
            .iter()
            .filter(|t| self.counts.get(*t).copied().unwrap_or(0) < self.quota)
            .collect()
    }

    pub fn is_root_exhausted(&self) -> bool {
        self.eligible().is_empty()
    }

    fn activate_current_root(&mut self) {
        self.counts = zeroed_counts(&self.tokens);
        self.activations += 1;
    }

    fn record_play(&mut self, token: &str) -> u32 {
        let count = self.counts.entry(token.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn advance_root(&mut self) {
        self.root_index = (self.root_index + 1) % self.roots.len();
    }
}

/// Drives a [`PracticeSession`] through its states, calling out to speech,
/// playback and the clock.
pub struct Drill<A, P, C> {
    announcer: A,
    player: P,
    clock: C,
    intervals: IntervalTable,
    timing: TimingBudget,
    tone_duration: Duration,
    tone_name_delay: Duration,
    root_settle: Duration,
    rng: fastrand::Rng,
}

impl<A: Announcer, P: TonePlayer, C: Clock> Drill<A, P, C> {
    pub fn new(config: &DrillConfig, announcer: A, player: P, clock: C) -> Self {
        Self {
            announcer,
            player,
            clock,
            intervals: IntervalTable::new(config.extended_degrees),
            timing: TimingBudget::new(config.cycle_delay()),
            tone_duration: config.tone_duration(),
            tone_name_delay: config.tone_name_delay(),
            root_settle: config.root_settle(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Replace the selection RNG (seeded runs)
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    /// Step until `cancelled` is raised, then hand the session back
    pub fn run(&mut self, mut session: PracticeSession, cancelled: &AtomicBool) -> PracticeSession {
        info!("Starting practice");
        while !cancelled.load(Ordering::SeqCst) {
            session = self.step(session);
        }
        info!(
            activations = session.activations(),
            root = %session.current_root().name,
            "Practice stopped"
        );
        session
    }

    /// Perform one state transition
    pub fn step(&mut self, mut session: PracticeSession) -> PracticeSession {
        session.state = match std::mem::replace(&mut session.state, SessionState::SelectingElement) {
            SessionState::ActivatingRoot => self.activate_root(&mut session),
            SessionState::SelectingElement => self.select_element(&session),
            SessionState::PlayingElement(token) => self.play_element(&mut session, &token),
            SessionState::RootExhausted => {
                info!(root = %session.current_root().name, "Root complete");
                session.advance_root();
                SessionState::ActivatingRoot
            }
        };
        session
    }

    fn activate_root(&mut self, session: &mut PracticeSession) -> SessionState {
        session.activate_current_root();
        let root = session.current_root().clone();

        self.announcer.announce(&root.announcement());
        self.clock.pause(self.root_settle);

        info!(root = %root.name, octave = root.octave, pitch = root.pitch, "Activated root");
        SessionState::SelectingElement
    }

    fn select_element(&mut self, session: &PracticeSession) -> SessionState {
        let eligible = session.eligible();
        if eligible.is_empty() {
            return SessionState::RootExhausted;
        }
        let token = eligible[self.rng.usize(..eligible.len())].clone();
        SessionState::PlayingElement(token)
    }

    fn play_element(&mut self, session: &mut PracticeSession, token: &str) -> SessionState {
        let root = session.current_root().clone();
        let spoken = spoken_degree(token);
        debug!(root = %root.name, token, spoken = %spoken, "Next element");
        self.announcer.announce(&spoken);

        let canonical = normalize(token);
        let offset = CanonicalDegree::from_normalized(&canonical)
            .and_then(|degree| self.intervals.semitones(degree));
        if offset.is_none() {
            warn!(token, normalized = %canonical, "Scale degree not recognized, skipping tone");
        }

        let mut consumed = Duration::ZERO;
        if let Some(result) = pitch::calculate(Some(root.pitch), offset.map(i32::from)) {
            if !result.in_midi_range() {
                warn!(pitch = result.target, "Calculated pitch is outside 0-127");
            }

            self.player.play_tone(Some(result.frequency_hz), self.tone_duration);
            consumed += self.tone_duration;

            let name = note_name(result.target, &root.name, token);
            self.clock.pause(self.tone_name_delay);
            consumed += self.tone_name_delay;
            self.announcer.announce(name);
        }

        let count = session.record_play(token);
        info!(root = %root.name, token, count, quota = session.quota, "Element played");

        match self.timing.remaining(consumed) {
            IdleDecision::Idle(remaining) => self.clock.pause(remaining),
            IdleDecision::Shortfall { target, consumed } => warn!(
                target_secs = target.as_secs_f64(),
                consumed_secs = consumed.as_secs_f64(),
                "Cycle delay is shorter than the audio events, effective delay will be longer"
            ),
            IdleDecision::None => {}
        }

        SessionState::SelectingElement
    }
}
