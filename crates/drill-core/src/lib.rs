//! drill-core: Ear-training engine for the degree-drill tool
//!
//! Turns scale-degree tokens into pitches under a rotating set of roots and
//! schedules the spoken/played drill cycle. Speech, playback and waiting are
//! reached through the traits in [`collaborators`].

pub mod collaborators;
mod config;
pub mod degree;
mod error;
pub mod intervals;
pub mod naming;
pub mod pitch;
pub mod root;
mod session;
pub mod timing;

pub use collaborators::{Announcer, Clock, TonePlayer};
pub use config::{split_list, DrillConfig};
pub use degree::{normalize, spoken_degree, Accidental, CanonicalDegree};
pub use error::{DrillError, Result};
pub use intervals::IntervalTable;
pub use naming::{note_name, Spelling};
pub use pitch::{calculate, pitch_to_frequency, PitchResult};
pub use root::{PlayCounts, RootContext};
pub use session::{Drill, PracticeSession, SessionState};
pub use timing::{IdleDecision, TimingBudget};
