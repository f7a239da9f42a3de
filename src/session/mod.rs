//! Session management.
//!
//! - `controller` - The session state machine (Loading → Playing → Won)
//! - `snapshot` - Persistable session record
//! - `events` - Notifications for presentation, audio and HUD layers
//!
//! # Architecture
//!
//! ```text
//!  input ──flip──▶ SessionController ──enqueue──▶ PairResolver
//!                   │    ▲      │                     │
//!                   │    │      └──tick──▶ Board ◀────┘ (reads, transitions)
//!                   │    └──── ResolverEvent ─────────┘
//!                   ├──▶ ScoreSystem
//!                   ├──▶ SaveStore (snapshot on pair formed / resolved / won)
//!                   └──▶ SessionEvent queue ──▶ Presenter
//! ```

pub mod controller;
pub mod events;
pub mod snapshot;

pub use controller::{FlipResult, IgnoreReason, SessionController, SessionPhase};
pub use events::SessionEvent;
pub use snapshot::SessionSnapshot;
