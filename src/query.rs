//! Effective search query resolution.
//!
//! The raw text a user types, the persisted base filter, the repository
//! scope state and the auto-detected origin/upstream identities are folded
//! into the one query string handed to the search backend. `sync_from_text`
//! runs the other direction and infers scope state from edited text.

mod compose;
mod identities;
mod scope;
mod sync;
mod template;
pub mod tokens;

pub use self::compose::{QueryContext, compose, compose_for_edit, compose_unexpanded};
pub use self::identities::Identities;
pub use self::scope::{ScopeState, ScopeTarget};
pub use self::sync::sync_from_text;
pub use self::template::expand;
