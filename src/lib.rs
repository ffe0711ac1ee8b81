// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. sync::SyncStats)
    clippy::module_name_repetitions
)]

//! # Postview
//!
//! Live preview for blog authoring.
//!
//! Postview keeps a rendered preview in step with a post or stylesheet as it
//! is being written:
//! - Edits are debounced; only the state after the last edit in a burst is
//!   previewed
//! - Previews are either plain URLs carrying the text, or server-side
//!   contexts obtained with a form POST
//! - A slow response never overwrites a newer preview
//!
//! ## Architecture
//!
//! A [`sync::Synchronizer`] is handed its collaborators at construction:
//! - **Fields**: where the current text is read from ([`field`])
//! - **Strategy**: how text becomes a preview reference ([`strategy`])
//! - **Targets**: where preview references are written ([`target`])
//! - **Reporter**: where failures are shown ([`report`])
//!
//! ## Modules
//!
//! - [`sync`]: The synchronizer
//! - [`debounce`]: Cancellable scheduled tasks
//! - [`strategy`]: URL and request previews
//! - [`transport`]: HTTP client for request previews
//! - [`page`]: Post and stylesheet page presets
//! - [`indent`]: Tab-key indentation for embedding editors (unused by the CLI)
//! - [`watcher`]: File watching
//! - [`config`]: Saved defaults

pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod indent;
pub mod page;
pub mod report;
pub mod strategy;
pub mod sync;
pub mod target;
pub mod transport;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::SyncError;
    pub use crate::field::{FieldSource, MemoryFields};
    pub use crate::page::{PageKind, SyncMode};
    pub use crate::strategy::SyncStrategy;
    pub use crate::sync::{SyncOutcome, Synchronizer};
    pub use crate::target::{PreviewPair, PreviewTarget};
}
