//! Application seams: notifications, navigation, commit events, the
//! session-scoped store and the read-side query cache.

pub mod events;
pub mod navigation;
pub mod notify;
pub mod query_cache;
pub mod session_store;

pub use events::{CommitHub, CommitListener};
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use notify::{LogNotifier, Notifier, RecordingNotifier, ToastKind};
pub use query_cache::{QueryCache, QueryKey};
pub use session_store::{MemorySessionStore, SessionStore};
