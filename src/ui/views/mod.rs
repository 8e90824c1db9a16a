//! Application views (screens).

mod session_builds;
mod settings;

pub use session_builds::{
    SessionBuildsAction, SessionBuildsError, SessionBuildsView,
};
pub use settings::{SettingsAction, SettingsView};
