//! Reusable UI components.

mod notification;
mod scroll_region;

pub use notification::{Notification, NotificationManager};
pub use scroll_region::{ScrollRegion, VisibilityChange, WidgetId};
