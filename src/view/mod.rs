use crate::data_models::{Mode, Notification};

pub mod captured;
pub mod terminal;

pub use captured::{CapturedState, CapturedView};
pub use terminal::TerminalView;

/// The surface the controller drives: question input, mode controls, the
/// trigger control, a busy indicator, the results container and transient
/// notifications.
///
/// Methods take `&self`; implementations keep their own interior state so a
/// view can be shared with notification timers.
pub trait SearchView: Send + Sync + 'static {
    /// Current raw contents of the question input.
    fn question(&self) -> String;

    /// Marks exactly `mode`'s control as the active one.
    fn set_mode_active(&self, mode: Mode);

    fn set_trigger_enabled(&self, enabled: bool);

    fn show_busy(&self, label: &str);

    fn hide_busy(&self);

    /// Replaces the results container. An empty string clears it.
    fn set_results(&self, html: &str);

    fn show_notification(&self, id: u64, notification: &Notification);

    /// Removes notification `id` if it is still displayed.
    fn remove_notification(&self, id: u64);
}
