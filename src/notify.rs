use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::data_models::{Notification, NotificationKind};
use crate::view::SearchView;

/// How long a notification stays up.
pub const NOTIFY_DELAY: Duration = Duration::from_secs(3);

/// Transient status indicator. At most one notification is visible at a time:
/// a new one replaces the current one immediately and removes itself after
/// `delay`.
pub struct Notifier<V: SearchView> {
    view: Arc<V>,
    delay: Duration,
    next_id: AtomicU64,
    current: Arc<Mutex<Option<u64>>>,
}

impl<V: SearchView> Notifier<V> {
    pub fn new(view: Arc<V>) -> Notifier<V> {
        Notifier::with_delay(view, NOTIFY_DELAY)
    }

    pub fn with_delay(view: Arc<V>, delay: Duration) -> Notifier<V> {
        Notifier {
            view,
            delay,
            next_id: AtomicU64::new(1),
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Shows `message` and schedules its removal. Returns the notification id.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification::new(message, kind);

        {
            let mut current = self.current.lock().await;
            if let Some(previous) = current.take() {
                self.view.remove_notification(previous);
            }
            self.view.show_notification(id, &notification);
            *current = Some(id);
        }

        let view = self.view.clone();
        let current = self.current.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut current = current.lock().await;
            // Only dismiss if nothing newer replaced it in the meantime.
            if *current == Some(id) {
                *current = None;
                view.remove_notification(id);
            }
        });

        id
    }

    /// Id of the notification currently on screen, if any.
    pub async fn visible(&self) -> Option<u64> {
        *self.current.lock().await
    }
}
