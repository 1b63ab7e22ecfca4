use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use folio_notify_contracts::{Notification, NotificationKind, NotifyService};
use folio_utils::trace_instrument;
use tracing::{info, warn};

/// Keeps each notification visible as a toast for a fixed duration.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    config: ToastNotifierConfig,
    toasts: Arc<Mutex<VecDeque<Toast>>>,
}

#[derive(Debug, Clone)]
pub struct ToastNotifierConfig {
    pub duration: Duration,
}

#[derive(Debug, Clone)]
struct Toast {
    notification: Notification,
    expires_at: Instant,
}

impl ToastNotifier {
    pub fn new(config: ToastNotifierConfig) -> Self {
        Self {
            config,
            toasts: Default::default(),
        }
    }

    /// Returns the toasts that are still visible, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        let mut toasts = self.lock();
        prune(&mut toasts, Instant::now());
        toasts
            .iter()
            .map(|toast| toast.notification.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotifyService for ToastNotifier {
    #[trace_instrument(skip(self))]
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => info!(text = %notification.message, "toast"),
            NotificationKind::Failure => warn!(text = %notification.message, "toast"),
        }

        let now = Instant::now();
        let mut toasts = self.lock();
        prune(&mut toasts, now);
        toasts.push_back(Toast {
            notification,
            expires_at: now + self.config.duration,
        });
    }
}

fn prune(toasts: &mut VecDeque<Toast>, now: Instant) {
    toasts.retain(|toast| toast.expires_at > now);
}
