//! Notification and analytics sinks that write to the `tracing` log.
//!
//! Headless front ends (the CLI) have no toast area or analytics client, so
//! both end up as structured log lines.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::ports::{
    Analytics, AnalyticsEvent, Notification, NotificationIcon, Notifier,
};

/// [`Notifier`] that logs each notification.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.icon {
            NotificationIcon::Switch => info!(text = %notification.text, "notification"),
            NotificationIcon::Error => warn!(text = %notification.text, "notification"),
        }
    }
}

/// [`Analytics`] sink that logs events instead of sending them.
#[derive(Debug, Default)]
pub struct TracingAnalytics;

#[async_trait]
impl Analytics for TracingAnalytics {
    async fn send_event(&self, event: AnalyticsEvent) {
        debug!(event = event.as_str(), "analytics event");
    }
}
