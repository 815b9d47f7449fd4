use async_trait::async_trait;

use crate::user::errors::NotificationError;
use crate::user::ports::NotificationSender;

/// Notification adapter that records the reset hand-off via tracing.
///
/// Template rendering and actual delivery live behind the
/// `NotificationSender` port; this adapter is the integration point for a
/// real mail transport.
pub struct TracingNotificationSender;

impl TracingNotificationSender {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSender for TracingNotificationSender {
    async fn send_password_reset(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(destination = %email, "Password reset notification dispatched");
        // The token itself only at debug, it grants a password change
        tracing::debug!(destination = %email, token = %token, "Reset token payload");
        Ok(())
    }
}
