use crate::settings::Settings;
use crate::types::RegistrantRecord;

/// One-shot signup notification. `dispatch` must not block the login flow;
/// the outcome is observed through logging only, never returned, and a
/// failed attempt is not retried.
pub trait RegistrationNotifier: Send + Sync {
    fn dispatch(&self, registrant: &RegistrantRecord);
}

/// Notifier that drops everything. Used by tests and storage-only callers.
pub struct NullNotifier;

impl RegistrationNotifier for NullNotifier {
    fn dispatch(&self, _registrant: &RegistrantRecord) {}
}

/// Emails the administrator about a new signup, off the caller's back via a
/// spawned task. Must be used from within a Tokio runtime.
pub struct EmailNotifier {
    settings: Settings,
}

impl EmailNotifier {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

impl RegistrationNotifier for EmailNotifier {
    fn dispatch(&self, registrant: &RegistrantRecord) {
        let Some(email_settings) = self.settings.email.clone() else {
            tracing::event!(target: "auction", tracing::Level::WARN, "No email settings configured - the admin signup notification will not be sent.");
            return;
        };
        crate::utils::emails::send_registration_email(email_settings, registrant.clone());
    }
}
