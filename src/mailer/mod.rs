//! Outbound mail for the contact and membership forms.
//!
//! Message assembly and validation live here; the SMTP transport is
//! external and `deliver` is its seam, currently recording the composed
//! message through tracing.

/// A contact-form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// A membership application with stored attachment URLs.
#[derive(Debug, Clone, Default)]
pub struct MembershipApplication {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
    pub attachment_urls: Vec<String>,
}

/// Composes and hands off site email.
#[derive(Clone)]
pub struct Mailer;

impl Mailer {
    pub fn new() -> Self {
        Self
    }

    pub fn send_contact(&self, msg: &ContactMessage) {
        let body = format!(
            "From: {} <{}>\nPhone: {}\n\n{}",
            msg.name,
            msg.email,
            msg.phone.as_deref().unwrap_or("-"),
            msg.message
        );
        self.deliver("Contact form submission", &body);
    }

    pub fn send_membership(&self, app: &MembershipApplication) {
        let body = format!(
            "Applicant: {} <{}>\nPhone: {}\nAddress: {}\nAttachments: {}\n\n{}",
            app.name,
            app.email,
            app.phone.as_deref().unwrap_or("-"),
            app.address.as_deref().unwrap_or("-"),
            app.attachment_urls.join(", "),
            app.message.as_deref().unwrap_or("")
        );
        self.deliver("Membership application", &body);
    }

    fn deliver(&self, subject: &str, body: &str) {
        tracing::info!(subject, body_len = body.len(), "Composed outbound email");
        tracing::debug!(subject, body, "Email content");
    }
}

impl Default for Mailer {
    fn default() -> Self {
        Self::new()
    }
}
