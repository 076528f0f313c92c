//! Push notification fan-out.
//!
//! After select mutations (news and notice creation) a title/body pair is
//! fanned out to every registered push token. The delivery transport itself
//! is external; `dispatch` is the seam where it would plug in, and for now
//! each dispatch is recorded through tracing.

use std::sync::Arc;

use crate::db::Repository;

/// Fans notifications out to all registered push endpoints.
#[derive(Clone)]
pub struct Notifier {
    repo: Arc<Repository>,
}

impl Notifier {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    /// Send `title`/`body` to every registered token. Failures never
    /// propagate to the triggering request.
    pub async fn broadcast(&self, title: &str, body: &str) {
        let tokens = match self.repo.list_push_tokens().await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::error!("Failed to load push tokens: {}", e);
                return;
            }
        };

        if tokens.is_empty() {
            return;
        }

        tracing::info!(recipients = tokens.len(), title, "Broadcasting push notification");
        for token in &tokens {
            self.dispatch(token, title, body);
        }
    }

    fn dispatch(&self, token: &str, title: &str, _body: &str) {
        // Transport binding goes here; tokens are truncated in logs
        let shown = token.get(..12).unwrap_or(token);
        tracing::debug!(token = shown, title, "Dispatched push notification");
    }
}
