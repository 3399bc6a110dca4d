use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::assistants::{AssistantsApi, Message, RunStatus};
use crate::error::ChatError;

/// Fixed delay between successive run status checks.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Drives one chat turn against the upstream assistants API: post the user
/// message, start a run, poll to a terminal state within a wall-clock bound,
/// then extract the newest assistant text reply.
///
/// Polling is strictly sequential; the only suspension point is the fixed
/// sleep between status checks, and the only early exit is the timeout.
/// Concurrent turns on different threads share nothing locally; a single
/// active run per thread is an upstream constraint, not enforced here.
#[derive(Clone)]
pub struct RunDriver {
    api: Arc<dyn AssistantsApi>,
    poll_interval: Duration,
}

impl RunDriver {
    pub fn new(api: Arc<dyn AssistantsApi>) -> Self {
        Self {
            api,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Submits `message` as a user turn and waits for the assistant's reply.
    ///
    /// The message stays posted even if the run later fails or times out;
    /// there is no transactional rollback. Neither the message post nor the
    /// run creation is retried, so a caller retry after `RunTimeout` starts
    /// a second run while the first may still be executing remotely.
    ///
    /// A completed run whose thread holds no assistant text yields an empty
    /// reply, not an error.
    pub async fn submit_and_await_reply(
        &self,
        thread_id: &str,
        assistant_id: &str,
        message: &str,
        timeout: Duration,
    ) -> Result<String, ChatError> {
        self.api.create_message(thread_id, "user", message).await?;

        let run = self.api.create_run(thread_id, assistant_id).await?;
        tracing::debug!(run_id = %run.id, thread_id, "run created");

        let started = Instant::now();
        let mut status = run.status;
        while !status.is_terminal() {
            if started.elapsed() > timeout {
                // The run keeps executing remotely; no cancel is issued.
                tracing::warn!(
                    run_id = %run.id,
                    thread_id,
                    ?timeout,
                    "run polling timed out, leaving run to finish remotely"
                );
                return Err(ChatError::RunTimeout(timeout));
            }
            tokio::time::sleep(self.poll_interval).await;
            status = self.api.retrieve_run(thread_id, &run.id).await?.status;
        }

        if status != RunStatus::Completed {
            tracing::warn!(run_id = %run.id, thread_id, %status, "run failed");
            return Err(ChatError::RunFailed {
                status: status.to_string(),
            });
        }

        let messages = self.api.list_messages(thread_id).await?;
        Ok(extract_reply(&messages))
    }
}

/// Returns the first text part of the first assistant message, relying on
/// the upstream's newest-first ordering. Empty string if there is none.
fn extract_reply(messages: &[Message]) -> String {
    messages
        .iter()
        .find(|m| m.role == "assistant")
        .and_then(|m| m.content.iter().find(|p| p.kind == "text"))
        .and_then(|p| p.text.as_ref())
        .map(|t| t.value.clone())
        .unwrap_or_default()
}
