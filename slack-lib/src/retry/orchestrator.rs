//! The attempt loop around the transport.

use std::sync::Arc;
use std::time::Duration;

use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::Transport;
use crate::http::TransportError;

use super::ConnectionErrorRetryHandler;
use super::RetryHandler;
use super::RetryState;

/// Drives one logical call through as many physical attempts as the
/// registered handlers allow.
///
/// Per round: execute the attempt, show the outcome to every handler in
/// registration order, and if any approves, let each approver prepare the
/// shared [`RetryState`] (the longest requested delay wins), sleep, and go
/// again. When no handler approves — because nothing matched or every
/// matching handler's budget ran out — the last real outcome is returned
/// unchanged; no result is ever synthesized.
///
/// The sleep suspends only this call's task. Dropping the returned future
/// while it sleeps cancels the call without issuing a further attempt.
pub struct RetryOrchestrator {
    handlers: Vec<Arc<dyn RetryHandler>>,
}

impl Default for RetryOrchestrator {
    fn default() -> Self {
        Self::new(vec![Arc::new(ConnectionErrorRetryHandler::default())])
    }
}

impl RetryOrchestrator {
    /// Creates an orchestrator with the given ordered handler list.
    pub fn new(handlers: Vec<Arc<dyn RetryHandler>>) -> Self {
        Self { handlers }
    }

    /// Creates an orchestrator that never retries.
    pub fn no_retry() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Executes one logical call.
    pub async fn execute(
        &self,
        transport: &dyn Transport,
        request: &HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut state = RetryState::new();

        loop {
            let attempt_request = state.request_for_attempt(request);
            let outcome = transport.send(&attempt_request).await;

            let retrying = {
                let (response, error) = match &outcome {
                    Ok(response) => (Some(response), None),
                    Err(error) => (None, Some(error)),
                };

                // All handlers are consulted; the first approval does not
                // short-circuit later ones.
                let approving: Vec<&Arc<dyn RetryHandler>> = self
                    .handlers
                    .iter()
                    .filter(|handler| handler.can_retry(&state, &attempt_request, response, error))
                    .collect();

                for handler in &approving {
                    handler.prepare_for_next_attempt(&mut state, &attempt_request, response, error);
                }

                !approving.is_empty()
            };

            if !retrying {
                if state.current_attempt() > 0 {
                    tracing::debug!(
                        url = %attempt_request.url,
                        attempts = state.current_attempt() + 1,
                        ok = outcome.is_ok(),
                        "retries finished, returning last outcome"
                    );
                }
                return outcome;
            }

            let delay = state.take_next_interval().unwrap_or(Duration::ZERO);
            tracing::debug!(
                url = %attempt_request.url,
                attempt = state.current_attempt(),
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
            state.increment_attempt();
        }
    }
}
