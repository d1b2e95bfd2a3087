use tracing::{debug, info};

use crate::{build_hint_request, Board, HintError, HintRequest, HintResult, Team};

/// Identifies one issued hint request. Later requests have larger tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintState {
    Idle,
    Loading,
    Success,
    Failure,
}

/// A request that has been issued and must be handed to the hint service.
///
/// The request is a snapshot of the board at the time it was issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingHint {
    pub token: RequestToken,
    pub team: Team,
    pub request: HintRequest,
}

/// What [`HintSession::complete()`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The response belongs to a superseded request, or the session was
    /// cleared since. Nothing changed.
    Discarded,
}

/// Tracks the lifecycle of hint requests.
///
/// Issuing a request while another one is loading supersedes it. Only the
/// response to the latest request is ever applied. A failure keeps the last
/// successful result around, so it can still be shown next to the error.
#[derive(Clone, Debug)]
pub struct HintSession {
    state: HintState,
    result: Option<HintResult>,
    error: Option<HintError>,
    /// The token of the most recently issued request, if it is still awaited.
    awaiting: Option<RequestToken>,
    last_token: u64,
}

impl Default for HintSession {
    fn default() -> Self {
        Self::new()
    }
}

impl HintSession {
    pub fn new() -> Self {
        Self {
            state: HintState::Idle,
            result: None,
            error: None,
            awaiting: None,
            last_token: 0,
        }
    }

    pub fn state(&self) -> HintState {
        self.state
    }

    pub fn result(&self) -> Option<&HintResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&HintError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == HintState::Loading
    }

    /// The request whose response is awaited, if any.
    pub fn awaiting(&self) -> Option<RequestToken> {
        self.awaiting
    }

    /// Issues a new request for `team`, superseding any request in flight.
    pub fn begin(&mut self, board: &Board, team: Team) -> PendingHint {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        if let Some(superseded) = self.awaiting.replace(token) {
            debug!(%superseded, %token, "Superseding hint request");
        }
        self.state = HintState::Loading;
        self.error = None;
        PendingHint {
            token,
            team,
            request: build_hint_request(board, team),
        }
    }

    /// Applies the outcome of the request identified by `token`.
    ///
    /// Outcomes for any other request are dropped silently.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<HintResult, HintError>,
    ) -> Completion {
        if self.awaiting != Some(token) {
            debug!(%token, ok = outcome.is_ok(), "Discarding stale hint response");
            return Completion::Discarded;
        }
        self.awaiting = None;
        match outcome {
            Ok(result) => {
                info!(%token, num_hints = result.len(), "Received hints");
                self.result = Some(result);
                self.error = None;
                self.state = HintState::Success;
            }
            Err(err) => {
                info!(%token, %err, "Hint request failed");
                self.error = Some(err);
                self.state = HintState::Failure;
            }
        }
        Completion::Applied
    }

    /// Forgets the result, the error and any request in flight.
    pub fn clear(&mut self) {
        if let Some(token) = self.awaiting.take() {
            debug!(%token, "Abandoning hint request");
        }
        self.result = None;
        self.error = None;
        self.state = HintState::Idle;
    }
}
