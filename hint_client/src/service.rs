use std::time::Duration;

use codenames::{HintError, HintRequest, HintResult, ServiceError};
use tracing::trace;

/// Something that turns a hint request into ranked hints.
///
/// Implementations may block; they are called from worker threads.
pub trait HintService {
    fn generate_hints(&self, req: &HintRequest) -> Result<HintResult, HintError>;
}

/// Talks to the hint service over HTTP, posting the request as JSON.
pub struct HttpHintService {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpHintService {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            endpoint: String::from(endpoint),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HintService for HttpHintService {
    fn generate_hints(&self, req: &HintRequest) -> Result<HintResult, HintError> {
        let req_json =
            serde_json::to_string(req).map_err(|err| HintError::InvalidResponse(err.to_string()))?;
        trace!(name: "Sending request", endpoint = %self.endpoint, request = %req_json);
        let response = match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_string(&req_json)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                // The service explains a bad request in an {"error": ...} body
                let message = response
                    .into_string()
                    .ok()
                    .and_then(|body| serde_json::from_str::<ServiceError>(&body).ok())
                    .map(|body| body.error);
                return Err(HintError::Status { code, message });
            }
            Err(ureq::Error::Transport(err)) => return Err(HintError::Network(err.to_string())),
        };

        let code = response.status();
        if !(200..300).contains(&code) {
            return Err(HintError::Status {
                code,
                message: None,
            });
        }
        let body = response
            .into_string()
            .map_err(|err| HintError::Network(err.to_string()))?;
        trace!(name: "Received response", endpoint = %self.endpoint, response = %body);
        serde_json::from_str::<HintResult>(&body)
            .map_err(|err| HintError::InvalidResponse(err.to_string()))
    }
}
