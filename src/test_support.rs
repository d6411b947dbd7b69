//! In-memory transport for exercising the client without a wiki

use crate::errors::MediawikiError;
use crate::networking::client::blocking::ApiTransport;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub params: HashMap<String, String>,
}

pub(crate) type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

/// Replays queued responses in order and records every request.
pub(crate) struct ScriptedTransport {
    responses: Mutex<Vec<Value>>,
    requests: RequestLog,
    failure: Option<String>,
}

impl ScriptedTransport {
    pub fn with_responses(responses: Vec<Value>) -> (Self, RequestLog) {
        let _ = pretty_env_logger::try_init();
        let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let transport = ScriptedTransport {
            responses: Mutex::new(responses),
            requests: Arc::clone(&requests),
            failure: None,
        };
        (transport, requests)
    }

    /// A transport whose every call fails with a transport-level error.
    pub fn failing(message: &str) -> Self {
        let _ = pretty_env_logger::try_init();
        ScriptedTransport {
            responses: Mutex::new(Vec::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
            failure: Some(message.to_string()),
        }
    }

    fn dispatch(
        &self,
        method: &'static str,
        params: &HashMap<String, String>,
    ) -> Result<Value, MediawikiError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(RecordedRequest {
                method,
                params: params.clone(),
            });
        if let Some(message) = &self.failure {
            return Err(MediawikiError::GenericError(message.clone()));
        }
        let mut responses = self.responses.lock().expect("response queue poisoned");
        assert!(!responses.is_empty(), "transport ran out of scripted responses");
        Ok(responses.remove(0))
    }
}

impl ApiTransport for ScriptedTransport {
    fn get(&self, params: &HashMap<String, String>) -> Result<Value, MediawikiError> {
        self.dispatch("GET", params)
    }

    fn post(&self, params: &HashMap<String, String>) -> Result<Value, MediawikiError> {
        self.dispatch("POST", params)
    }
}
