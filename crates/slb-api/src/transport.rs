use crate::errors::Result;
use async_trait::async_trait;
use serde_json::Value;
use slb_core::{ObjectFilter, ObjectMask, RemoteService};

/// A single remote procedure call: `service::method` on an optional object id.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub service: RemoteService,
    pub method: &'static str,
    pub id: Option<i64>,
    pub parameters: Vec<Value>,
    pub mask: Option<ObjectMask>,
    pub filter: Option<ObjectFilter>,
}

impl CallRequest {
    pub fn new(service: RemoteService, method: &'static str) -> Self {
        Self {
            service,
            method,
            id: None,
            parameters: Vec::new(),
            mask: None,
            filter: None,
        }
    }

    /// Target a specific object of the service
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_parameter(mut self, parameter: Value) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_mask(mut self, mask: ObjectMask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_filter(mut self, filter: ObjectFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Carries remote procedure calls to the provider.
///
/// Implementations return the decoded response body untouched; failures
/// reported by the remote side surface as [`crate::ApiError::Fault`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: CallRequest) -> Result<Value>;
}
