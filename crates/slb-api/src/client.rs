use crate::errors::{ApiError, HttpError, Result};
use crate::transport::{CallRequest, Transport};
use async_trait::async_trait;
use log::{debug, error, info, trace};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT_URL: &str = "https://api.softlayer.com/rest/v3.1";

/// Trait for providing configuration to the REST transport
/// This allows the main application to implement config without circular dependencies
pub trait ApiConfig {
    type Error;

    /// Get the account username
    fn get_username(&self) -> std::result::Result<String, Self::Error>;

    /// Get the API key for authentication
    fn get_api_key(&self) -> std::result::Result<String, Self::Error>;

    /// Get the endpoint URL (optional, defaults to the public REST endpoint)
    fn get_endpoint_url(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(None)
    }

    /// Get the request timeout (optional, no timeout by default)
    fn get_timeout(&self) -> std::result::Result<Option<Duration>, Self::Error> {
        Ok(None)
    }
}

/// Fault body returned by the REST endpoint on failure
#[derive(Debug, Deserialize)]
struct FaultBody {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// Show only the first and last four characters of a secret.
fn redact(secret: &str) -> String {
    if secret.chars().count() > 8 {
        let head: String = secret.chars().take(4).collect();
        let mut tail: Vec<char> = secret.chars().rev().take(4).collect();
        tail.reverse();
        format!("{}...{}", head, tail.into_iter().collect::<String>())
    } else {
        "****".to_string()
    }
}

/// Map a failed response to an error.
///
/// A `{"error": ..., "code": ...}` body is a remote fault; its code falls
/// back to the HTTP status. Anything else is classified by status code.
fn map_failure(status: StatusCode, body: String) -> ApiError {
    if let Ok(fault) = serde_json::from_str::<FaultBody>(&body) {
        let code = fault
            .code
            .unwrap_or_else(|| status.as_u16().to_string());
        error!("Remote fault {}: {}", code, fault.error);
        return ApiError::Fault {
            code,
            message: fault.error,
        };
    }

    let http_error = match status {
        StatusCode::UNAUTHORIZED => {
            error!("Authentication failed (401 Unauthorized)");
            HttpError::AuthenticationFailed
        }
        StatusCode::FORBIDDEN => {
            error!("Invalid API key (403 Forbidden)");
            HttpError::InvalidApiKey
        }
        StatusCode::TOO_MANY_REQUESTS => {
            error!("Rate limited (429 Too Many Requests)");
            HttpError::RateLimited
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            error!("Service unavailable (503)");
            HttpError::ServiceUnavailable
        }
        StatusCode::REQUEST_TIMEOUT => {
            error!("Request timeout (408)");
            HttpError::Timeout
        }
        _ => {
            error!("HTTP error with status code: {}", status.as_u16());
            HttpError::HttpError {
                status: status.as_u16(),
                message: body,
            }
        }
    };

    ApiError::Http(http_error)
}

/// Transport speaking the provider's REST convention over HTTPS
#[derive(Debug, Clone)]
pub struct RestTransport {
    client: Client,
    username: String,
    api_key: String,
    endpoint_url: String,
}

impl RestTransport {
    /// Create a new REST transport
    pub fn new(
        username: String,
        api_key: String,
        endpoint_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::Request)?;
        let endpoint_url = endpoint_url.unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());

        debug!("Creating RestTransport");
        debug!("  Username: {}", username);
        debug!("  API Key: {}", redact(&api_key));
        debug!("  Endpoint: {}", endpoint_url);

        Ok(Self {
            client,
            username,
            api_key,
            endpoint_url,
        })
    }

    /// Create a transport from any configuration implementing ApiConfig trait
    pub fn from_config<C>(config: &C) -> std::result::Result<Self, C::Error>
    where
        C: ApiConfig,
        C::Error: From<ApiError>,
    {
        debug!("Creating RestTransport from config");
        let username = config.get_username()?;
        let api_key = config.get_api_key()?;
        let endpoint_url = config.get_endpoint_url()?;
        let timeout = config.get_timeout()?;

        if let Some(ref url) = endpoint_url {
            debug!("Got custom endpoint URL from config: {}", url);
        } else {
            debug!("Using default endpoint URL");
        }

        Ok(Self::new(username, api_key, endpoint_url, timeout)?)
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Build `{endpoint}/{Service}[/{id}]/{method}.json` with mask and filter query parameters
    pub fn url_for(&self, request: &CallRequest) -> Result<Url> {
        let mut path = format!(
            "{}/{}",
            self.endpoint_url.trim_end_matches('/'),
            request.service.as_str()
        );
        if let Some(id) = request.id {
            path.push_str(&format!("/{}", id));
        }
        path.push_str(&format!("/{}.json", request.method));

        let mut url = Url::parse(&path).map_err(HttpError::Url)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(ref mask) = request.mask {
                query.append_pair("objectMask", &mask.to_string());
            }
            if let Some(ref filter) = request.filter {
                query.append_pair("objectFilter", &serde_json::to_string(filter)?);
            }
        }
        // Drop the dangling `?` left by an untouched query serializer
        if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    /// Handle HTTP response and convert errors
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await.map_err(HttpError::Request)?;

        if status.is_success() {
            debug!("Request successful with status: {}", status);
            trace!("Response body: {}", body);
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&body)?);
        }

        error!("Request failed with status: {}", status);
        debug!("Error response body: {}", body);

        Err(map_failure(status, body))
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn call(&self, request: CallRequest) -> Result<Value> {
        let url = self.url_for(&request)?;

        let builder = if request.parameters.is_empty() {
            debug!("HTTP GET request to: {}", url);
            self.client.get(url)
        } else {
            debug!("HTTP POST request to: {}", url);
            let body = serde_json::json!({ "parameters": request.parameters });
            trace!(
                "Request body: {}",
                serde_json::to_string_pretty(&body).unwrap_or_else(|_| "Invalid JSON".to_string())
            );
            self.client.post(url).json(&body)
        };

        let response = builder
            .basic_auth(&self.username, Some(&self.api_key))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("{}::{} request failed: {:?}", request.service, request.method, e);
                HttpError::Request(e)
            })?;

        debug!("Response status: {}", response.status());

        let value = self.handle_response(response).await?;
        info!("{}::{} completed", request.service, request.method);

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slb_core::{FilterOp, ObjectFilter, ObjectMask, RemoteService};

    fn transport() -> RestTransport {
        RestTransport::new(
            "user".to_string(),
            "0123456789abcdef".to_string(),
            Some("https://api.example.test/rest/v3.1/".to_string()),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_url_without_id_or_query() {
        let request = CallRequest::new(RemoteService::Location, "getDataCenters");
        let url = transport().url_for(&request).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.example.test/rest/v3.1/SoftLayer_Location/getDataCenters.json"
        );
    }

    #[test]
    fn test_url_with_id_mask_and_filter() {
        let filter = ObjectFilter::new()
            .with(&["virtualServers", "id"], FilterOp::Value(5))
            .unwrap();
        let request = CallRequest::new(RemoteService::VirtualIpAddress, "getVirtualServers")
            .with_id(42)
            .with_mask(ObjectMask::service_groups())
            .with_filter(filter);
        let url = transport().url_for(&request).unwrap();

        assert_eq!(
            url.path(),
            "/rest/v3.1/SoftLayer_Network_Application_Delivery_Controller_LoadBalancer_VirtualIpAddress/42/getVirtualServers.json"
        );

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("objectMask".to_string(), "mask[serviceGroups]".to_string()),
                (
                    "objectFilter".to_string(),
                    r#"{"virtualServers":{"id":{"operation":5}}}"#.to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact("0123456789abcdef"), "0123...cdef");
        assert_eq!(redact("short"), "****");
        assert_eq!(redact("ключ-0123-αβγδ"), "ключ...αβγδ");
        assert_eq!(redact("αβγδεζηθ"), "****");
    }

    #[test]
    fn test_fault_body_with_code() {
        let body = r#"{"error": "Unable to find object", "code": "SoftLayer_Exception_ObjectNotFound"}"#;

        match map_failure(StatusCode::NOT_FOUND, body.to_string()) {
            ApiError::Fault { code, message } => {
                assert_eq!(code, "SoftLayer_Exception_ObjectNotFound");
                assert_eq!(message, "Unable to find object");
            }
            other => panic!("expected remote fault, got {:?}", other),
        }
    }

    #[test]
    fn test_fault_body_without_code_uses_status() {
        let body = r#"{"error": "Internal Error"}"#;

        match map_failure(StatusCode::INTERNAL_SERVER_ERROR, body.to_string()) {
            ApiError::Fault { code, message } => {
                assert_eq!(code, "500");
                assert_eq!(message, "Internal Error");
            }
            other => panic!("expected remote fault, got {:?}", other),
        }
    }

    #[test]
    fn test_unauthorized_without_fault_body() {
        let error = map_failure(StatusCode::UNAUTHORIZED, "Access Denied".to_string());

        assert!(matches!(
            error,
            ApiError::Http(HttpError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_server_error_without_fault_body() {
        let error = map_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>oops</html>".to_string(),
        );

        match error {
            ApiError::Http(HttpError::HttpError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "<html>oops</html>");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_endpoint() {
        let transport =
            RestTransport::new("user".to_string(), "key".to_string(), None, None).unwrap();
        assert_eq!(transport.endpoint_url(), DEFAULT_ENDPOINT_URL);
    }
}
