use crate::config::ClientConfig;
use crate::transport::{ApiTransport, ClientError, ClientResult};
use crate::types::{ApiRequest, ApiResponse, Method};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::collections::HashMap;
use tracing::{debug, warn};

pub struct HttpTransport {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config
            .validate()
            .map_err(|msg| ClientError::InvalidConfig { message: msg })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::InvalidConfig {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn with_default_config() -> ClientResult<Self> {
        Self::new(ClientConfig::default())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout {
                message: format!("no response within {:?}", self.config.timeout),
            }
        } else if e.is_connect() {
            ClientError::Connect {
                message: format!("cannot connect to {}: {}", self.config.base_url, e),
            }
        } else {
            ClientError::Network(e)
        }
    }

    fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.config.endpoint(&request.path);
        debug!("Sending {} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.http_client.get(&url),
            Method::Post => self.http_client.post(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let http_response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        let status = http_response.status().as_u16();
        let headers = Self::collect_headers(http_response.headers());
        let text = http_response.text().await.map_err(|e| {
            warn!("Failed to read body from {}: {}", url, e);
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                ClientError::Decode {
                    message: format!("cannot read response body: {}", e),
                }
            }
        })?;

        debug!("{} {} -> HTTP {}", request.method, url, status);

        Ok(ApiResponse {
            status,
            headers,
            text,
        })
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
