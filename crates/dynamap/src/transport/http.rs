use async_trait::async_trait;

use super::sender::{HttpRequest, HttpResponse, HttpSender, SendError};

/// [`HttpSender`] backed by a `reqwest::Client`.
///
/// Requests go out unsigned, which suits local service emulators and
/// signing proxies.
#[derive(Debug, Clone, Default)]
pub struct ReqwestSender {
    client: reqwest::Client,
}

impl ReqwestSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        SendError(err.to_string())
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, SendError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| SendError::new(format!("Invalid method {}: {e}", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
