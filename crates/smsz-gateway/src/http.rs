//! HTTP/JSON gateway client.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{header, Method, Request, Uri};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use smsz_core::{
    CompressRequest, CompressResponse, DecompressRequest, DecompressResponse, ErrorBody,
    GatewayConfig, Result, SmszError,
};

use crate::traits::Gateway;

/// Gateway reached over plain HTTP at `config.base_url`.
pub struct HttpGateway {
    client: Client<HttpConnector, Full<Bytes>>,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let base = config.base();
        let uri = base
            .parse::<Uri>()
            .map_err(|e| SmszError::InvalidAddress(format!("{}: {}", base, e)))?;
        if uri.scheme_str() != Some("http") || uri.host().is_none() {
            return Err(SmszError::InvalidAddress(format!(
                "{}: expected http://host[:port]",
                base
            )));
        }
        let client = Client::builder(TokioExecutor::new()).build_http();
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let payload = serde_json::to_vec(body)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(url.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(Full::new(Bytes::from(payload)))
            .map_err(|e| SmszError::InvalidAddress(format!("{}: {}", url, e)))?;

        debug!(%url, "Gateway request");
        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| SmszError::Transport(e.to_string()))?;
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|e| SmszError::Transport(e.to_string()))?
                .to_bytes();
            Ok::<_, SmszError>((status, bytes))
        };
        let (status, bytes) = tokio::time::timeout(self.config.request_timeout(), exchange)
            .await
            .map_err(|_| SmszError::Timeout(self.config.request_timeout_ms))??;
        debug!(%url, status = status.as_u16(), len = bytes.len(), "Gateway response");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .map(|b| b.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(SmszError::Status { status: status.as_u16(), message });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn compress(&self, text: &str) -> Result<CompressResponse> {
        let body = CompressRequest { text: text.to_string() };
        self.post_json("/compress", &body).await
    }

    async fn decompress(&self, payload: &str) -> Result<String> {
        let body = DecompressRequest { compressed_b64: payload.to_string() };
        let resp: DecompressResponse = self.post_json("/decompress", &body).await?;
        Ok(resp.decompressed_text)
    }
}
