use crate::{
    backend::traits::ImagineBackend,
    config::Config,
    error::{ImagineError, Result},
    models::{
        ChatRequest, ChatResponse, GalleryResponse, GenerateResponse, GenerationRequest,
        GenerationStatus, ModelId, ProgressResponse,
    },
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

pub struct HttpBackend {
    client: Client,
    origin: Url,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let origin = config.backend_origin()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ImagineError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self { client, origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// `path` is relative, so it lands under the origin's path prefix.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.origin
            .join(path)
            .map_err(|e| ImagineError::Config(format!("invalid endpoint '{}': {}", path, e)))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            log::warn!("Backend replied {} for {}", status, url);
            return Err(ImagineError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ImagineError::Response(format!("unexpected body from {}: {}", url, e)))
    }
}

#[async_trait]
impl ImagineBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = self.endpoint("generate")?;
        log::info!("Submitting prompt to {} with model {}", url, request.model);
        log::debug!("Generation request: {:?}", request);

        let response = self.client.post(url).json(request).send().await?;
        let body: GenerateResponse = Self::read_json(response).await?;
        body.into_image_url()
    }

    async fn progress(&self, model: ModelId) -> Result<GenerationStatus> {
        let mut url = self.endpoint("progress")?;
        url.query_pairs_mut().append_pair("model", model.as_str());

        let response = self.client.get(url).send().await?;
        let body: ProgressResponse = Self::read_json(response).await?;
        body.into_status()
    }

    async fn cancel(&self) -> Result<()> {
        let url = self.endpoint("cancel")?;
        let response = self.client.post(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(ImagineError::Http {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }

    async fn gallery(&self) -> Result<Vec<String>> {
        let url = self.endpoint("gallery")?;
        let response = self.client.get(url).send().await?;
        let body: GalleryResponse = Self::read_json(response).await?;
        Ok(body.into_images())
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint("api/gemini")?;
        let request = ChatRequest {
            prompt: prompt.to_string(),
        };

        let response = self.client.post(url).json(&request).send().await?;
        log::debug!("Chat response status: {}", response.status());
        let body: ChatResponse = Self::read_json(response).await?;
        body.into_text()
    }
}
