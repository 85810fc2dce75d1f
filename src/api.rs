//! REST access to the hosted reviews table.
//!
//! [`RestClient`] knows how to address and authenticate against the backend;
//! [`ReviewRepository`] turns that into typed review operations. The actual
//! network call goes through [`HttpClient`] so the browser fetch
//! implementation can be swapped out in tests.

use crate::config::BackendConfig;
use crate::error::{ReviewError, TransportError};
use crate::models::review::{NewReview, Review, ReviewFilter, ReviewSubmission};
use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, Response};
use leptos::logging::log;

const REST_PREFIX: &str = "rest/v1";
const REVIEWS_TABLE: &str = "reviews";

/// Sends a fully built request and hands back status, headers and body text.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn send(&self, request: Request<String>) -> Result<Response<String>, TransportError>;
}

/// Fetch-based client used in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttp;

impl HttpClient for BrowserHttp {
    async fn send(&self, request: Request<String>) -> Result<Response<String>, TransportError> {
        use gloo_net::http::Request as FetchRequest;

        let (parts, body) = request.into_parts();
        let url = parts.uri.to_string();
        let mut builder = match parts.method.as_str() {
            "GET" => FetchRequest::get(&url),
            "POST" => FetchRequest::post(&url),
            _ => return Err(TransportError::UnsupportedMethod(parts.method)),
        };
        for (name, value) in parts.headers.iter() {
            let value = value
                .to_str()
                .map_err(|e| TransportError::Network(format!("header {name}: {e}")))?;
            builder = builder.header(name.as_str(), value);
        }

        let request = if body.is_empty() {
            builder.build()
        } else {
            builder.body(body)
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Response::builder().status(status).body(text)?)
    }
}

/// Per-call request settings. Headers given here are merged over the
/// defaults added by [`RestClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: String) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.headers.insert(name, HeaderValue::from_static(value));
        self
    }
}

#[derive(Debug, Clone)]
pub struct RestClient<C> {
    config: BackendConfig,
    http: C,
}

impl<C> RestClient<C> {
    pub fn new(config: BackendConfig, http: C) -> Self {
        Self { config, http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{REST_PREFIX}/{endpoint}", self.config.base_url)
    }
}

impl<C: HttpClient> RestClient<C> {
    /// Issues one request against `{base_url}/rest/v1/{endpoint}`.
    ///
    /// The API key goes out both as `apikey` and as a bearer token, with a
    /// JSON content type. Caller headers are applied last and win on
    /// conflict. The response is returned as-is; status codes are left to
    /// the caller.
    pub async fn request(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Response<String>, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("apikey"),
            HeaderValue::from_str(&self.config.api_key)?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(options.headers);

        let mut request = Request::builder()
            .method(options.method)
            .uri(self.url(endpoint))
            .body(options.body.unwrap_or_default())?;
        *request.headers_mut() = headers;

        self.http.send(request).await
    }
}

/// Typed operations on the `reviews` table. Every call is a single attempt.
#[derive(Debug, Clone)]
pub struct ReviewRepository<C> {
    client: RestClient<C>,
}

impl<C> ReviewRepository<C> {
    pub fn new(client: RestClient<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RestClient<C> {
        &self.client
    }
}

impl<C: HttpClient> ReviewRepository<C> {
    /// Lists approved reviews, newest first.
    pub async fn fetch_reviews(&self, filter: ReviewFilter) -> Result<Vec<Review>, ReviewError> {
        let endpoint = format!("{REVIEWS_TABLE}?{}", filter.query());
        let response = self
            .client
            .request(&endpoint, RequestOptions::get().header(ACCEPT, "application/json"))
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReviewError::Fetch(status.as_u16()));
        }

        let reviews: Vec<Review> =
            serde_json::from_str(response.body()).map_err(ReviewError::Decode)?;
        log!("[REVIEWS] Fetched {} reviews for {}", reviews.len(), endpoint);
        Ok(reviews)
    }

    /// Inserts a review for moderation. The backend is asked not to echo the
    /// row back, so success carries no data.
    pub async fn submit_review(&self, submission: ReviewSubmission) -> Result<(), ReviewError> {
        let payload = NewReview::from(submission);
        let body = serde_json::to_string(&payload).map_err(ReviewError::Encode)?;
        let response = self
            .client
            .request(
                REVIEWS_TABLE,
                RequestOptions::post(body).header(HeaderName::from_static("prefer"), "return=minimal"),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.into_body();
            return Err(ReviewError::Submit(if detail.is_empty() {
                format!("Submit failed: {}", status.as_u16())
            } else {
                detail
            }));
        }

        log!("[REVIEWS] Review submitted for moderation");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    /// What the stub saw for one outgoing request.
    #[derive(Debug, Clone)]
    pub(crate) struct RecordedRequest {
        pub method: Method,
        pub uri: String,
        pub headers: HeaderMap,
        pub body: String,
    }

    type Handler = Box<dyn Fn(&Request<String>) -> Result<Response<String>, TransportError>>;

    /// In-memory [`HttpClient`] answering every request with `handler`.
    pub(crate) struct StubHttp {
        handler: Handler,
        requests: RefCell<Vec<RecordedRequest>>,
    }

    impl StubHttp {
        pub(crate) fn new(
            handler: impl Fn(&Request<String>) -> Result<Response<String>, TransportError> + 'static,
        ) -> Self {
            Self {
                handler: Box::new(handler),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn responding(status: u16, body: &'static str) -> Self {
            Self::new(move |_| reply(status, body))
        }

        pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.borrow().clone()
        }
    }

    impl HttpClient for StubHttp {
        async fn send(&self, request: Request<String>) -> Result<Response<String>, TransportError> {
            self.requests.borrow_mut().push(RecordedRequest {
                method: request.method().clone(),
                uri: request.uri().to_string(),
                headers: request.headers().clone(),
                body: request.body().clone(),
            });
            (self.handler)(&request)
        }
    }

    pub(crate) fn reply(status: u16, body: &str) -> Result<Response<String>, TransportError> {
        Ok(Response::builder().status(status).body(body.to_string())?)
    }

    pub(crate) fn repository(http: StubHttp) -> ReviewRepository<StubHttp> {
        let config = BackendConfig::new("https://demo.supabase.co", "anon-key").unwrap();
        ReviewRepository::new(RestClient::new(config, http))
    }

    pub(crate) fn review_row(id: i64, rating: i64, name: Option<&str>) -> Value {
        json!({
            "id": id,
            "rating": rating,
            "review_text": format!("Review number {id} with enough text"),
            "reviewer_name": name,
            "approved": true,
            "featured": false,
            "created_at": "2024-03-09T14:05:00+00:00"
        })
    }
}
