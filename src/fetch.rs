use super::*;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Issues GET requests.
pub trait Fetcher {
    fn get(&mut self, url: &str) -> Result<Response>;
}

impl<F: Fetcher + ?Sized> Fetcher for &mut F {
    fn get(&mut self, url: &str) -> Result<Response> {
        (**self).get(url)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    fn get(&mut self, url: &str) -> Result<Response> {
        (**self).get(url)
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Respond(Response),
    Fail(String),
}

/// Canned responses keyed by URL. Unmocked URLs fail like an unreachable host.
#[derive(Debug, Default, Clone)]
pub struct MockFetcher {
    replies: HashMap<String, MockReply>,
    calls: VecDeque<String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_json(&mut self, url: &str, body: &str) {
        self.set_response(url, 200, body);
    }

    pub fn set_response(&mut self, url: &str, status: u16, body: &str) {
        self.replies.insert(
            url.to_string(),
            MockReply::Respond(Response {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn set_failure(&mut self, url: &str, message: &str) {
        self.replies
            .insert(url.to_string(), MockReply::Fail(message.to_string()));
    }

    pub fn clear(&mut self) {
        self.replies.clear();
        self.calls.clear();
    }

    pub fn take_calls(&mut self) -> Vec<String> {
        self.calls.drain(..).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl Fetcher for MockFetcher {
    fn get(&mut self, url: &str) -> Result<Response> {
        self.calls.push_back(url.to_string());
        match self.replies.get(url) {
            Some(MockReply::Respond(response)) => Ok(response.clone()),
            Some(MockReply::Fail(message)) => Err(Error::Network(message.clone())),
            None => Err(Error::Network(format!("fetch mock not found for {url}"))),
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use std::error::Error as _;
    use std::time::Duration;

    /// Blocking HTTP client.
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: reqwest::blocking::Client,
    }

    impl HttpFetcher {
        pub fn new(timeout: Option<Duration>) -> Result<Self> {
            let mut builder = reqwest::blocking::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|err| Error::Network(format_reqwest_error(&err)))?;
            Ok(Self { client })
        }

        pub fn from_config(config: &CarouselConfig) -> Result<Self> {
            Self::new(config.http_timeout_ms.map(Duration::from_millis))
        }
    }

    impl Fetcher for HttpFetcher {
        fn get(&mut self, url: &str) -> Result<Response> {
            tracing::debug!(%url, "GET");
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|err| Error::Network(format_reqwest_error(&err)))?;
            let status = response.status().as_u16();
            let body = response
                .text()
                .map_err(|err| Error::Network(format_reqwest_error(&err)))?;
            Ok(Response { status, body })
        }
    }

    fn format_reqwest_error(err: &reqwest::Error) -> String {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
