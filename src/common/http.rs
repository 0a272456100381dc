use std::time::Duration;

use reqwest::{Client, Error, header::HeaderMap};
use tracing::{debug, warn};

use crate::configs::HttpConfig;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

pub struct HttpClient;

impl HttpClient {
  pub fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
  }

  /// Builds the shared client used for both API calls.
  pub fn new(config: &HttpConfig) -> Result<Client, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
      "Accept",
      reqwest::header::HeaderValue::from_static("application/json, text/plain, */*"),
    );

    let mut builder = Client::builder()
      .user_agent(config.user_agent.clone())
      .default_headers(headers);

    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }

    if let Some(proxy_config) = &config.proxy {
      if let Some(url) = &proxy_config.url {
        debug!("Configuring proxy for LixClient: {}", url);
        match reqwest::Proxy::all(url) {
          Ok(mut proxy) => {
            if let (Some(username), Some(password)) = (&proxy_config.username, &proxy_config.password)
            {
              proxy = proxy.basic_auth(username, password);
            }
            builder = builder.proxy(proxy);
          }
          Err(e) => warn!("Ignoring invalid proxy url {}: {}", url, e),
        }
      }
    }

    builder.build()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::configs::HttpProxyConfig;

  #[test]
  fn builds_with_defaults() {
    assert!(HttpClient::new(&HttpConfig::default()).is_ok());
  }

  #[test]
  fn invalid_proxy_is_skipped() {
    let config = HttpConfig {
      proxy: Some(HttpProxyConfig {
        url: Some("not a url".to_string()),
        username: None,
        password: None,
      }),
      ..HttpConfig::default()
    };
    assert!(HttpClient::new(&config).is_ok());
  }
}
