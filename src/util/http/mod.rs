use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Method, Response};
use tokio::sync::Semaphore;

use crate::logging::Logger;

pub mod element;
pub mod user_agent;

/// 限制並發請求數，避免被目標網站封禁。
static SEMAPHORE: Lazy<Semaphore> = Lazy::new(|| Semaphore::new(8));

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .brotli(true)
            .deflate(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(15))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .user_agent(user_agent::gen_random_ua())
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Performs an HTTP GET request and returns the response as text.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
/// * `headers`: An optional set of headers to include with the request.
///
/// # Returns
///
/// * `Result<String>`: The response text, or an error if the request fails
///   or the response cannot be read.
pub async fn get(url: &str, headers: Option<header::HeaderMap>) -> Result<String> {
    get_response(url, headers)
        .await?
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))
}

pub async fn get_response(url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    send(Method::GET, url, headers).await
}

/// Sends a single HTTP request using the specified method, URL and headers.
///
/// The request is made once only; quote lookups are user-triggered and
/// best-effort, so a failed attempt is reported straight back to the caller
/// instead of being retried. A non-success status is treated as a failure.
async fn send(method: Method, url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    let visit_log = format!("{method}:{url}");
    let client = get_client()?;
    let mut rb = client.request(method, url);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let _permit = SEMAPHORE.acquire().await;
    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) => {
            LOGGER.info(format!("{} {} ms", visit_log, elapsed));
            response.error_for_status().map_err(|why| {
                anyhow!("Request to {} returned a failure status: {:?}", url, why)
            })
        }
        Err(why) => {
            LOGGER.error(format!(
                "{} failed because {:?}. {} ms",
                visit_log, why, elapsed
            ));
            Err(anyhow!(
                "Failed to send request to {} because {:?}",
                url,
                why
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;

    #[tokio::test]
    #[ignore]
    async fn test_get() {
        dotenv::dotenv().ok();
        match get("https://httpbin.org/html", None).await {
            Ok(text) => {
                logging::debug_file_async(format!("response length: {}", text.len()));
                assert!(!text.is_empty());
            }
            Err(why) => {
                logging::error_file_async(format!("Failed to get because {:?}", why));
            }
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_get_failure_status() {
        dotenv::dotenv().ok();
        let result = get("https://httpbin.org/status/404", None).await;
        assert!(result.is_err());
    }
}
