use crate::core::cidr_set::CidrSet;
use crate::core::config::{Config, ConfigBuilder};
use crate::core::errors::{Error, Result};
use log::{error, info};
use std::fs;
use std::{thread, time};

// Error type for a single retrieval attempt.
type AttemptError = Box<dyn std::error::Error + Send + Sync + 'static>;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ retrieves the IP ranges document using the configuration from
/// the environment (or the defaults) and returns the CloudFront [CidrSet].
///
/// ```no_run
/// let cidr_set = cfipcheck::get_cidr_set().unwrap();
/// let address = "54.182.204.72".parse().unwrap();
/// println!("{address} is CloudFront: {}", cidr_set.contains(address));
/// ```
pub fn get_cidr_set() -> Result<CidrSet> {
    Client::new(ConfigBuilder::new().build()?).get_cidr_set()
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Retrieves the IP ranges document from the configured URL (or local file) and builds the
/// [CidrSet] for the configured service. Retrieval makes up to `retry_count` attempts with
/// exponential backoff between them.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Client { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /*-------------------------------------------------------------------------
      Get CIDR Set
    -------------------------------------------------------------------------*/

    /// Retrieve and parse the document. Any failure is [Error::SourceUnavailable] naming the
    /// URL or file the document was read from.
    pub fn get_cidr_set(&self) -> Result<CidrSet> {
        let origin = self.config.origin();
        let document = self.get_document()?;
        CidrSet::from_json(&document, self.config.service())
            .map_err(|error| error.at_origin(&origin))
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Get the document from the local file, when configured, or the URL.
    fn get_document(&self) -> Result<Vec<u8>> {
        match self.config.file() {
            Some(file) => fs::read(file)
                .inspect(|_| info!("Read IP ranges from: {:?}", file))
                .map_err(|error| Error::source_unavailable(file.display().to_string(), error)),
            None => self
                .get_document_from_url()
                .map_err(|error| Error::source_unavailable(self.config.url(), error)),
        }
    }

    /// Get the document from the URL, retrying failed attempts.
    fn get_document_from_url(&self) -> std::result::Result<Vec<u8>, AttemptError> {
        let client = self.http_client()?;
        let url = self.config.url();

        let mut attempt: u32 = 0;
        loop {
            info!("Get IP ranges from URL; Attempt {}: GET {}", attempt, url);
            let document = client
                .get(url)
                .send()
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.bytes())
                .map(|body| body.to_vec())
                .map_err(AttemptError::from)
                .and_then(validate_json);

            match document {
                Ok(document) => {
                    info!("Get IP ranges from URL; Attempt {}: Ok", attempt);
                    break Ok(document);
                }
                Err(error) => {
                    error!(
                        "Get IP ranges from URL; Attempt {}: FAILED: {}",
                        attempt, error
                    );

                    let delay = time::Duration::from_millis(backoff_delay(
                        self.config.retry_initial_delay(),
                        self.config.retry_backoff_factor(),
                        attempt,
                    ));

                    attempt += 1;

                    if attempt < self.config.retry_count() {
                        thread::sleep(delay);
                        continue;
                    } else {
                        break Err(error);
                    }
                }
            }
        }
    }

    /// A blocking HTTP client, routed through the proxy when the proxy rule applies to this
    /// host.
    fn http_client(&self) -> std::result::Result<reqwest::blocking::Client, AttemptError> {
        let builder = reqwest::blocking::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let builder = match self
            .config
            .proxy_rule()
            .and_then(|proxy_rule| proxy_rule.for_local_host())
        {
            Some(proxy) => {
                info!("Using HTTP proxy: {proxy}");
                builder.proxy(reqwest::Proxy::all(proxy)?)
            }
            None => builder,
        };

        Ok(builder.build()?)
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Milliseconds to wait after failed `attempt`: `initial_delay * backoff_factor ^ attempt`,
/// saturating at `u64::MAX`.
fn backoff_delay(initial_delay: u64, backoff_factor: u64, attempt: u32) -> u64 {
    initial_delay.saturating_mul(backoff_factor.saturating_pow(attempt))
}

/// Validate a response body is non-empty, parsable JSON.
fn validate_json(body: Vec<u8>) -> std::result::Result<Vec<u8>, AttemptError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err("Empty response body".into());
    }

    serde_json::from_slice::<serde::de::IgnoredAny>(&body)
        .and(Ok(body))
        .or(Err("Invalid JSON".into()))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cidr_set::tests::TEST_DOCUMENT;
    use crate::core::errors::log_error;
    use std::path::PathBuf;
    use test_log::test;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path: PathBuf = [".", "scratch", name].iter().collect();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /*-------------------------------------------------------------------------
      Test Local File Source
    -------------------------------------------------------------------------*/

    /// FILE: ./scratch/test_get_cidr_set_from_file.json
    #[test]
    fn test_get_cidr_set_from_file() {
        let file = scratch_file("test_get_cidr_set_from_file.json", TEST_DOCUMENT);
        let config = ConfigBuilder::default().file(&file).build().unwrap();

        let cidr_set = Client::new(config).get_cidr_set().inspect_err(log_error);
        assert_eq!(cidr_set.unwrap().len(), 3);
    }

    /// FILE: ./scratch/test_get_cidr_set_from_empty_file.json
    #[test]
    fn test_get_cidr_set_from_empty_file() {
        let file = scratch_file("test_get_cidr_set_from_empty_file.json", "");
        let config = ConfigBuilder::default().file(&file).build().unwrap();

        match Client::new(config).get_cidr_set() {
            Err(Error::SourceUnavailable { origin, .. }) => {
                assert_eq!(origin, file.display().to_string())
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_get_cidr_set_from_missing_file() {
        let config = ConfigBuilder::default()
            .file("./scratch/this-file-does-not-exist.json")
            .build()
            .unwrap();

        let result = Client::new(config).get_cidr_set();
        assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
    }

    /*-------------------------------------------------------------------------
      Test URL Source
    -------------------------------------------------------------------------*/

    /// Nothing listens on the discard port of the loopback interface.
    #[test]
    fn test_get_cidr_set_unreachable_url() {
        let url = "http://127.0.0.1:9/ip-ranges.json";
        let config = ConfigBuilder::default()
            .url(url)
            .retry_count(2)
            .retry_initial_delay(10)
            .build()
            .unwrap();

        match Client::new(config).get_cidr_set() {
            Err(Error::SourceUnavailable { origin, .. }) => assert_eq!(origin, url),
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    /*-------------------------------------------------------------------------
      Test Response Validation
    -------------------------------------------------------------------------*/

    #[test]
    fn test_validate_json() {
        assert!(validate_json(br#"{"prefixes": []}"#.to_vec()).is_ok());
        assert!(validate_json(b"".to_vec()).is_err());
        assert!(validate_json(b" \n".to_vec()).is_err());
        assert!(validate_json(b"<html></html>".to_vec()).is_err());
    }

    /*-------------------------------------------------------------------------
      Test Retry Backoff
    -------------------------------------------------------------------------*/

    #[test]
    fn test_backoff_delay() {
        assert_eq!(backoff_delay(200, 2, 0), 200);
        assert_eq!(backoff_delay(200, 2, 3), 1600);
        assert_eq!(backoff_delay(200, 1, 40), 200);
    }

    #[test]
    fn test_backoff_delay_saturates() {
        assert_eq!(backoff_delay(200, 2, 64), u64::MAX);
        assert_eq!(backoff_delay(200, 2, u32::MAX), u64::MAX);
        assert_eq!(backoff_delay(u64::MAX, 2, 1), u64::MAX);
    }
}
