use crate::core::errors::{Error, Result};
use log::{info, warn};
use regex::{Regex, RegexBuilder};
use std::env;
use std::path::{Path, PathBuf};

/*-------------------------------------------------------------------------------------------------
  Defaults
-------------------------------------------------------------------------------------------------*/

pub const DEFAULT_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";
pub const DEFAULT_SERVICE: &str = "CLOUDFRONT";

/*-------------------------------------------------------------------------------------------------
  Config Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for [Config] with a setter per recognized option.
///
/// ```
/// let config = cfipcheck::ConfigBuilder::default()
///     .url("https://ip-ranges.example.com/ip-ranges.json")
///     .service("CLOUDFRONT_ORIGIN_FACING")
///     .proxy("http://proxy.example.com:8888")
///     .proxy_host_pattern("sites|webroots")
///     .retry_count(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.service(), "CLOUDFRONT_ORIGIN_FACING");
/// assert!(config.proxy_rule().is_some());
/// ```
///
/// [ConfigBuilder::new] sources initial values from environment variables when set;
/// [ConfigBuilder::default] uses the built-in defaults and ignores the environment.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    url: String,
    file: Option<PathBuf>,
    service: String,
    proxy: Option<String>,
    proxy_host_pattern: Option<String>,
    retry_count: u32,
    retry_initial_delay: u64,
    retry_backoff_factor: u64,
}

/*--------------------------------------------------------------------------------------
  Config Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ConfigBuilder {
    /// Create a new [ConfigBuilder] with default configuration values.
    ///
    /// ```
    /// let config = cfipcheck::ConfigBuilder::default().build().unwrap();
    ///
    /// assert_eq!(config.url(), "https://ip-ranges.amazonaws.com/ip-ranges.json");
    /// assert_eq!(config.service(), "CLOUDFRONT");
    /// assert!(config.proxy_rule().is_none());
    /// assert_eq!(config.retry_count(), 1);
    /// ```
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            file: None,
            service: DEFAULT_SERVICE.to_string(),
            proxy: None,
            proxy_host_pattern: None,
            retry_count: 1,           // single attempt
            retry_initial_delay: 200, // 200 ms
            retry_backoff_factor: 2,
        }
    }
}

impl ConfigBuilder {
    /// Create a new [ConfigBuilder] reading initial configuration values from environment
    /// variables when set and default values when they are not.
    ///
    /// The environment variables are:
    /// - `CFIPCHECK_URL`
    /// - `CFIPCHECK_SERVICE`
    /// - `CFIPCHECK_PROXY`
    /// - `CFIPCHECK_PROXY_HOST_PATTERN`
    /// - `CFIPCHECK_RETRY_COUNT`
    /// - `CFIPCHECK_RETRY_INITIAL_DELAY`
    /// - `CFIPCHECK_RETRY_BACKOFF_FACTOR`
    pub fn new() -> Self {
        let default = ConfigBuilder::default();

        Self {
            url: get_env_var("CFIPCHECK_URL", default.url),
            file: default.file,
            service: get_env_var("CFIPCHECK_SERVICE", default.service),
            proxy: get_optional_env_var("CFIPCHECK_PROXY"),
            proxy_host_pattern: get_optional_env_var("CFIPCHECK_PROXY_HOST_PATTERN"),
            retry_count: get_env_var("CFIPCHECK_RETRY_COUNT", default.retry_count),
            retry_initial_delay: get_env_var(
                "CFIPCHECK_RETRY_INITIAL_DELAY",
                default.retry_initial_delay,
            ),
            retry_backoff_factor: get_env_var(
                "CFIPCHECK_RETRY_BACKOFF_FACTOR",
                default.retry_backoff_factor,
            ),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL of the IP ranges document; defaults to
    /// `https://ip-ranges.amazonaws.com/ip-ranges.json`.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Read the IP ranges document from a local file instead of the URL.
    pub fn file<P: AsRef<Path>>(&mut self, file: P) -> &mut Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Set the `service` tag prefixes are filtered on; defaults to `CLOUDFRONT`. Matching is
    /// case-sensitive.
    pub fn service(&mut self, service: &str) -> &mut Self {
        self.service = service.to_string();
        self
    }

    /// Set the HTTP proxy used to reach the URL (`http://host:port`). Without a host pattern
    /// the proxy is always used.
    pub fn proxy(&mut self, proxy: &str) -> &mut Self {
        self.proxy = Some(proxy.to_string());
        self
    }

    /// Only use the proxy when the local hostname matches this (case-insensitive) regular
    /// expression.
    pub fn proxy_host_pattern(&mut self, pattern: &str) -> &mut Self {
        self.proxy_host_pattern = Some(pattern.to_string());
        self
    }

    /// Set the number of attempts made to retrieve the document from the URL; defaults to `1`.
    pub fn retry_count(&mut self, retry_count: u32) -> &mut Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the initial delay (in milliseconds) between attempts; defaults to `200`.
    ///
    /// The delay between attempts is `retry_initial_delay * (retry_backoff_factor ^ attempt)`.
    pub fn retry_initial_delay(&mut self, retry_initial_delay: u64) -> &mut Self {
        self.retry_initial_delay = retry_initial_delay;
        self
    }

    /// Set the factor the delay grows by after each failed attempt; defaults to `2`.
    pub fn retry_backoff_factor(&mut self, retry_backoff_factor: u64) -> &mut Self {
        self.retry_backoff_factor = retry_backoff_factor;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    /// Validate the proxy settings and build the [Config].
    pub fn build(&self) -> Result<Config> {
        let proxy_rule = match (&self.proxy, &self.proxy_host_pattern) {
            (Some(proxy), pattern) => Some(ProxyRule::new(proxy, pattern.as_deref())?),
            (None, Some(pattern)) => {
                warn!("Proxy host pattern {pattern:?} is set without a proxy; ignoring it");
                None
            }
            (None, None) => None,
        };

        Ok(Config {
            url: self.url.clone(),
            file: self.file.clone(),
            service: self.service.clone(),
            proxy_rule,
            retry_count: self.retry_count.max(1),
            retry_initial_delay: self.retry_initial_delay,
            retry_backoff_factor: self.retry_backoff_factor,
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Config
-------------------------------------------------------------------------------------------------*/

/// Run configuration, built once at startup and passed to the [Client](crate::Client).
#[derive(Debug, Clone)]
pub struct Config {
    url: String,
    file: Option<PathBuf>,
    service: String,
    proxy_rule: Option<ProxyRule>,
    retry_count: u32,
    retry_initial_delay: u64,
    retry_backoff_factor: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            file: None,
            service: DEFAULT_SERVICE.to_string(),
            proxy_rule: None,
            retry_count: 1,
            retry_initial_delay: 200,
            retry_backoff_factor: 2,
        }
    }
}

impl Config {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn proxy_rule(&self) -> Option<&ProxyRule> {
        self.proxy_rule.as_ref()
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn retry_initial_delay(&self) -> u64 {
        self.retry_initial_delay
    }

    pub fn retry_backoff_factor(&self) -> u64 {
        self.retry_backoff_factor
    }

    /// Where the document is read from, for log and error messages.
    pub fn origin(&self) -> String {
        match &self.file {
            Some(file) => file.display().to_string(),
            None => self.url.clone(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Proxy Rule
-------------------------------------------------------------------------------------------------*/

/// An HTTP proxy, optionally restricted to hosts whose name matches a pattern.
#[derive(Debug, Clone)]
pub struct ProxyRule {
    proxy: String,
    host_pattern: Option<Regex>,
}

impl ProxyRule {
    pub fn new(proxy: &str, host_pattern: Option<&str>) -> Result<Self> {
        reqwest::Proxy::all(proxy)
            .map_err(|error| Error::InvalidConfig(format!("proxy {proxy:?}: {error}")))?;

        let host_pattern = host_pattern
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|error| {
                        Error::InvalidConfig(format!("proxy host pattern {pattern:?}: {error}"))
                    })
            })
            .transpose()?;

        Ok(ProxyRule {
            proxy: proxy.to_string(),
            host_pattern,
        })
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    /// Returns `true` when the proxy should be used on a host named `hostname`.
    pub fn applies_to(&self, hostname: &str) -> bool {
        self.host_pattern
            .as_ref()
            .map_or(true, |pattern| pattern.is_match(hostname))
    }

    /// The proxy to use on this machine, if any.
    pub fn for_local_host(&self) -> Option<&str> {
        match &self.host_pattern {
            None => Some(self.proxy.as_str()),
            Some(_) => {
                let hostname = hostname::get()
                    .map(|name| name.to_string_lossy().into_owned())
                    .inspect_err(|error| warn!("Unable to read the local hostname: {error}"))
                    .ok()?;
                if self.applies_to(&hostname) {
                    info!("Hostname {hostname:?} matches the proxy host pattern");
                    Some(self.proxy.as_str())
                } else {
                    info!("Hostname {hostname:?} does not match the proxy host pattern");
                    None
                }
            }
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/// Get a non-empty environment variable value.
fn get_optional_env_var(env_var: &str) -> Option<String> {
    env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .inspect(|value| info!("Using {}: {}", env_var, value))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
