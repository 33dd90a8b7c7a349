use crate::cli;
use cfipcheck::{Config, ConfigBuilder, Result};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the run configuration from CLI arguments
--------------------------------------------------------------------------------------*/

/// Command line values override the environment, which overrides the defaults.
pub fn build_config(args: &cli::Args) -> Result<Config> {
    let mut builder = ConfigBuilder::new();

    if let Some(url) = &args.url {
        builder.url(url);
    }
    if let Some(file) = &args.file {
        builder.file(file);
    }
    if let Some(service) = &args.service {
        builder.service(service);
    }
    if let Some(proxy) = &args.proxy {
        builder.proxy(proxy);
    }
    if let Some(pattern) = &args.proxy_host_pattern {
        builder.proxy_host_pattern(pattern);
    }
    if let Some(retry_count) = args.retry_count {
        builder.retry_count(retry_count);
    }

    builder.build()
}
