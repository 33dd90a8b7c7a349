use clap::Parser;
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check whether IPv4 addresses are AWS CloudFront IPs.",
    long_about = "Check whether IPv4 addresses are AWS CloudFront IPs.\n\n\
        Addresses are taken from the command line; when none are given they are read from \
        standard input, one or more per line separated by commas or whitespace."
)]
pub struct Args {
    /// URL of the AWS IP ranges JSON document
    #[arg(long)]
    pub url: Option<String>,

    /// Read the IP ranges JSON document from this file instead of the URL
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Only use IP prefixes published for this service
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// HTTP proxy used to retrieve the IP ranges (http://host:port)
    #[arg(long)]
    pub proxy: Option<String>,

    /// Only use the proxy when the local hostname matches this regular expression
    #[arg(long)]
    pub proxy_host_pattern: Option<String>,

    /// Number of attempts made to retrieve the IP ranges
    #[arg(long)]
    pub retry_count: Option<u32>,

    /// Print the loaded CIDR blocks and exit
    #[arg(long)]
    pub show_ranges: bool,

    /// Print a summary table of the results
    #[arg(long)]
    pub summary: bool,

    /// Also save the results to a CSV file
    #[arg(long = "csv")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// IPv4 addresses to check; read from standard input when none are given. Every argument
    /// after the first address is taken as an address, even when it starts with `-`
    #[arg(allow_hyphen_values = true)]
    pub addresses: Vec<String>,
}
