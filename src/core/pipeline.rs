use crate::core::address::parse_ipv4;
use crate::core::cidr_set::CidrSet;
use crate::core::errors::Result;
use log::{debug, info};
use std::fmt;
use std::io::BufRead;

/*-------------------------------------------------------------------------------------------------
  Classification Results
-------------------------------------------------------------------------------------------------*/

/// Outcome of classifying one candidate token.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Classification {
    /// A valid IPv4 address inside one of the CIDR blocks.
    Matched,
    /// A valid IPv4 address outside every CIDR block.
    Unmatched,
    /// Not a valid IPv4 address.
    Invalid,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Matched => "matched",
            Classification::Unmatched => "unmatched",
            Classification::Invalid => "invalid",
        }
    }
}

/// A [Classification] paired with the token it was computed for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClassificationResult {
    pub token: String,
    pub classification: Classification,
}

impl fmt::Display for ClassificationResult {
    /// The line format consumed by downstream `grep` pipelines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.classification {
            Classification::Matched => write!(f, "OK - CloudFront IP: {}", self.token),
            Classification::Unmatched => write!(f, "Bad - not CloudFront IP: {}", self.token),
            Classification::Invalid => {
                write!(f, "Error - not a valid IPv4 address - got: {}", self.token)
            }
        }
    }
}

/*--------------------------------------------------------------------------------------
  Summary
--------------------------------------------------------------------------------------*/

/// Per-run counts of each [Classification].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    pub matched: usize,
    pub unmatched: usize,
    pub invalid: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.matched + self.unmatched + self.invalid
    }

    fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Matched => self.matched += 1,
            Classification::Unmatched => self.unmatched += 1,
            Classification::Invalid => self.invalid += 1,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Input Source
-------------------------------------------------------------------------------------------------*/

/// Where candidate tokens come from; decided once, before any classification.
#[derive(Debug)]
pub enum InputSource<R> {
    /// Command line arguments, one candidate each (program name excluded).
    Arguments(Vec<String>),
    /// Line-oriented text; each line may hold several candidates separated by commas or
    /// whitespace.
    Stream(R),
}

impl<R: BufRead> InputSource<R> {
    /// Arguments win whenever at least one of them is non-empty; otherwise read `stream`.
    ///
    /// `args` must not include the program name.
    pub fn select<I, S>(args: I, stream: R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(Into::into)
            .filter(|arg| !arg.is_empty())
            .collect();

        if args.is_empty() {
            info!("No address arguments; reading addresses from the input stream");
            InputSource::Stream(stream)
        } else {
            info!("Classifying {} address argument(s)", args.len());
            InputSource::Arguments(args)
        }
    }
}

/// Split a line of free-form text into candidate tokens on runs of whitespace and commas.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
}

/*-------------------------------------------------------------------------------------------------
  Classification Pipeline
-------------------------------------------------------------------------------------------------*/

/// Classifies candidate tokens against a read-only [CidrSet].
///
/// ```
/// use cfipcheck::{Classification, CidrSet, InputSource, Pipeline};
///
/// let cidr_set = CidrSet::from_blocks(["54.182.0.0/16".parse().unwrap()]);
/// let pipeline = Pipeline::new(&cidr_set);
///
/// let input = "54.182.204.72, 5.175.193.164\n999.1.1.1\n".as_bytes();
/// let mut lines = Vec::new();
/// let summary = pipeline
///     .run(InputSource::select(Vec::<String>::new(), input), |result| {
///         lines.push(result.to_string());
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(
///     lines,
///     [
///         "OK - CloudFront IP: 54.182.204.72",
///         "Bad - not CloudFront IP: 5.175.193.164",
///         "Error - not a valid IPv4 address - got: 999.1.1.1",
///     ]
/// );
/// assert_eq!(summary.total(), 3);
/// assert_eq!(pipeline.classify("54.182.0.1").classification, Classification::Matched);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Pipeline<'s> {
    cidr_set: &'s CidrSet,
}

impl<'s> Pipeline<'s> {
    pub fn new(cidr_set: &'s CidrSet) -> Self {
        Pipeline { cidr_set }
    }

    /// Validate and classify a single candidate token.
    pub fn classify(&self, token: &str) -> ClassificationResult {
        let classification = match parse_ipv4(token) {
            Ok(address) => match self.cidr_set.find(address) {
                Some(block) => {
                    debug!("{address} is within {block}");
                    Classification::Matched
                }
                None => Classification::Unmatched,
            },
            Err(error) => {
                debug!("{error}");
                Classification::Invalid
            }
        };

        ClassificationResult {
            token: token.to_string(),
            classification,
        }
    }

    /// Drain `source`, passing one result per candidate to `emit` in the order the candidates
    /// are encountered. Stops at the first error from `emit` or from reading the stream.
    pub fn run<R, F>(&self, source: InputSource<R>, mut emit: F) -> Result<Summary>
    where
        R: BufRead,
        F: FnMut(&ClassificationResult) -> Result<()>,
    {
        let mut summary = Summary::default();
        let mut process = |token: &str| -> Result<()> {
            let result = self.classify(token);
            summary.record(result.classification);
            emit(&result)
        };

        match source {
            InputSource::Arguments(args) => {
                for arg in args.iter().filter(|arg| !arg.is_empty()) {
                    process(arg.as_str())?;
                }
            }
            InputSource::Stream(mut reader) => {
                let mut buffer = Vec::new();
                loop {
                    buffer.clear();
                    if reader.read_until(b'\n', &mut buffer)? == 0 {
                        break;
                    }

                    let line = String::from_utf8_lossy(&buffer);
                    let line = line.trim_end();
                    if line.is_empty() {
                        continue;
                    }

                    for token in tokenize(line) {
                        process(token)?;
                    }
                }
            }
        }

        info!(
            "Classified {} candidate(s): {} matched, {} unmatched, {} invalid",
            summary.total(),
            summary.matched,
            summary.unmatched,
            summary.invalid
        );

        Ok(summary)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
