use cfipcheck::{Client, InputSource, Pipeline};
use clap::Parser;
use log::info;
use std::io::{self, Write};
use std::process::ExitCode;

mod cli;

/*-------------------------------------------------------------------------------------------------
  Main
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();
    cli::log::init(&args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error - {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args) -> cfipcheck::Result<()> {
    let config = cli::build_config(args)?;
    let cidr_set = Client::new(config).get_cidr_set()?;

    if args.show_ranges {
        cli::output::cidr_blocks(&cidr_set)?;
        return Ok(());
    }

    let mut csv_sink = args
        .csv_file
        .as_ref()
        .map(cli::csv::CsvSink::create)
        .transpose()?;

    let stdin = io::stdin();
    let source = InputSource::select(args.addresses.iter().cloned(), stdin.lock());

    let mut stdout = io::stdout().lock();
    let summary = Pipeline::new(&cidr_set).run(source, |result| {
        writeln!(stdout, "{result}")?;
        if let Some(csv_sink) = csv_sink.as_mut() {
            csv_sink.write(result)?;
        }
        Ok(())
    })?;
    stdout.flush()?;

    if let Some(mut csv_sink) = csv_sink {
        csv_sink.flush()?;
        if let Some(csv_file) = &args.csv_file {
            info!("Saved results to: {:?}", csv_file);
        }
    }

    if args.summary {
        cli::output::summary_table(&summary);
    }

    Ok(())
}
