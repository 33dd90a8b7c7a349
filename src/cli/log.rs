use clap_verbosity_flag::Verbosity;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/// Log to stderr so stdout carries only results.
pub fn init(verbosity: &Verbosity) {
    let result = stderrlog::new()
        .module(env!("CARGO_CRATE_NAME"))
        .verbosity(verbosity.log_level_filter())
        .init();

    if let Err(error) = result {
        eprintln!("Unable to initialize logging: {error}");
    }
}
