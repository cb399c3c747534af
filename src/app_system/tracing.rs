/// Configure tracing once at application startup for the entire process.
///
/// Verbosity follows `RUST_LOG` (default `info`). Log lines go to stderr so
/// they stay out of the console dialogue on stdout.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
