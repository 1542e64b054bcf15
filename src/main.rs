fn main() {
    use clap::Parser;
    let args = cslscrape::cli::Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();
    if let Err(e) = cslscrape::cli::run(&args) {
        cslscrape::cli::write_error_report(&e, args.verbose, std::io::stderr().lock());
        std::process::exit(e.exit_code());
    }
}
