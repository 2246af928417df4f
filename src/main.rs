//! convoy binary entry point.

fn main() {
    if let Err(e) = convoy::cli::run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
