use std::process::exit;

/// Reports a fatal startup error and terminates with a non-zero status.
pub fn show_error(msg: &str) -> ! {
    eprintln!("Error: {msg}");
    exit(1)
}
