use vitrine_base::log::show_error;
use vitrine_cli::{logger_init, run};

fn main() {
    logger_init();
    if let Err(err) = run() {
        show_error(&err.to_string());
    }
}
