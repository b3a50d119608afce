fn main() {
    bankscope::init();
    if let Err(err) = bankscope::cli::run() {
        eprintln!("error: {err}");
    }
}
