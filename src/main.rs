fn main() {
    if let Err(e) = gemcha::cli::main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
