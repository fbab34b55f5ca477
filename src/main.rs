fn main() {
    if let Err(error) = quorum::run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
