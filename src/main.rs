fn main() {
    if let Err(err) = coltype::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
