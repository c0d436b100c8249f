fn main() {
    if let Err(err) = launcher::native::run() {
        eprintln!("launcher failed: {err}");
        std::process::exit(1);
    }
}
