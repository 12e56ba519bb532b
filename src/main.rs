fn main() {
    if let Err(err) = treegrid::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
