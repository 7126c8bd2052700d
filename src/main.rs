fn main() {
    if let Err(err) = freehand_label::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
