fn main() {
    if let Err(err) = douyin_insight_lib::app::run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
