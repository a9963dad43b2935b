#[tokio::main]
async fn main() {
    if let Err(e) = ayush_lookup::run().await {
        eprintln!("{}: {e}", ayush_lookup::config::APP_NAME);
        std::process::exit(1);
    }
}
