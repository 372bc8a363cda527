#[tokio::main]
async fn main() {
    vitalens::init_tracing();

    if let Err(err) = vitalens::run().await {
        tracing::error!(%err, "Fatal error");
        std::process::exit(1);
    }
}
