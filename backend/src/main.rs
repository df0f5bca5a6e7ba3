use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = backend::init_tracing() {
        eprintln!("{error}");
        std::process::exit(1);
    }

    if let Err(error) = backend::run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}
