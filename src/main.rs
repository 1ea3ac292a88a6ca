#[tokio::main]
async fn main() {
    estate_backend::run().await;
}
