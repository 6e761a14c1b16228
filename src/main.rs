#[tokio::main]
async fn main() -> std::io::Result<()> {
    grenade_boost::run_with_config().await
}
