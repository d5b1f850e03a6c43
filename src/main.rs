#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = siakad_rust::run().await {
        eprintln!("siakad-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
