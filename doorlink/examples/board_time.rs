//! Sync the board's clock to the host and read it back

use doorlink::Board;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let ip = std::env::var("BOARD_IP").unwrap_or_else(|_| "192.168.1.200".to_string());
    let serial = std::env::var("BOARD_SERIAL")
        .unwrap_or_else(|_| "00E04C01".to_string())
        .parse()?;

    let mut board = Board::new(ip, 60000, serial);

    let pushed = board.sync_time().await?;
    println!("Pushed {} to the board", pushed);

    let reported = board.get_time().await?;
    println!("Board reports {}", reported);

    Ok(())
}
