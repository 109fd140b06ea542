//! Enroll, verify and remove a tag

use doorlink::{Board, TagId};

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

    // The tag as reported by the RFID scanner
    let tag = TagId::from_scanner(10978235)?;
    println!("Going to work with tag {}", tag);

    if board.add_user(tag).await? {
        println!("✓ Enrolled");
    } else {
        println!("✗ Board rejected the add");
    }

    match board.get_user(tag).await? {
        Some(user) => println!("✓ On the board: {}", user),
        None => println!("✗ Not on the board"),
    }

    if board.delete_user(tag).await? {
        println!("✓ Removed");
    }

    Ok(())
}
