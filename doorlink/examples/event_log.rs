//! Dump the most recent access events from the board

use doorlink::Board;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your board's address and serial number
    let ip = std::env::var("BOARD_IP").unwrap_or_else(|_| "192.168.1.200".to_string());
    let port = std::env::var("BOARD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(60000);
    let serial = std::env::var("BOARD_SERIAL")
        .unwrap_or_else(|_| "00E04C01".to_string())
        .parse()?;

    let mut board = Board::new(ip, port, serial);

    let total = board.event_count().await?;
    println!("Events on the board: {}", total);

    for record in board.access_list(6).await? {
        let when = record
            .timestamp_parsed()
            .map(|ts| ts.to_string())
            .unwrap_or_else(|_| record.timestamp.clone());

        println!(
            "#{}\t{}\tdoor 0x{:02x}\ttag {}{}\t{}",
            record.index,
            if record.access_granted { "granted" } else { "denied" },
            record.door_id,
            record.tag_serial,
            if record.is_keypad_entry() { " (keypad)" } else { "" },
            when
        );
    }

    Ok(())
}
