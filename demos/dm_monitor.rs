//! Example: polling controller memory through a Host Link gateway.
//!
//! Run with: cargo run --example dm_monitor -- <host> [port]

use fins_hostlink::{Client, ClientConfig, MemoryArea, ValueEncoding};

fn main() -> fins_hostlink::Result<()> {
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.250.5".to_owned());
    let port = std::env::args()
        .nth(2)
        .and_then(|p| p.parse().ok())
        .unwrap_or(9600);

    let mut client = Client::new(ClientConfig::new(host, port));

    // Five words of data memory starting at DM100.
    let words = client.memory_area_read(MemoryArea::DmWord, 100, 0, 5, ValueEncoding::Binary)?;
    for (offset, word) in words.iter().enumerate() {
        println!("DM{} = {word} (0x{word:04X})", 100 + offset);
    }

    // A BCD-encoded counter in holding memory.
    let counter = client.memory_area_read_single(MemoryArea::HrWord, 0, 0, ValueEncoding::Bcd)?;
    println!("HR0 (BCD) = {counter}");

    // A single input bit.
    let bit = client.memory_area_read_single(MemoryArea::CioBit, 0, 5, ValueEncoding::Binary)?;
    println!("CIO 0.05 = {bit}");

    // The controller's idea of the current time.
    let clock = client.clock_read()?;
    println!("controller clock: {clock}");

    Ok(())
}
