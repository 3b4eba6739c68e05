//! Example: synchronizing the controller clock with the local host.
//!
//! Run with: cargo run --example set_clock -- <host> [port]

use fins_hostlink::{Client, ClientConfig};

fn main() -> fins_hostlink::Result<()> {
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "192.168.250.5".to_owned());
    let port = std::env::args()
        .nth(2)
        .and_then(|p| p.parse().ok())
        .unwrap_or(9600);

    let mut client = Client::new(ClientConfig::new(host, port));

    let before = client.clock_read()?;
    println!("controller clock before: {before}");

    let now = chrono::Local::now().naive_local();
    client.clock_write(now)?;

    let after = client.clock_read()?;
    println!("controller clock after:  {after}");

    Ok(())
}
