//! # FINS over Host Link
//!
//! A client for the Omron FINS protocol tunneled inside Host Link ASCII
//! framing over a TCP byte stream, as spoken by serial-to-Ethernet
//! gateways in front of C-series and CS/CJ-series controllers.
//!
//! Four FINS commands are supported:
//!
//! | Command | Code |
//! |---------|------|
//! | Memory area read | 01 01 |
//! | Memory area write | 01 02 |
//! | Clock read | 07 01 |
//! | Clock write | 07 02 |
//!
//! ## Quick start
//!
//! ```no_run
//! use fins_hostlink::{Client, ClientConfig, MemoryArea, ValueEncoding};
//!
//! fn main() -> fins_hostlink::Result<()> {
//!     let mut client = Client::new(ClientConfig::new("192.168.250.5", 9600));
//!
//!     // Read DM100..DM109.
//!     let words = client.memory_area_read(
//!         MemoryArea::DmWord,
//!         100,
//!         0,
//!         10,
//!         ValueEncoding::Binary,
//!     )?;
//!     println!("DM100..DM109 = {words:?}");
//!
//!     // Write a couple of holding words.
//!     client.memory_area_write(MemoryArea::HrWord, 0, 0, &[0xDEAD, 0xBEEF])?;
//!
//!     // Read a single input bit.
//!     let bit = client.memory_area_read_single(
//!         MemoryArea::CioBit,
//!         0,
//!         5,
//!         ValueEncoding::Binary,
//!     )?;
//!     println!("CIO 0.05 = {bit}");
//!     Ok(())
//! }
//! ```
//!
//! ## Layering
//!
//! Requests flow down and responses flow back up through three layers:
//!
//! - [`Client`] builds FINS command text, runs the bounded retry loop and
//!   decodes typed results.
//! - The [`Transport`] seam moves FINS payload text. [`TcpTransport`]
//!   implements it over TCP, adding Host Link framing ([`hostlink`]) and
//!   owning the socket lifecycle: connected lazily, discarded wholesale on
//!   any fault, reopened by the next send.
//! - [`utils`] holds the hex formatting and FCS checksum primitives
//!   everything else is built from.
//!
//! The client is synchronous and single-purpose: blocking I/O, one
//! in-flight request per instance, no multiplexing. Anything concurrent
//! belongs above this crate.
//!
//! ## Errors and diagnostics
//!
//! Operations return [`Result<T, FinsError>`](FinsError) and never panic.
//! Socket faults are absorbed inside the transport (logged via the `log`
//! facade, connection discarded) and only surface as retry consumption;
//! framing and protocol faults are retried the same way. The crate never
//! installs a logger.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod client;
mod command;
mod error;
mod header;
pub mod hostlink;
mod memory;
mod response;
mod transport;
pub mod utils;

// Public re-exports
pub use client::{Client, ClientConfig, DEFAULT_RETRIES};
pub use command::CommandCode;
pub use error::{FinsError, Result};
pub use header::FinsHeader;
pub use memory::{MemoryArea, ValueEncoding};
pub use response::strip_fins_response;
pub use transport::{TcpTransport, Transport, DEFAULT_CONNECT_TIMEOUT};
