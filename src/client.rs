//! High-level FINS client.
//!
//! [`Client`] implements the four FINS commands this profile supports on
//! top of any [`Transport`]: memory area read, memory area write, clock
//! read and clock write. Every operation goes through one bounded-retry
//! send/receive cycle; a validated response ends the cycle, anything else
//! consumes an attempt.
//!
//! # Example
//!
//! ```no_run
//! use fins_hostlink::{Client, ClientConfig, MemoryArea, ValueEncoding};
//!
//! fn main() -> fins_hostlink::Result<()> {
//!     let mut client = Client::new(ClientConfig::new("192.168.250.5", 9600));
//!
//!     // Read five words of data memory starting at DM100.
//!     let words = client.memory_area_read(
//!         MemoryArea::DmWord,
//!         100,
//!         0,
//!         5,
//!         ValueEncoding::Binary,
//!     )?;
//!     println!("DM100..DM104 = {words:?}");
//!
//!     // Set HR3 and HR4.
//!     client.memory_area_write(MemoryArea::HrWord, 3, 0, &[0x1234, 0x5678])?;
//!
//!     // Read the controller clock.
//!     println!("controller clock: {}", client.clock_read()?);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use chrono::NaiveDateTime;
use log::{debug, error, warn};

use crate::command::CommandCode;
use crate::error::{FinsError, Result};
use crate::header::FinsHeader;
use crate::memory::{MemoryArea, ValueEncoding};
use crate::response::strip_fins_response;
use crate::transport::{TcpTransport, Transport, DEFAULT_CONNECT_TIMEOUT};
use crate::utils::hex_string;

/// Default retry budget for one operation.
pub const DEFAULT_RETRIES: u32 = 3;

/// Clock text layout: two digits each of year, month, day, hour, minute
/// and second.
const CLOCK_FORMAT: &str = "%y%m%d%H%M%S";

/// Configuration for a [`Client`] over TCP Host Link.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host name or address of the Host Link gateway.
    pub host: String,
    /// TCP port of the Host Link gateway.
    pub port: u16,
    /// Host Link device id of the controller.
    pub device_id: String,
    /// Host Link header code.
    pub header_code: String,
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,
    /// Retry budget per operation.
    pub retries: u32,
}

impl ClientConfig {
    /// Creates a configuration with default device id `"00"`, header code
    /// `"FA"`, a 2 second connect timeout and 3 retries.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_hostlink::ClientConfig;
    ///
    /// let config = ClientConfig::new("192.168.250.5", 9600);
    /// assert_eq!(config.retries, 3);
    /// ```
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            device_id: crate::hostlink::DEFAULT_DEVICE_ID.to_owned(),
            header_code: crate::hostlink::DEFAULT_HEADER_CODE.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Sets the Host Link device id.
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    /// Sets the Host Link header code.
    pub fn with_header_code(mut self, header_code: impl Into<String>) -> Self {
        self.header_code = header_code.into();
        self
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the retry budget per operation.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }
}

/// FINS client, generic over its transport.
///
/// One client instance serves one outstanding request at a time; there is
/// no internal locking. The transport is exclusively owned and replaced
/// wholesale on faults, so the client itself carries no connection state.
pub struct Client<T> {
    transport: T,
    retries: u32,
}

impl Client<TcpTransport> {
    /// Creates a client over TCP Host Link. No connection is made until
    /// the first operation.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_hostlink::{Client, ClientConfig};
    ///
    /// let client = Client::new(ClientConfig::new("192.168.250.5", 9600));
    /// ```
    pub fn new(config: ClientConfig) -> Self {
        let transport = TcpTransport::new(config.host, config.port)
            .with_device_id(config.device_id)
            .with_header_code(config.header_code)
            .with_connect_timeout(config.connect_timeout);
        Self {
            transport,
            retries: config.retries,
        }
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over a caller-supplied transport with the default
    /// retry budget. Any channel that moves FINS command text works; the
    /// client does not care how the bytes travel.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Sets the retry budget per operation.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a FINS command built from `command` and `text`, retrying
    /// until a validated response arrives or the retry budget is spent.
    ///
    /// A failed transport send, an absent response and a response that
    /// fails FINS validation all consume one attempt. The text part of the
    /// validated response is returned; for write-style commands it is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::RetriesExhausted`] when no attempt produced a
    /// validated response.
    pub fn send(&mut self, command: CommandCode, text: &str) -> Result<String> {
        let fins_command = format!(
            "{}{}{}",
            FinsHeader::command().to_hex(),
            command.as_hex(),
            text
        );
        let mut attempts = 0;
        while attempts < self.retries {
            attempts += 1;
            if !self.transport.send(&fins_command) {
                continue;
            }
            let Some(response) = self.transport.receive() else {
                continue;
            };
            match strip_fins_response(&response, command) {
                Some(response_text) => return Ok(response_text.to_owned()),
                None => debug!("discarding invalid response to {command}: {response:?}"),
            }
        }
        error!("no valid FINS response to {command} after {attempts} attempts");
        Err(FinsError::retries_exhausted(attempts))
    }

    /// Reads `count` items from a memory area.
    ///
    /// `bit_address` selects the starting bit within the word for
    /// bit-granular areas and must be 0 for word areas. Items are decoded
    /// per `encoding`; an item that does not parse in the chosen base is
    /// substituted with 0 and logged rather than failing the whole read.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::LengthMismatch`] when the response does not
    /// carry exactly `count` items, or [`FinsError::RetriesExhausted`]
    /// when no validated response arrived.
    pub fn memory_area_read(
        &mut self,
        area: MemoryArea,
        word_address: u16,
        bit_address: u8,
        count: u16,
        encoding: ValueEncoding,
    ) -> Result<Vec<u16>> {
        let command_text = encode_address(area, word_address, bit_address, count);
        let text = self.send(CommandCode::MemoryAreaRead, &command_text)?;

        // Response size is fixed by the area's item width; anything else
        // means the device answered for a different request shape.
        let item_len = area.item_byte_size() * 2;
        let expected = usize::from(count) * item_len;
        if text.len() != expected {
            return Err(FinsError::length_mismatch(expected, text.len()));
        }

        let radix = encoding.radix();
        let mut values = Vec::with_capacity(usize::from(count));
        for start in (0..text.len()).step_by(item_len) {
            let item = &text[start..start + item_len];
            match u16::from_str_radix(item, radix) {
                Ok(value) => values.push(value),
                Err(_) => {
                    warn!("{item} is not a base {radix} number, setting to 0");
                    values.push(0);
                }
            }
        }
        Ok(values)
    }

    /// Reads a single item from a memory area.
    pub fn memory_area_read_single(
        &mut self,
        area: MemoryArea,
        word_address: u16,
        bit_address: u8,
        encoding: ValueEncoding,
    ) -> Result<u16> {
        let values = self.memory_area_read(area, word_address, bit_address, 1, encoding)?;
        values
            .first()
            .copied()
            .ok_or_else(|| FinsError::invalid_response("memory read returned no items"))
    }

    /// Writes `values` to consecutive items of a memory area.
    ///
    /// Each value is encoded at the area's item width; callers must ensure
    /// values fit (at most 0xFF for bit areas). A successful write is
    /// acknowledged by an empty response text.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::InvalidResponse`] when the device acknowledged
    /// with unexpected data, or [`FinsError::RetriesExhausted`] when no
    /// validated response arrived.
    pub fn memory_area_write(
        &mut self,
        area: MemoryArea,
        word_address: u16,
        bit_address: u8,
        values: &[u16],
    ) -> Result<()> {
        let item_bytes = area.item_byte_size();
        let data: String = values
            .iter()
            .map(|value| hex_string(*value, item_bytes))
            .collect();
        let command_text = format!(
            "{}{}",
            encode_address(area, word_address, bit_address, values.len() as u16),
            data
        );
        let text = self.send(CommandCode::MemoryAreaWrite, &command_text)?;
        if text.is_empty() {
            Ok(())
        } else {
            Err(FinsError::invalid_response(
                "memory write returned unexpected data",
            ))
        }
    }

    /// Writes a single item to a memory area.
    pub fn memory_area_write_single(
        &mut self,
        area: MemoryArea,
        word_address: u16,
        bit_address: u8,
        value: u16,
    ) -> Result<()> {
        self.memory_area_write(area, word_address, bit_address, &[value])
    }

    /// Reads the controller clock.
    ///
    /// The first twelve characters of the response are the instant as
    /// `YYMMDDHHMMSS`; a trailing day-of-week byte, when present, is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::InvalidClock`] when the response is too short
    /// or not a valid calendar instant.
    pub fn clock_read(&mut self) -> Result<NaiveDateTime> {
        let text = self.send(CommandCode::ClockRead, "")?;
        let stamp = text
            .get(..12)
            .ok_or_else(|| FinsError::invalid_clock(text.as_str()))?;
        NaiveDateTime::parse_from_str(stamp, CLOCK_FORMAT)
            .map_err(|_| FinsError::invalid_clock(stamp))
    }

    /// Sets the controller clock to `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`FinsError::InvalidResponse`] when the device acknowledged
    /// with unexpected data, or [`FinsError::RetriesExhausted`] when no
    /// validated response arrived.
    pub fn clock_write(&mut self, clock: NaiveDateTime) -> Result<()> {
        let command_text = clock.format(CLOCK_FORMAT).to_string();
        let text = self.send(CommandCode::ClockWrite, &command_text)?;
        if text.is_empty() {
            Ok(())
        } else {
            Err(FinsError::invalid_response(
                "clock write returned unexpected data",
            ))
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .field("retries", &self.retries)
            .finish()
    }
}

/// Encodes the address block shared by memory read and write commands:
/// area code, word address, bit address, item count.
fn encode_address(area: MemoryArea, word_address: u16, bit_address: u8, count: u16) -> String {
    format!(
        "{}{}{}{}",
        hex_string(u16::from(area.code()), 1),
        hex_string(word_address, 2),
        hex_string(u16::from(bit_address), 1),
        hex_string(count, 2)
    )
}
