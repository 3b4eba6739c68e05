//! TCP transport carrying Host Link frames.
//!
//! The transport owns the socket and the Host Link framing; the FINS layer
//! above it deals only in command/response payload text. Faults never cross
//! this boundary: every socket-level error is logged, the connection is
//! discarded wholesale, and the caller sees a failed send or an absent
//! response. The next send opens a fresh connection.
//!
//! No read timeout is applied beyond what the operating system enforces; a
//! peer that accepts a command but never sends the frame terminator will
//! block [`Transport::receive`] until the socket itself gives up.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::{debug, error};

use crate::hostlink::{self, DEFAULT_DEVICE_ID, DEFAULT_HEADER_CODE, TERMINATOR};

/// Default timeout for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Receive buffer chunk size.
const RECV_BUF_SIZE: usize = 4096;

/// A channel that can carry FINS command and response text.
///
/// Implementations own their framing and error recovery; the FINS client
/// only learns whether a send was accepted and whether a response payload
/// arrived. One outstanding request at a time is assumed.
pub trait Transport {
    /// Sends a FINS command, returning `true` when it was fully written.
    fn send(&mut self, fins_command: &str) -> bool;

    /// Receives one FINS response payload, or `None` when no usable
    /// response could be read.
    fn receive(&mut self) -> Option<String>;
}

/// Host Link transport over a TCP byte stream.
///
/// The connection is opened lazily by the first [`Transport::send`] and
/// kept across exchanges until a fault discards it. There is no pooling
/// and no locking; a `TcpTransport` serves one caller.
///
/// # Example
///
/// ```no_run
/// use fins_hostlink::{TcpTransport, Transport};
///
/// let mut transport = TcpTransport::new("192.168.250.5", 9600);
/// if transport.send("0800002000000000000000701") {
///     if let Some(response) = transport.receive() {
///         println!("response payload: {response}");
///     }
/// }
/// ```
pub struct TcpTransport {
    host: String,
    port: u16,
    device_id: String,
    header_code: String,
    connect_timeout: Duration,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Creates a transport for `host:port` with the default device id,
    /// header code and connect timeout. Nothing is connected yet.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            device_id: DEFAULT_DEVICE_ID.to_owned(),
            header_code: DEFAULT_HEADER_CODE.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            stream: None,
        }
    }

    /// Sets the Host Link device id (default `"00"`).
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    /// Sets the Host Link header code (default `"FA"`).
    pub fn with_header_code(mut self, header_code: impl Into<String>) -> Self {
        self.header_code = header_code.into();
        self
    }

    /// Sets the connect timeout (default 2 seconds).
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the configured remote host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the configured remote port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    fn open(&self) -> std::io::Result<TcpStream> {
        let mut last_err = None;
        for addr in (self.host.as_str(), self.port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no addresses resolved for {}:{}", self.host, self.port),
            )
        }))
    }

    fn try_send(&mut self, frame: &[u8]) -> std::io::Result<()> {
        let stream = match self.stream.take() {
            Some(stream) => stream,
            None => self.open()?,
        };
        self.stream.insert(stream).write_all(frame)
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, fins_command: &str) -> bool {
        let frame = hostlink::build_frame(fins_command, &self.device_id, &self.header_code);
        debug!("sending frame {frame:?}");
        match self.try_send(frame.as_bytes()) {
            Ok(()) => true,
            Err(e) => {
                error!("socket send error: {e}");
                self.stream = None;
                false
            }
        }
    }

    fn receive(&mut self) -> Option<String> {
        let mut response = String::new();
        while !response.contains(TERMINATOR) {
            let Some(stream) = self.stream.as_mut() else {
                error!("receive attempted without an open connection");
                return None;
            };
            let mut buf = [0u8; RECV_BUF_SIZE];
            match stream.read(&mut buf) {
                Ok(0) => {
                    error!("peer closed the connection");
                    self.stream = None;
                    return None;
                }
                Ok(n) => response.push_str(&String::from_utf8_lossy(&buf[..n])),
                Err(e) => {
                    error!("socket receive error: {e}");
                    self.stream = None;
                    return None;
                }
            }
        }
        debug!("received frame {response:?}");
        // A checksum failure is a framing fault, not a socket fault; the
        // connection stays open and the retry loop upstream decides.
        hostlink::strip_frame(&response, &self.device_id, &self.header_code).map(str::to_owned)
    }
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("device_id", &self.device_id)
            .field("header_code", &self.header_code)
            .field("connected", &self.stream.is_some())
            .finish()
    }
}
