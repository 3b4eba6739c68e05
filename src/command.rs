//! FINS command codes.
//!
//! Only the four commands the Host Link profile of this client needs are
//! modeled. The two-byte code is sent as four hex characters directly after
//! the FINS header, and a valid response echoes the same code back.

/// FINS command codes supported by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// Memory area read (01 01).
    MemoryAreaRead,
    /// Memory area write (01 02).
    MemoryAreaWrite,
    /// Clock read (07 01).
    ClockRead,
    /// Clock write (07 02).
    ClockWrite,
}

impl CommandCode {
    /// The command code as the four hex characters that go on the wire.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_hostlink::CommandCode;
    ///
    /// assert_eq!(CommandCode::MemoryAreaRead.as_hex(), "0101");
    /// assert_eq!(CommandCode::ClockWrite.as_hex(), "0702");
    /// ```
    pub const fn as_hex(self) -> &'static str {
        match self {
            CommandCode::MemoryAreaRead => "0101",
            CommandCode::MemoryAreaWrite => "0102",
            CommandCode::ClockRead => "0701",
            CommandCode::ClockWrite => "0702",
        }
    }
}

impl std::fmt::Display for CommandCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CommandCode::MemoryAreaRead => "memory area read",
            CommandCode::MemoryAreaWrite => "memory area write",
            CommandCode::ClockRead => "clock read",
            CommandCode::ClockWrite => "clock write",
        };
        write!(f, "{} ({})", name, self.as_hex())
    }
}
