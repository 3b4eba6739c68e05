//! Memory area codes and value encodings.
//!
//! Each addressable region of the controller is selected by a one-byte area
//! code, and the code also fixes how wide one item of that area is on the
//! wire. Bit-granular areas return one byte per item, word-granular areas
//! two; the item size is consulted both when encoding write payloads and
//! when decoding read responses.
//!
//! | Area | Bit code | Word code |
//! |------|----------|-----------|
//! | CIO  | `0x30` | `0xB0` |
//! | WR   | `0x31` | `0xB1` |
//! | HR   | `0x32` | `0xB2` |
//! | AR   | `0x33` | `0xB3` |
//! | DM   | `0x02` | `0x82` |

/// Memory area codes, covering bit and word access to each region.
///
/// When addressing a word-granular area the bit address of the operation
/// must be 0; the protocol itself does not validate this, and neither does
/// the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryArea {
    /// CIO (core I/O) area, bit access.
    CioBit,
    /// WR (work) area, bit access.
    WrBit,
    /// HR (holding) area, bit access.
    HrBit,
    /// AR (auxiliary) area, bit access.
    ArBit,
    /// DM (data memory) area, bit access.
    DmBit,
    /// CIO (core I/O) area, word access.
    CioWord,
    /// WR (work) area, word access.
    WrWord,
    /// HR (holding) area, word access.
    HrWord,
    /// AR (auxiliary) area, word access.
    ArWord,
    /// DM (data memory) area, word access.
    DmWord,
}

impl MemoryArea {
    /// The area code sent on the wire.
    pub(crate) fn code(self) -> u8 {
        match self {
            MemoryArea::CioBit => 0x30,
            MemoryArea::WrBit => 0x31,
            MemoryArea::HrBit => 0x32,
            MemoryArea::ArBit => 0x33,
            MemoryArea::DmBit => 0x02,
            MemoryArea::CioWord => 0xB0,
            MemoryArea::WrWord => 0xB1,
            MemoryArea::HrWord => 0xB2,
            MemoryArea::ArWord => 0xB3,
            MemoryArea::DmWord => 0x82,
        }
    }

    /// Size of one item of this area in bytes: 1 for bit areas, 2 for word
    /// areas. One byte is two hex characters on the wire.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_hostlink::MemoryArea;
    ///
    /// assert_eq!(MemoryArea::CioBit.item_byte_size(), 1);
    /// assert_eq!(MemoryArea::DmWord.item_byte_size(), 2);
    /// ```
    pub fn item_byte_size(self) -> usize {
        match self {
            MemoryArea::CioBit
            | MemoryArea::WrBit
            | MemoryArea::HrBit
            | MemoryArea::ArBit
            | MemoryArea::DmBit => 1,
            MemoryArea::CioWord
            | MemoryArea::WrWord
            | MemoryArea::HrWord
            | MemoryArea::ArWord
            | MemoryArea::DmWord => 2,
        }
    }

    /// Returns whether this code addresses the area with bit granularity.
    pub fn is_bit(self) -> bool {
        self.item_byte_size() == 1
    }
}

impl std::fmt::Display for MemoryArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MemoryArea::CioBit => "CIO bit",
            MemoryArea::WrBit => "WR bit",
            MemoryArea::HrBit => "HR bit",
            MemoryArea::ArBit => "AR bit",
            MemoryArea::DmBit => "DM bit",
            MemoryArea::CioWord => "CIO word",
            MemoryArea::WrWord => "WR word",
            MemoryArea::HrWord => "HR word",
            MemoryArea::ArWord => "AR word",
            MemoryArea::DmWord => "DM word",
        };
        f.write_str(name)
    }
}

/// Numeric representation of memory items on the wire.
///
/// Binary items are plain hexadecimal; BCD items carry one decimal digit
/// per nibble, so their hex text parses as base 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueEncoding {
    /// Plain binary, parsed base 16.
    #[default]
    Binary,
    /// Binary-coded decimal, parsed base 10.
    Bcd,
}

impl ValueEncoding {
    /// The radix items of this encoding are parsed with.
    pub(crate) fn radix(self) -> u32 {
        match self {
            ValueEncoding::Binary => 16,
            ValueEncoding::Bcd => 10,
        }
    }
}
