//! Host Link ASCII framing.
//!
//! Host Link wraps a payload of hex ASCII characters in a device-addressed
//! frame:
//!
//! | Field | Size | Description |
//! |-------|------|-------------|
//! | `@` | 1 | Frame start |
//! | Device id | 2 | Controller unit number, hex |
//! | Header code | 2 | Host Link command type (`FA` = FINS) |
//! | Data | n | Payload, hex ASCII |
//! | FCS | 2 | XOR checksum of everything from `@` through the data |
//! | `*` CR | 2 | Frame terminator |
//!
//! [`strip_frame`] deliberately searches for a frame *anywhere* in the input
//! rather than parsing the whole buffer: socket reads can hand back partial
//! or garbage-wrapped data, and the checksum is the integrity check that
//! matters. One frame per buffer is assumed; concatenated frames fail the
//! FCS comparison and are rejected as a whole.
//!
//! # Example
//!
//! ```
//! use fins_hostlink::hostlink::{build_frame, strip_frame};
//!
//! let frame = build_frame("AL", "04", "RI");
//! assert_eq!(frame, "@04RIAL52*\r");
//! assert_eq!(strip_frame(&frame, "04", "RI"), Some("AL"));
//! ```

use crate::utils::calculate_fcs;

/// Device id used when none is configured.
pub const DEFAULT_DEVICE_ID: &str = "00";

/// Header code for FINS commands tunneled in Host Link.
pub const DEFAULT_HEADER_CODE: &str = "FA";

/// Frame terminator: `*` followed by a carriage return.
pub const TERMINATOR: &str = "*\r";

/// Builds a Host Link frame around `data`.
///
/// The FCS covers the `@`, the device id, the header code and the data.
///
/// # Example
///
/// ```
/// use fins_hostlink::hostlink::{build_frame, DEFAULT_DEVICE_ID, DEFAULT_HEADER_CODE};
///
/// let frame = build_frame(
///     "00C0000200000000000000010100002007",
///     DEFAULT_DEVICE_ID,
///     DEFAULT_HEADER_CODE,
/// );
/// assert_eq!(frame, "@00FA00C000020000000000000001010000200733*\r");
/// ```
pub fn build_frame(data: &str, device_id: &str, header_code: &str) -> String {
    let header = format!("@{device_id}{header_code}");
    let fcs = calculate_fcs(&format!("{header}{data}"));
    format!("{header}{data}{fcs}{TERMINATOR}")
}

/// Extracts the data payload from a Host Link frame found in `raw`.
///
/// The frame may be surrounded by garbage bytes; the search locates the
/// first `@` + device id + header code prefix and the last terminator after
/// it, then recomputes the FCS over the matched header and data. Returns
/// `None` when no frame is found or the checksum does not match.
pub fn strip_frame<'a>(raw: &'a str, device_id: &str, header_code: &str) -> Option<&'a str> {
    let prefix = format!("@{device_id}{header_code}");
    let start = raw.find(&prefix)?;
    let rest = &raw[start + prefix.len()..];
    let end = rest.rfind(TERMINATOR)?;
    // The two characters before the terminator are the embedded FCS.
    if end < 2 {
        return None;
    }
    // Garbage bytes may decode to multi-byte characters; reject instead of
    // slicing through one.
    let data = rest.get(..end - 2)?;
    let frame_fcs = rest.get(end - 2..end)?;
    let expected = calculate_fcs(&raw[start..start + prefix.len() + data.len()]);
    (frame_fcs == expected).then_some(data)
}
