//! FINS response validation.
//!
//! A FINS response arrives as hex ASCII after the Host Link framing has
//! been removed:
//!
//! | Component | Chars | Description |
//! |-----------|-------|-------------|
//! | Prefix | 4 | `00` + response ICF `C0` |
//! | RSV + GCT | 4 | Ignored |
//! | Address echo | 14 | DNA through SID, echoed from the command |
//! | Command code | 4 | Echo of the command this responds to |
//! | End code | 4 | `0000` on success |
//! | Data | n | Command-specific payload, possibly empty |

use crate::command::CommandCode;

/// Leading characters of every well-formed response: a zero byte followed
/// by the response ICF (`0xC0`).
const RESPONSE_PREFIX: &str = "00C0";

/// Address echo expected in responses: this client sends all-zero routing.
const ADDRESS_ECHO: &str = "00000000000000";

/// End code signaling success.
const END_CODE_OK: &str = "0000";

/// Validates a FINS response to `command` and strips its header, returning
/// the data text (possibly empty).
///
/// Returns `None` when the response is too short, does not carry the
/// response indicator, echoes different routing bytes or a different
/// command code, or reports a non-zero end code. All of these mean "no
/// usable response"; distinguishing them is not worth anything to the
/// retry loop upstream.
///
/// # Example
///
/// ```
/// use fins_hostlink::{strip_fins_response, CommandCode};
///
/// let response = "00C0000200000000000000010100002007";
/// assert_eq!(
///     strip_fins_response(response, CommandCode::MemoryAreaRead),
///     Some("2007")
/// );
/// assert_eq!(strip_fins_response(response, CommandCode::MemoryAreaWrite), None);
/// ```
pub fn strip_fins_response(response: &str, command: CommandCode) -> Option<&str> {
    if !response.is_ascii() || response.len() < 30 {
        return None;
    }
    if &response[..4] != RESPONSE_PREFIX {
        return None;
    }
    // RSV and GCT are echoed here; their values are not interesting.
    if !response[4..8].bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    if &response[8..22] != ADDRESS_ECHO {
        return None;
    }
    if &response[22..26] != command.as_hex() {
        return None;
    }
    if &response[26..30] != END_CODE_OK {
        return None;
    }
    Some(&response[30..])
}
