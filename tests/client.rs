//! Client behavior against a scripted transport.
//!
//! The mock stands in for the TCP Host Link adapter: it records every FINS
//! command the client hands it and plays back a queue of scripted
//! send/receive outcomes, so retry accounting and encoding can be checked
//! without a controller on the wire.

use std::collections::VecDeque;

use chrono::NaiveDate;
use fins_hostlink::{Client, CommandCode, FinsError, MemoryArea, Transport, ValueEncoding};

/// The fixed FINS command header every request starts with.
const HEADER: &str = "080000200000000000000";

#[derive(Default)]
struct MockTransport {
    sent: Vec<String>,
    send_outcomes: VecDeque<bool>,
    responses: VecDeque<Option<String>>,
    receive_calls: usize,
}

impl MockTransport {
    fn new() -> Self {
        Self::default()
    }

    /// Queues `count` accepted sends.
    fn accept_sends(mut self, count: usize) -> Self {
        self.send_outcomes.extend(std::iter::repeat(true).take(count));
        self
    }

    /// Queues `count` failed sends.
    fn reject_sends(mut self, count: usize) -> Self {
        self.send_outcomes.extend(std::iter::repeat(false).take(count));
        self
    }

    /// Queues a response payload.
    fn respond(mut self, response: &str) -> Self {
        self.responses.push_back(Some(response.to_owned()));
        self
    }

    /// Queues an absent response (transport-level receive failure).
    fn respond_none(mut self) -> Self {
        self.responses.push_back(None);
        self
    }
}

impl Transport for MockTransport {
    fn send(&mut self, fins_command: &str) -> bool {
        self.sent.push(fins_command.to_owned());
        self.send_outcomes.pop_front().expect("unexpected send")
    }

    fn receive(&mut self) -> Option<String> {
        self.receive_calls += 1;
        self.responses.pop_front().expect("unexpected receive")
    }
}

/// Builds a successful FINS response payload for `command_code` carrying
/// `data`.
fn fins_response(command_code: &str, data: &str) -> String {
    format!("00C00002{}{}0000{}", "00000000000000", command_code, data)
}

// ---------------------------------------------------------------------------
// Retry accounting
// ---------------------------------------------------------------------------

#[test]
fn send_failure_consumes_retries_without_receiving() {
    let mock = MockTransport::new().reject_sends(3);
    let mut client = Client::with_transport(mock);

    let result = client.send(CommandCode::MemoryAreaRead, "");
    assert!(matches!(
        result,
        Err(FinsError::RetriesExhausted { attempts: 3 })
    ));
    assert_eq!(client.transport().sent.len(), 3);
    assert_eq!(client.transport().receive_calls, 0);
}

#[test]
fn invalid_response_consumes_retries() {
    // Responses validate against the wrong command code every time.
    let bad = fins_response("0102", "");
    let mock = MockTransport::new()
        .accept_sends(3)
        .respond(&bad)
        .respond(&bad)
        .respond(&bad);
    let mut client = Client::with_transport(mock);

    let result = client.send(CommandCode::MemoryAreaRead, "");
    assert!(matches!(
        result,
        Err(FinsError::RetriesExhausted { attempts: 3 })
    ));
    assert_eq!(client.transport().sent.len(), 3);
    assert_eq!(client.transport().receive_calls, 3);
}

#[test]
fn absent_response_then_success_recovers() {
    let mock = MockTransport::new()
        .accept_sends(2)
        .respond_none()
        .respond(&fins_response("0101", "2007"));
    let mut client = Client::with_transport(mock);

    let text = client.send(CommandCode::MemoryAreaRead, "").unwrap();
    assert_eq!(text, "2007");
    assert_eq!(client.transport().sent.len(), 2);
    assert_eq!(client.transport().receive_calls, 2);
}

#[test]
fn retry_budget_is_configurable() {
    let mock = MockTransport::new().reject_sends(1);
    let mut client = Client::with_transport(mock).with_retries(1);

    let result = client.send(CommandCode::ClockRead, "");
    assert!(matches!(
        result,
        Err(FinsError::RetriesExhausted { attempts: 1 })
    ));
    assert_eq!(client.transport().sent.len(), 1);
}

#[test]
fn command_text_carries_header_code_and_body() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "0000"));
    let mut client = Client::with_transport(mock);

    client
        .memory_area_read(MemoryArea::HrWord, 0x47, 0, 1, ValueEncoding::Binary)
        .unwrap();
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}0101B20047000001")
    );
}

// ---------------------------------------------------------------------------
// Memory area read
// ---------------------------------------------------------------------------

#[test]
fn read_decodes_binary_words() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "DEADBEEF"));
    let mut client = Client::with_transport(mock);

    let values = client
        .memory_area_read(MemoryArea::HrWord, 0, 0, 2, ValueEncoding::Binary)
        .unwrap();
    assert_eq!(values, vec![0xDEAD, 0xBEEF]);
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}0101B20000000002")
    );
}

#[test]
fn read_decodes_bcd_words() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "23456789"));
    let mut client = Client::with_transport(mock);

    let values = client
        .memory_area_read(MemoryArea::HrWord, 0, 0, 2, ValueEncoding::Bcd)
        .unwrap();
    assert_eq!(values, vec![2345, 6789]);
}

#[test]
fn read_substitutes_zero_for_undecodable_items() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "000F2345"));
    let mut client = Client::with_transport(mock);

    // "000F" is not a decimal number; only that slot collapses to 0.
    let values = client
        .memory_area_read(MemoryArea::HrWord, 0, 0, 2, ValueEncoding::Bcd)
        .unwrap();
    assert_eq!(values, vec![0, 2345]);
}

#[test]
fn read_rejects_wrong_item_count() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "DEAD"));
    let mut client = Client::with_transport(mock);

    let result = client.memory_area_read(MemoryArea::HrWord, 0, 0, 2, ValueEncoding::Binary);
    assert!(matches!(
        result,
        Err(FinsError::LengthMismatch {
            expected: 8,
            actual: 4
        })
    ));
}

#[test]
fn read_bit_area_uses_single_byte_items() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "0100"));
    let mut client = Client::with_transport(mock);

    let values = client
        .memory_area_read(MemoryArea::CioBit, 0x31, 5, 2, ValueEncoding::Binary)
        .unwrap();
    assert_eq!(values, vec![1, 0]);
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}0101300031050002")
    );
}

#[test]
fn read_zero_items_returns_empty() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", ""));
    let mut client = Client::with_transport(mock);

    let values = client
        .memory_area_read(MemoryArea::DmWord, 100, 0, 0, ValueEncoding::Binary)
        .unwrap();
    assert!(values.is_empty());
}

#[test]
fn read_single_returns_sole_item() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0101", "2007"));
    let mut client = Client::with_transport(mock);

    let value = client
        .memory_area_read_single(MemoryArea::DmWord, 0x03E8, 0, ValueEncoding::Binary)
        .unwrap();
    assert_eq!(value, 0x2007);
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}01018203E8000001")
    );
}

// ---------------------------------------------------------------------------
// Memory area write
// ---------------------------------------------------------------------------

#[test]
fn write_encodes_values_and_succeeds_on_empty_response() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0102", ""));
    let mut client = Client::with_transport(mock);

    client
        .memory_area_write(MemoryArea::HrWord, 0, 0, &[0xDEAD, 0xBEEF, 0xFACE])
        .unwrap();
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}0102B20000000003DEADBEEFFACE")
    );
}

#[test]
fn write_single_encodes_one_item() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0102", ""));
    let mut client = Client::with_transport(mock);

    client
        .memory_area_write_single(MemoryArea::CioBit, 0x31, 5, 1)
        .unwrap();
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}010230003105000101")
    );
}

#[test]
fn write_rejects_unexpected_response_data() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0102", "00"));
    let mut client = Client::with_transport(mock);

    let result = client.memory_area_write(MemoryArea::HrWord, 0, 0, &[1]);
    assert!(matches!(result, Err(FinsError::InvalidResponse { .. })));
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[test]
fn clock_read_parses_instant_and_ignores_day_of_week() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0701", "12040112345600"));
    let mut client = Client::with_transport(mock);

    let clock = client.clock_read().unwrap();
    let expected = NaiveDate::from_ymd_opt(2012, 4, 1)
        .unwrap()
        .and_hms_opt(12, 34, 56)
        .unwrap();
    assert_eq!(clock, expected);
}

#[test]
fn clock_read_rejects_invalid_calendar_values() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0701", "12320112345600"));
    let mut client = Client::with_transport(mock);

    let result = client.clock_read();
    assert!(matches!(result, Err(FinsError::InvalidClock { .. })));
}

#[test]
fn clock_read_rejects_short_response() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0701", "1204"));
    let mut client = Client::with_transport(mock);

    let result = client.clock_read();
    assert!(matches!(result, Err(FinsError::InvalidClock { .. })));
}

#[test]
fn clock_write_formats_instant() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0702", ""));
    let mut client = Client::with_transport(mock);

    let clock = NaiveDate::from_ymd_opt(2012, 4, 1)
        .unwrap()
        .and_hms_opt(12, 34, 56)
        .unwrap();
    client.clock_write(clock).unwrap();
    assert_eq!(
        client.transport().sent[0],
        format!("{HEADER}0702120401123456")
    );
}

#[test]
fn clock_write_rejects_unexpected_response_data() {
    let mock = MockTransport::new()
        .accept_sends(1)
        .respond(&fins_response("0702", "00"));
    let mut client = Client::with_transport(mock);

    let clock = NaiveDate::from_ymd_opt(2012, 4, 1)
        .unwrap()
        .and_hms_opt(12, 34, 56)
        .unwrap();
    let result = client.clock_write(clock);
    assert!(matches!(result, Err(FinsError::InvalidResponse { .. })));
}
