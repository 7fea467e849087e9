//! CSV wire format
//!
//! Each UDP datagram carries one ASCII line:
//!
//! ```text
//! adc,<value>,<label>\n
//!
//! adc,65000,presenca detectada
//! adc,100,sem presenca
//! ```
//!
//! `<value>` is the raw reading in decimal. `<label>` is one of the two
//! presence strings. The listener also accepts the two-field `adc,<value>`
//! form sent by earlier firmware.

use crate::core::types::{Presence, Reading, Report};
use crate::error::{Error, Result};

/// Record tag in the first CSV field
pub const RECORD_TAG: &str = "adc";

/// Format one report line, newline included
pub fn encode_report(value: Reading, presence: Presence) -> String {
    format!("{},{},{}\n", RECORD_TAG, value, presence.label())
}

/// Parse a received report line
pub fn decode_report(line: &str) -> Result<Report> {
    let line = line.trim_end();
    let mut fields = line.splitn(3, ',');

    match fields.next() {
        Some(RECORD_TAG) => {}
        _ => return Err(Error::InvalidReport(format!("missing adc tag: {:?}", line))),
    }

    let value = fields
        .next()
        .and_then(|v| v.trim().parse::<Reading>().ok())
        .ok_or_else(|| Error::InvalidReport(format!("bad value: {:?}", line)))?;

    let label = fields.next().map(|l| l.trim().to_string());

    Ok(Report { value, label })
}
