//! Core data types shared by the sender and the listener.
//!
//! - [`types::Presence`]: Threshold classification of a raw ADC reading
//! - [`types::Report`]: Parsed `adc,<value>,<label>` datagram

pub mod types;
