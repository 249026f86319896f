use std::str::FromStr;

use super::event::{Event, EventKind, ExtAdcSample, ImuSample, ResistiveSample};

const MICROSECONDS_PER_SECOND: f64 = 1_000_000.0;

/// Every event carries at least a kind, a timestamp and one payload field.
const MIN_FIELDS: usize = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed line: expected at least 3 fields, found {0}")]
    MalformedLine(usize),

    #[error("Invalid {field} field: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{kind} event expects {expected} payload fields, found {found}")]
    ArityMismatch {
        kind: EventKind,
        expected: usize,
        found: usize,
    },

    #[error("Unrecognized event kind {0}")]
    UnknownKind(i64),
}

/// Decodes one line of the comma separated wire format:
/// `<kind>,<timestamp_us>,<payload...>`.
///
/// Decoding is all or nothing, a line with any bad field produces no event.
pub fn decode(line: &str) -> Result<Event, DecodeError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields = line.split(',').collect::<Vec<&str>>();

    if fields.len() < MIN_FIELDS {
        return Err(DecodeError::MalformedLine(fields.len()));
    }

    let kind = EventKind::from(parse_field::<i64>("kind", fields[0])?);
    let timestamp_us = parse_field::<i64>("timestamp", fields[1])?;
    let timestamp = timestamp_us as f64 / MICROSECONDS_PER_SECOND;
    let payload = &fields[2..];

    match kind {
        EventKind::ExtAdc => {
            let [channel, value] = fixed_payload(kind, payload)?;
            Ok(Event::ExtAdc {
                timestamp,
                sample: ExtAdcSample {
                    channel: parse_field("channel", channel)?,
                    value: parse_field("value", value)?,
                },
            })
        }
        EventKind::Imu => {
            let [ax, ay, az, gx, gy, gz] = fixed_payload(kind, payload)?;
            Ok(Event::Imu {
                timestamp,
                sample: ImuSample {
                    ax: parse_field("accel x", ax)?,
                    ay: parse_field("accel y", ay)?,
                    az: parse_field("accel z", az)?,
                    gx: parse_field("gyro x", gx)?,
                    gy: parse_field("gyro y", gy)?,
                    gz: parse_field("gyro z", gz)?,
                },
            })
        }
        EventKind::Resistive => {
            let [active_therm, passive_therm, fsr] = fixed_payload(kind, payload)?;
            Ok(Event::Resistive {
                timestamp,
                sample: ResistiveSample {
                    active_therm: parse_field("active therm", active_therm)?,
                    passive_therm: parse_field("passive therm", passive_therm)?,
                    fsr: parse_field("fsr", fsr)?,
                },
            })
        }
        EventKind::Debug => {
            // The message is free text and may contain commas itself
            let message = line
                .splitn(MIN_FIELDS, ',')
                .nth(MIN_FIELDS - 1)
                .unwrap_or_default()
                .to_string();
            Ok(Event::Debug { timestamp, message })
        }
        EventKind::Unknown(discriminant) => Err(DecodeError::UnknownKind(discriminant)),
    }
}

fn fixed_payload<'a, const N: usize>(
    kind: EventKind,
    payload: &[&'a str],
) -> Result<[&'a str; N], DecodeError> {
    <[&str; N]>::try_from(payload).map_err(|_| DecodeError::ArityMismatch {
        kind,
        expected: N,
        found: payload.len(),
    })
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, DecodeError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| DecodeError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
