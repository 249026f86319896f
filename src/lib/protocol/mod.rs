//! Text protocol spoken by the sensor board.
//!
//! Every line is `<kind>,<timestamp_us>,<payload...>`, where the payload layout
//! depends on the kind:
//!
//! | kind | event     | payload                                  |
//! |------|-----------|------------------------------------------|
//! | 0    | ExtAdc    | `channel,value`                          |
//! | 1    | Imu       | `ax,ay,az,gx,gy,gz`                      |
//! | 2    | Resistive | `active_therm,passive_therm,fsr` (volts) |
//! | 3    | Debug     | free text up to the end of the line      |

pub mod decoder;
pub mod event;

pub use decoder::{decode, DecodeError};
pub use event::{Event, EventKind, ExtAdcSample, ImuSample, ResistiveSample};
