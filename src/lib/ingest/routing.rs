use std::{borrow::Cow, collections::HashSet};

use tracing::*;

use crate::{
    error::Error,
    metrics::MetricRegistry,
    protocol::{Event, ExtAdcSample, ImuSample, ResistiveSample},
};

pub const ACCEL_X: &str = "ACCEL X";
pub const ACCEL_Y: &str = "ACCEL Y";
pub const ACCEL_Z: &str = "ACCEL Z";
pub const GYRO_X: &str = "GYRO X";
pub const GYRO_Y: &str = "GYRO Y";
pub const GYRO_Z: &str = "GYRO Z";
pub const ACTIVE_THERM: &str = "ACTIVE THERM";
pub const PASSIVE_THERM: &str = "PASSIVE THERM";
pub const FSR: &str = "FSR";

/// Log target of the messages the firmware sends as debug events.
pub const DEVICE_LOG_TARGET: &str = "device";

/// Distinct unprovisioned metrics that get their own warning, a corrupted
/// stream can otherwise produce an unbounded number of channel names.
const MAX_REPORTED_UNKNOWN: usize = 32;

pub fn ext_adc_metric_name(channel: i32) -> String {
    format!("EXT ADC {channel}")
}

/// Metric name and value pairs carried by an event, in payload order.
pub fn metric_values(event: &Event) -> Vec<(Cow<'static, str>, f64)> {
    match event {
        Event::ExtAdc {
            sample: ExtAdcSample { channel, value },
            ..
        } => vec![(ext_adc_metric_name(*channel).into(), *value as f64)],
        Event::Imu {
            sample:
                ImuSample {
                    ax,
                    ay,
                    az,
                    gx,
                    gy,
                    gz,
                },
            ..
        } => vec![
            (ACCEL_X.into(), *ax),
            (ACCEL_Y.into(), *ay),
            (ACCEL_Z.into(), *az),
            (GYRO_X.into(), *gx),
            (GYRO_Y.into(), *gy),
            (GYRO_Z.into(), *gz),
        ],
        Event::Resistive {
            sample:
                ResistiveSample {
                    active_therm,
                    passive_therm,
                    fsr,
                },
            ..
        } => vec![
            (ACTIVE_THERM.into(), *active_therm),
            (PASSIVE_THERM.into(), *passive_therm),
            (FSR.into(), *fsr),
        ],
        Event::Debug { .. } => vec![],
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RouteOutcome {
    pub written: usize,
    pub unknown: usize,
}

/// Writes decoded events into the registry.
///
/// Writes to metrics that were never provisioned are skipped, each such metric
/// is reported only the first time it shows up, up to a fixed number
/// of distinct metrics.
#[derive(Debug, Default)]
pub struct Router {
    reported_unknown: HashSet<String>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&mut self, event: &Event, registry: &mut MetricRegistry) -> RouteOutcome {
        if let Event::Debug { timestamp, message } = event {
            info!(target: DEVICE_LOG_TARGET, "Device [{timestamp:.6}]: {message}");
        }

        let timestamp = event.timestamp();
        let mut outcome = RouteOutcome::default();

        for (name, value) in metric_values(event) {
            match registry.write(&name, timestamp, value) {
                Ok(()) => outcome.written += 1,
                Err(Error::UnknownMetric(name)) => {
                    outcome.unknown += 1;
                    self.report_unknown(name);
                }
                Err(error) => {
                    error!("Failed to write {name:?}: {error}");
                }
            }
        }

        outcome
    }

    fn report_unknown(&mut self, name: String) {
        if self.reported_unknown.len() >= MAX_REPORTED_UNKNOWN
            || self.reported_unknown.contains(&name)
        {
            return;
        }

        warn!("Dropping samples for metric {name:?}, it is not provisioned");
        self.reported_unknown.insert(name);

        if self.reported_unknown.len() == MAX_REPORTED_UNKNOWN {
            warn!("Too many unprovisioned metrics, further ones are dropped without report");
        }
    }
}
