/// Wire discriminant carried in the first field of every event line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    ExtAdc,
    Imu,
    Resistive,
    Debug,
    Unknown(i64),
}

impl From<i64> for EventKind {
    fn from(discriminant: i64) -> Self {
        match discriminant {
            0 => Self::ExtAdc,
            1 => Self::Imu,
            2 => Self::Resistive,
            3 => Self::Debug,
            other => Self::Unknown(other),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExtAdc => write!(f, "ExtAdc"),
            Self::Imu => write!(f, "Imu"),
            Self::Resistive => write!(f, "Resistive"),
            Self::Debug => write!(f, "Debug"),
            Self::Unknown(discriminant) => write!(f, "Unknown({discriminant})"),
        }
    }
}

/// A single channel reading from the external ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtAdcSample {
    pub channel: i32,
    pub value: i32,
}

/// Accelerometer and gyroscope readings of the IMU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSample {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

/// Voltages of the thermistors and the force sensing resistor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistiveSample {
    pub active_therm: f64,
    pub passive_therm: f64,
    pub fsr: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ExtAdc {
        timestamp: f64,
        sample: ExtAdcSample,
    },
    Imu {
        timestamp: f64,
        sample: ImuSample,
    },
    Resistive {
        timestamp: f64,
        sample: ResistiveSample,
    },
    Debug {
        timestamp: f64,
        message: String,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ExtAdc { .. } => EventKind::ExtAdc,
            Self::Imu { .. } => EventKind::Imu,
            Self::Resistive { .. } => EventKind::Resistive,
            Self::Debug { .. } => EventKind::Debug,
        }
    }

    /// Seconds since the device booted.
    pub fn timestamp(&self) -> f64 {
        match self {
            Self::ExtAdc { timestamp, .. }
            | Self::Imu { timestamp, .. }
            | Self::Resistive { timestamp, .. }
            | Self::Debug { timestamp, .. } => *timestamp,
        }
    }
}
