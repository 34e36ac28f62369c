use crate::gas_sensor::{Options, DEFAULT_OPTIONS};

/// Default options for an MQ-2.
pub const DEFAULT_MQ2_OPTIONS: Options = DEFAULT_OPTIONS;
/// Default options for an MQ-4.
pub const DEFAULT_MQ4_OPTIONS: Options = DEFAULT_OPTIONS;
/// Default options for an MQ-7.
pub const DEFAULT_MQ7_OPTIONS: Options = DEFAULT_OPTIONS;
/// Default options for an MQ-8.
pub const DEFAULT_MQ8_OPTIONS: Options = DEFAULT_OPTIONS;

/// The supported MQ-series sensor types.
///
/// All four share the same placeholder conversion today. Each has its own defaults constant so
/// that a fitted conversion factor can be dropped in for one type without touching the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Mq2,
    Mq4,
    Mq7,
    Mq8,
}

impl SensorKind {
    pub const fn options(self) -> Options {
        match self {
            SensorKind::Mq2 => DEFAULT_MQ2_OPTIONS,
            SensorKind::Mq4 => DEFAULT_MQ4_OPTIONS,
            SensorKind::Mq7 => DEFAULT_MQ7_OPTIONS,
            SensorKind::Mq8 => DEFAULT_MQ8_OPTIONS,
        }
    }

    /// The gas this sensor type is sold for detecting.
    pub const fn target_gas(self) -> &'static str {
        match self {
            SensorKind::Mq2 => "combustible gas and smoke",
            SensorKind::Mq4 => "methane",
            SensorKind::Mq7 => "carbon monoxide",
            SensorKind::Mq8 => "hydrogen",
        }
    }
}
