#![no_std]

/// The analog-input seam that sensor channels read through, plus an adapter for any
/// `embedded-hal` one-shot ADC.
pub mod analog;
/// A configurable reader that converts analog samples into approximate gas concentrations.
pub mod gas_sensor;
/// Utilities for reading MCP300x series analog-to-digital converters, usable as an analog input.
///
/// Refer to [this datasheet](https://cdn-shop.adafruit.com/datasheets/MCP3008.pdf) for more
/// information about these devices.
pub mod mcp300x;
/// Default options for MQ-2, MQ-4, MQ-7, and MQ-8 gas sensors.
pub mod mqxx;

pub use analog::AnalogInput;
pub use gas_sensor::{GasSensorChannel, Options, Reading};
pub use mqxx::SensorKind;
