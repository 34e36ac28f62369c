use crate::analog::AnalogInput;
use embedded_hal::blocking::spi::Transfer;

/// The maximum SPI clock speed when V<sub>DD</sub> is 5V.
pub const MAX_CLOCK_AT_5V: u32 = 3_600_000;
/// The maximum SPI clock speed when V<sub>DD</sub> is 2.7V.
pub const MAX_CLOCK_AT_2_7V: u32 = 1_350_000;

/// The largest sample an MCP300x produces. Use this as the `resolution_steps` option.
pub const MAX_SAMPLE: u16 = 1023;

#[derive(Debug, PartialEq)]
pub enum Error<TIoError> {
    /// Wrapped error from the SPI driver.
    Wrapped(TIoError),
    /// Invalid argument was provided.
    InvalidArgument,
    /// Bad data was read. Check the connection and try again.
    BadData,
}

impl<TIoError> From<TIoError> for Error<TIoError> {
    fn from(error: TIoError) -> Error<TIoError> {
        Error::Wrapped(error)
    }
}

/// Which device of the series is attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Model {
    /// Four single-ended channels.
    Mcp3004,
    /// Eight single-ended channels.
    Mcp3008,
}

impl Model {
    pub const fn num_channels(self) -> u8 {
        match self {
            Model::Mcp3004 => 4,
            Model::Mcp3008 => 8,
        }
    }
}

/// An MCP3004 or MCP3008 analog-to-digital converter, read through single-ended channels.
///
/// Channels are identified by number. The SPI interface must be configured to work with the
/// device. This means:
///
/// * Use 8 bits per word.
/// * Depending on V<sub>DD</sub>, the maximum possible clock speed is:
///   * *2.7V*: 1.35MHz ([`MAX_CLOCK_AT_2_7V`])
///   * *5V*: 3.6MHz ([`MAX_CLOCK_AT_5V`])
/// * Data is sent most-significant-bit first
/// * SPI mode: 0 (i.e. idle low, capture on first transition)
/// * Chip select is performed automatically by the SPI driver, or manually around each read.
///
/// Refer to [this datasheet](https://cdn-shop.adafruit.com/datasheets/MCP3008.pdf) for more
/// information about these devices.
#[derive(Debug)]
pub struct Mcp300x<TSpi> {
    spi: TSpi,
    model: Model,
}

impl<TSpi, TIoError> Mcp300x<TSpi>
where
    TSpi: Transfer<u8, Error = TIoError>,
{
    pub fn new(spi: TSpi, model: Model) -> Mcp300x<TSpi> {
        Mcp300x {
            spi: spi,
            model: model,
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Returns the SPI interface.
    pub fn release(self) -> TSpi {
        self.spi
    }

    /// Reads one single-ended channel. A valid response is in the range \[0, 1023\], i.e.
    /// 1024 * (V<sub>channel</sub> - V<sub>analog ground</sub>) /
    /// (V<sub>ref</sub> - V<sub>analog ground</sub>), saturating at 1023.
    pub fn read(&mut self, channel: u8) -> Result<u16, Error<TIoError>> {
        if channel >= self.model.num_channels() {
            return Err(Error::InvalidArgument);
        }

        // Send the request aligned such that it is easy to read data using 8-bit words. See page
        // 21 of the datasheet.
        //
        // The request sequence looks like:
        //   1 - start bit
        //   1 - single-ended read
        //   X X X - channel select bits
        let mut tx_buf: [u8; 3] = [0x1, (0b1000 | channel) << 4, 0x0];
        let rx = self.spi.transfer(&mut tx_buf)?;

        if (rx[1] & 0b100) != 0 {
            // MCP300x sensors should send a null-bit right before the data. If this is missing, then
            // this read can't be trusted.
            return Err(Error::BadData);
        }

        Ok((((rx[1] & 0b11) as u16) << 8) + rx[2] as u16)
    }
}

impl<TSpi, TIoError> AnalogInput<u8> for Mcp300x<TSpi>
where
    TSpi: Transfer<u8, Error = TIoError>,
{
    type Error = Error<TIoError>;

    /// Rejects channels the attached model does not have.
    fn configure_input(&mut self, channel: &mut u8) -> Result<(), Self::Error> {
        if *channel >= self.model.num_channels() {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    fn sample_analog(&mut self, channel: &mut u8) -> u16 {
        match self.read(*channel) {
            Ok(sample) => sample,
            Err(Error::BadData) => {
                log::warn!("{:?} channel {} sent no null bit, reporting 0", self.model, channel);
                0
            }
            Err(_) => {
                log::warn!("{:?} channel {} read failed, reporting 0", self.model, channel);
                0
            }
        }
    }
}
