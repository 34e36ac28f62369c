use crate::analog::AnalogInput;
use crate::mqxx::SensorKind;
use core::time::Duration;

/// The reference voltage of a 3.3V board's ADC.
pub const DEFAULT_REFERENCE_VOLTAGE: f32 = 3.3;
/// The divisor for a 10-bit ADC, whose largest sample is 1023.
pub const DEFAULT_RESOLUTION_STEPS: u16 = 1023;
/// Volts-to-concentration multiplier.
///
/// This is a placeholder rather than a real calibration: it is linear, and it is the same for
/// every gas. Replace it with a value fitted against a reference instrument for meaningful
/// results.
pub const DEFAULT_CONVERSION_FACTOR: f32 = 100.0;

#[derive(Debug, PartialEq)]
pub enum Error<TIoError> {
    /// Wrapped error from the analog input.
    Wrapped(TIoError),
    /// Invalid argument was provided.
    InvalidArgument,
}

impl<TIoError> From<TIoError> for Error<TIoError> {
    fn from(error: TIoError) -> Error<TIoError> {
        Error::Wrapped(error)
    }
}

/// Options that map raw samples onto a concentration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    /// The voltage that corresponds to a raw sample of `resolution_steps`. Must be finite and
    /// positive.
    pub reference_voltage: f32,
    /// The raw sample that corresponds to `reference_voltage`. Must not be zero.
    ///
    /// Note that this is the maximum sample (e.g. 1023 for a 10-bit ADC), not the number of
    /// distinct values. At most `u16::MAX`, matching the width of [`AnalogInput`] samples.
    pub resolution_steps: u16,
    /// Multiplier from volts to concentration. Must be finite.
    pub conversion_factor: f32,
}

impl Options {
    fn is_valid(&self) -> bool {
        self.resolution_steps > 0
            && self.reference_voltage.is_finite()
            && self.reference_voltage > 0.0
            && self.conversion_factor.is_finite()
    }
}

pub const DEFAULT_OPTIONS: Options = Options {
    reference_voltage: DEFAULT_REFERENCE_VOLTAGE,
    resolution_steps: DEFAULT_RESOLUTION_STEPS,
    conversion_factor: DEFAULT_CONVERSION_FACTOR,
};

/// A computed reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// The voltage on the input, in volts.
    pub voltage: f32,
    /// The approximate gas concentration. Units depend on the sensor and conversion factor.
    pub concentration: f32,
}

/// Reads an approximate gas concentration from one analog input.
///
/// Create one per attached sensor. Several channels can share one ADC by passing the ADC as
/// `&RefCell<_>` (see [`AnalogInput`]).
#[derive(Debug)]
pub struct GasSensorChannel<TInput, TChannel> {
    input: TInput,
    channel: TChannel,
    options: Options,
    last_reading: Option<Reading>,
}

impl<TInput, TChannel, TError> GasSensorChannel<TInput, TChannel>
where
    TInput: AnalogInput<TChannel, Error = TError>,
{
    /// Constructs a gas sensor channel, configuring `channel` on `input` for analog reads.
    ///
    /// If options is `None`, then [`DEFAULT_OPTIONS`] is used. Options that could never produce a
    /// finite reading (see [`Options`]) return [`Error::InvalidArgument`] without touching the
    /// hardware. If the hardware refuses the channel, its error is returned as
    /// [`Error::Wrapped`].
    ///
    /// Constructing two channels on the same physical input is not detected. Avoid it.
    pub fn new(
        mut input: TInput,
        mut channel: TChannel,
        options: Option<Options>,
    ) -> Result<GasSensorChannel<TInput, TChannel>, Error<TError>> {
        let options = match options {
            None => DEFAULT_OPTIONS,
            Some(options) if options.is_valid() => options,
            Some(_) => return Err(Error::InvalidArgument),
        };
        input.configure_input(&mut channel)?;
        log::debug!(
            "configured gas sensor channel: {} V reference, {} steps, factor {}",
            options.reference_voltage,
            options.resolution_steps,
            options.conversion_factor
        );
        Ok(GasSensorChannel {
            input: input,
            channel: channel,
            options: options,
            last_reading: None,
        })
    }

    /// Constructs a gas sensor channel using the default options of the given sensor type.
    pub fn for_kind(
        input: TInput,
        channel: TChannel,
        kind: SensorKind,
    ) -> Result<GasSensorChannel<TInput, TChannel>, Error<TError>> {
        log::debug!("creating {:?} channel ({})", kind, kind.target_gas());
        GasSensorChannel::new(input, channel, Some(kind.options()))
    }

    /// Samples the input once and returns the approximate concentration.
    ///
    /// The result is `sample * reference_voltage / resolution_steps * conversion_factor`. Samples
    /// above `resolution_steps` are treated as `resolution_steps`. This never fails: a
    /// disconnected or noisy sensor simply yields some value in range, so apply your own
    /// plausibility thresholds if you need them.
    pub fn read_concentration(&mut self) -> f32 {
        let raw = self.input.sample_analog(&mut self.channel);
        let voltage = self.to_voltage(self.clamp(raw) as f32);
        let reading = self.store(voltage);
        log::trace!(
            "raw sample {} -> {} V, concentration {}",
            raw,
            reading.voltage,
            reading.concentration
        );
        reading.concentration
    }

    /// Takes `samples` samples and returns the concentration of their mean.
    ///
    /// The provided `delay_fn` is awaited with `interval` between consecutive samples (not after
    /// the last one), so a read of `n` samples takes at least `(n - 1) * interval`. The function
    /// needs to be capable of millisecond precision or better for short intervals.
    ///
    /// The cached reading is replaced by the averaged one. Returns [`Error::InvalidArgument`] if
    /// `samples` is 0.
    pub async fn read_average_concentration<DelayFn, EmptyFuture>(
        &mut self,
        samples: u8,
        interval: Duration,
        delay_fn: DelayFn,
    ) -> Result<f32, Error<TError>>
    where
        DelayFn: Fn(Duration) -> EmptyFuture,
        EmptyFuture: core::future::Future<Output = ()>,
    {
        if samples == 0 {
            return Err(Error::InvalidArgument);
        }

        let mut total: u32 = 0;
        for i in 0..samples {
            if i > 0 {
                delay_fn(interval).await;
            }
            let raw = self.input.sample_analog(&mut self.channel);
            total += self.clamp(raw) as u32;
        }
        let mean = total as f32 / samples as f32;
        let voltage = self.to_voltage(mean);
        let reading = self.store(voltage);
        log::trace!(
            "mean of {} samples {} -> {} V, concentration {}",
            samples,
            mean,
            reading.voltage,
            reading.concentration
        );
        Ok(reading.concentration)
    }

    fn clamp(&self, raw: u16) -> u16 {
        raw.min(self.options.resolution_steps)
    }

    fn to_voltage(&self, raw: f32) -> f32 {
        raw * self.options.reference_voltage / self.options.resolution_steps as f32
    }

    fn store(&mut self, voltage: f32) -> Reading {
        let reading = Reading {
            voltage: voltage,
            concentration: voltage * self.options.conversion_factor,
        };
        self.last_reading = Some(reading);
        reading
    }
}

impl<TInput, TChannel> GasSensorChannel<TInput, TChannel> {
    /// The most recent reading, or `None` if this channel has never been read.
    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    pub fn last_voltage(&self) -> Option<f32> {
        self.last_reading.map(|reading| reading.voltage)
    }

    pub fn last_concentration(&self) -> Option<f32> {
        self.last_reading.map(|reading| reading.concentration)
    }

    pub fn channel(&self) -> &TChannel {
        &self.channel
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the analog input and channel so they can be reused.
    pub fn release(self) -> (TInput, TChannel) {
        (self.input, self.channel)
    }
}
