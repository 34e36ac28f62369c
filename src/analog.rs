use core::cell::RefCell;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::adc::{Channel, OneShot};

/// The hardware seam that gas sensor channels read through.
///
/// `TChannel` identifies one analog input line. It may be a plain channel number (as for the
/// [`Mcp300x`](crate::mcp300x::Mcp300x)) or a HAL pin type (as for [`OneShotAdc`]).
pub trait AnalogInput<TChannel> {
    /// Returned when the hardware refuses to bind a channel.
    type Error;

    /// Prepares `channel` for analog reads. Called exactly once, while constructing a sensor
    /// channel.
    fn configure_input(&mut self, channel: &mut TChannel) -> Result<(), Self::Error>;

    /// Takes one blocking sample from `channel`.
    ///
    /// Samples are at most 16 bits wide. Converters with wider results (e.g. 18- or 24-bit parts)
    /// must shift their result down to 16 bits, and the sensor's `resolution_steps` option must
    /// then describe the shifted range.
    ///
    /// This cannot fail. Implementations that talk to fallible hardware report an in-range value
    /// (typically 0) when a conversion goes wrong.
    fn sample_analog(&mut self, channel: &mut TChannel) -> u16;
}

impl<'a, TChannel, T> AnalogInput<TChannel> for &'a mut T
where
    T: AnalogInput<TChannel> + ?Sized,
{
    type Error = T::Error;

    fn configure_input(&mut self, channel: &mut TChannel) -> Result<(), Self::Error> {
        (**self).configure_input(channel)
    }

    fn sample_analog(&mut self, channel: &mut TChannel) -> u16 {
        (**self).sample_analog(channel)
    }
}

/// Lets several sensor channels share one ADC from a single thread.
///
/// Panics if the ADC is already borrowed, which can only happen if a read is started from inside
/// another read.
impl<'a, TChannel, T> AnalogInput<TChannel> for &'a RefCell<T>
where
    T: AnalogInput<TChannel>,
{
    type Error = T::Error;

    fn configure_input(&mut self, channel: &mut TChannel) -> Result<(), Self::Error> {
        self.borrow_mut().configure_input(channel)
    }

    fn sample_analog(&mut self, channel: &mut TChannel) -> u16 {
        self.borrow_mut().sample_analog(channel)
    }
}

/// Adapts any `embedded-hal` one-shot ADC into an [`AnalogInput`].
///
/// The channel type is the HAL's analog pin. HALs configure pin modes through their type-state
/// (e.g. `into_floating_input`), so by the time a pin reaches this adapter it is already set up
/// and [`AnalogInput::configure_input`] always succeeds.
///
/// `TMarker` is the ADC marker type of the HAL's `OneShot<TMarker, u16, Pin>` impl. For most HALs
/// this is the ADC type itself, which is the default.
pub struct OneShotAdc<TAdc, TMarker = TAdc> {
    adc: TAdc,
    _marker: PhantomData<TMarker>,
}

impl<TAdc, TMarker> OneShotAdc<TAdc, TMarker> {
    pub fn new(adc: TAdc) -> OneShotAdc<TAdc, TMarker> {
        OneShotAdc {
            adc: adc,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped ADC.
    pub fn release(self) -> TAdc {
        self.adc
    }
}

impl<TAdc, TMarker, TPin> AnalogInput<TPin> for OneShotAdc<TAdc, TMarker>
where
    TAdc: OneShot<TMarker, u16, TPin>,
    TPin: Channel<TMarker>,
{
    type Error = Infallible;

    fn configure_input(&mut self, _channel: &mut TPin) -> Result<(), Self::Error> {
        Ok(())
    }

    fn sample_analog(&mut self, channel: &mut TPin) -> u16 {
        match nb::block!(self.adc.read(channel)) {
            Ok(sample) => sample,
            Err(_) => {
                log::warn!("one-shot ADC conversion failed, reporting 0");
                0
            }
        }
    }
}
