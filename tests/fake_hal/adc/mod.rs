use gas_sensors::AnalogInput;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, PartialEq)]
pub struct AdcError(pub u8);

/// An analog input with numbered channels.
///
/// Each channel replays its scripted samples in order, then repeats its constant value (0 unless
/// set).
#[derive(Debug, Default)]
pub struct Adc {
    sequences: HashMap<u8, VecDeque<u16>>,
    constants: HashMap<u8, u16>,
    rejected: Vec<u8>,
    configured: Vec<u8>,
    sampled: Vec<u8>,
}

impl Adc {
    pub fn new() -> Adc {
        Adc::default()
    }

    pub fn set_constant(&mut self, channel: u8, sample: u16) {
        self.constants.insert(channel, sample);
    }

    pub fn set_samples(&mut self, channel: u8, samples: Vec<u16>) {
        self.sequences.insert(channel, samples.into_iter().collect());
    }

    /// Makes `configure_input` fail for `channel`.
    pub fn reject(&mut self, channel: u8) {
        self.rejected.push(channel);
    }

    pub fn get_configured(&self) -> &[u8] {
        self.configured.as_slice()
    }

    pub fn get_sampled(&self) -> &[u8] {
        self.sampled.as_slice()
    }
}

impl AnalogInput<u8> for Adc {
    type Error = AdcError;

    fn configure_input(&mut self, channel: &mut u8) -> Result<(), AdcError> {
        if self.rejected.contains(&*channel) {
            return Err(AdcError(*channel));
        }
        self.configured.push(*channel);
        Ok(())
    }

    fn sample_analog(&mut self, channel: &mut u8) -> u16 {
        self.sampled.push(*channel);
        if let Some(sample) = self
            .sequences
            .get_mut(&*channel)
            .and_then(|samples| samples.pop_front())
        {
            return sample;
        }
        *self.constants.get(&*channel).unwrap_or(&0)
    }
}
