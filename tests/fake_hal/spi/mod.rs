use embedded_hal::blocking::spi::transfer;
use embedded_hal::spi::FullDuplex;

#[derive(Debug, PartialEq)]
pub struct SpiError();

#[derive(Debug)]
pub enum FakeRead {
    Success(u8),
    Error(),
    AsyncSuccess(u8),
}

#[derive(Debug)]
pub enum FakeWrite {
    Success(),
    Error(),
    AsyncSuccess(),
}

#[derive(Debug)]
enum LastOp {
    None,
    FakeRead,
    FakeWrite,
}

/// A full-duplex SPI bus that replays scripted reads and writes. Blocking transfers come from
/// `embedded-hal`'s default implementation on top of `FullDuplex`.
#[derive(Debug)]
pub struct SPI {
    reads: Vec<FakeRead>,
    writes: Vec<FakeWrite>,
    current_read: Option<FakeRead>,
    current_write: Option<FakeWrite>,
    last_complete_op: LastOp,
    written_data: Vec<u8>,
}

impl SPI {
    pub fn new(reads: Vec<FakeRead>, writes: Vec<FakeWrite>) -> SPI {
        if reads.len() > writes.len() {
            panic!("There must be at least as many writes as reads.");
        }
        SPI {
            written_data: Vec::with_capacity(writes.len()),
            reads: reads,
            writes: writes,
            current_read: None,
            current_write: None,
            last_complete_op: LastOp::None,
        }
    }

    /// A bus that answers each of `responses` with three successful reads and writes.
    pub fn with_responses(responses: &[[u8; 3]]) -> SPI {
        let mut reads = Vec::new();
        let mut writes = Vec::new();
        for response in responses {
            for byte in response.iter() {
                reads.push(FakeRead::Success(*byte));
                writes.push(FakeWrite::Success());
            }
        }
        SPI::new(reads, writes)
    }

    pub fn get_written_data(&self) -> &[u8] {
        self.written_data.as_slice()
    }
}

impl FullDuplex<u8> for SPI {
    type Error = SpiError;

    fn read(&mut self) -> nb::Result<u8, SpiError> {
        match self.last_complete_op {
            LastOp::FakeWrite => {}
            _ => return Err(nb::Error::Other(SpiError())),
        }
        if self.current_read.is_none() {
            self.current_read = Some(self.reads.remove(0));
            if let Some(FakeRead::AsyncSuccess(_)) = self.current_read {
                return Err(nb::Error::WouldBlock);
            }
        }
        let read = self.current_read.take().unwrap();
        self.last_complete_op = LastOp::FakeRead;
        match read {
            FakeRead::Success(data) => Ok(data),
            FakeRead::AsyncSuccess(data) => Ok(data),
            FakeRead::Error() => Err(nb::Error::Other(SpiError())),
        }
    }

    fn send(&mut self, word: u8) -> nb::Result<(), SpiError> {
        if self.current_write.is_none() {
            self.current_write = Some(self.writes.remove(0));
            if let Some(FakeWrite::AsyncSuccess()) = self.current_write {
                return Err(nb::Error::WouldBlock);
            }
        }
        let write = self.current_write.take().unwrap();
        self.last_complete_op = LastOp::FakeWrite;
        match write {
            FakeWrite::Success() | FakeWrite::AsyncSuccess() => {
                self.written_data.push(word);
                Ok(())
            }
            FakeWrite::Error() => Err(nb::Error::Other(SpiError())),
        }
    }
}

impl transfer::Default<u8> for SPI {}
