//! Mock construction helpers

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};
use std::time::Duration;

/// One step of a simulated device
pub enum Step {
    /// Bytes the device sends
    Data(Vec<u8>),
    /// Nothing arrives; the read times out after the given delay
    Stall(Duration),
}

/// `Read` impl that replays a script of device output
///
/// Once the script is exhausted the device reports end of stream, unless
/// [`quiet_after`](Self::quiet_after) was used: then every read stalls for
/// the idle delay, like a device that has gone quiet but is still attached.
#[derive(Default)]
pub struct SimulatedDevice {
    steps: VecDeque<Step>,
    idle: Option<Duration>,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time out forever (after `idle` each) once the script is exhausted
    pub fn quiet_after(mut self, idle: Duration) -> Self {
        self.idle = Some(idle);
        self
    }

    /// Queue one line (a `\n` is appended)
    pub fn line(mut self, text: &str) -> Self {
        self.steps
            .push_back(Step::Data(format!("{text}\n").into_bytes()));
        self
    }

    /// Queue raw bytes
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.push_back(Step::Data(bytes.to_vec()));
        self
    }

    /// Queue a timed-out read
    pub fn stall(mut self, delay: Duration) -> Self {
        self.steps.push_back(Step::Stall(delay));
        self
    }
}

impl Read for SimulatedDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.steps.pop_front() {
            Some(Step::Data(chunk)) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    self.steps.push_front(Step::Data(chunk[n..].to_vec()));
                }
                Ok(n)
            }
            Some(Step::Stall(delay)) => {
                std::thread::sleep(delay);
                Err(io::Error::new(ErrorKind::TimedOut, "simulated timeout"))
            }
            None => match self.idle {
                Some(idle) => {
                    std::thread::sleep(idle);
                    Err(io::Error::new(ErrorKind::TimedOut, "simulated timeout"))
                }
                None => Ok(0),
            },
        }
    }
}
