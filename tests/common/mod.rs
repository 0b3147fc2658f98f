//! Host-side stand-ins for the register bus, the error sink and an input pin
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::digital::v2::InputPin;
use tm4c123_port::gpio::reg::{PortReg, Reg, RegisterBus, RegisterRead};
use tm4c123_port::gpio::{PinId, PortId};
use tm4c123_port::port::{ErrorReport, ErrorSink, PortError};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Access {
    Read(Reg),
    Write(Reg, u32),
}

#[derive(Default)]
struct Registers {
    values: HashMap<Reg, u32>,
    trace: Vec<Access>,
}

/// Register file that records every access
///
/// Clones share the same registers, so a test can keep one handle while the
/// port owns another.
#[derive(Default, Clone)]
pub struct FakeBus {
    inner: Rc<RefCell<Registers>>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reg: Reg) -> u32 {
        self.inner.borrow().values.get(&reg).copied().unwrap_or(0)
    }

    pub fn port(&self, port: PortId, reg: PortReg) -> u32 {
        self.get(Reg::Port(port, reg))
    }

    /// Bit of `id` in `reg`
    pub fn bit(&self, id: PinId, reg: PortReg) -> bool {
        self.port(id.port(), reg) & id.mask() != 0
    }

    /// Set a register without recording it
    pub fn preset(&self, reg: Reg, value: u32) {
        self.inner.borrow_mut().values.insert(reg, value);
    }

    pub fn trace(&self) -> Vec<Access> {
        self.inner.borrow().trace.clone()
    }

    pub fn writes(&self) -> Vec<(Reg, u32)> {
        self.inner
            .borrow()
            .trace
            .iter()
            .filter_map(|access| match access {
                Access::Write(reg, value) => Some((*reg, *value)),
                Access::Read(_) => None,
            })
            .collect()
    }

    pub fn clear_trace(&self) {
        self.inner.borrow_mut().trace.clear();
    }

    /// Snapshot of every register touched so far
    pub fn snapshot(&self) -> HashMap<Reg, u32> {
        self.inner.borrow().values.clone()
    }
}

impl RegisterRead for FakeBus {
    fn read(&self, reg: Reg) -> u32 {
        let mut inner = self.inner.borrow_mut();
        inner.trace.push(Access::Read(reg));
        inner.values.get(&reg).copied().unwrap_or(0)
    }
}

impl RegisterBus for FakeBus {
    fn write(&mut self, reg: Reg, value: u32) {
        let mut inner = self.inner.borrow_mut();
        inner.trace.push(Access::Write(reg, value));
        inner.values.insert(reg, value);
    }
}

/// Sink that keeps every report
#[derive(Default, Clone)]
pub struct CollectingSink {
    reports: Rc<RefCell<Vec<ErrorReport>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.borrow().clone()
    }

    pub fn errors(&self) -> Vec<PortError> {
        self.reports.borrow().iter().map(|r| r.error).collect()
    }

    pub fn clear(&self) {
        self.reports.borrow_mut().clear();
    }
}

impl ErrorSink for CollectingSink {
    fn report(&mut self, report: ErrorReport) {
        self.reports.borrow_mut().push(report);
    }
}

/// Input pin replaying a script of samples
///
/// `Some(true)` reads high, `Some(false)` reads low and `None` fails the read.
/// Reads past the end of the script fail as well.
pub struct ScriptedPin {
    samples: Vec<Option<bool>>,
    next: Cell<usize>,
}

impl ScriptedPin {
    pub fn new(samples: &[Option<bool>]) -> Self {
        ScriptedPin {
            samples: samples.to_vec(),
            next: Cell::new(0),
        }
    }

    pub fn levels(levels: &[bool]) -> Self {
        let samples: Vec<_> = levels.iter().copied().map(Some).collect();
        Self::new(&samples)
    }
}

impl InputPin for ScriptedPin {
    type Error = ();

    fn is_high(&self) -> Result<bool, Self::Error> {
        let idx = self.next.get();
        self.next.set(idx + 1);
        self.samples.get(idx).copied().flatten().ok_or(())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }
}
