//! Accelerator-style label propagation and its host handshake
//!
//! Accelerator strategies keep the label buffer on a device and iterate a
//! propagation kernel to a fixed point. The host drives them through a
//! blocking handshake on a single `changed` flag:
//!
//! 1. upload the `{0, 1}` grid and set the flag
//! 2. dispatch the start-label kernel (each foreground cell gets `index + 2`)
//! 3. wait for the device, read the flag back; stop if it is clear
//! 4. clear the flag, dispatch one propagation round, go to 3
//!
//! The flag is only read after every write of the round is complete. There
//! is no timeout or retry: any device error ends the run.
//!
//! [`HostDevice`] executes the kernels on the CPU with the same visibility
//! rules: commands are queued by the dispatch calls and run when the host
//! synchronizes, and every round reads from a snapshot of the previous one.

use crate::error::{LabelError, LabelResult};
use crate::strategy::Strategy;
use ccl_core::{BACKGROUND, FIRST_LABEL, Label, LabelGrid};
use log::debug;

/// Device operations needed by [`run_to_convergence`]
pub trait PropagationDevice {
    /// Copy the input grid into device memory
    fn upload(&mut self, grid: &LabelGrid) -> LabelResult<()>;

    /// Queue the start-label kernel
    fn dispatch_start_labels(&mut self) -> LabelResult<()>;

    /// Queue a write of the `changed` flag
    fn write_changed(&mut self, changed: bool) -> LabelResult<()>;

    /// Queue one propagation round
    fn dispatch_propagate(&mut self) -> LabelResult<()>;

    /// Block until all queued work has completed
    fn finish(&mut self) -> LabelResult<()>;

    /// Blocking readback of the `changed` flag
    fn read_changed(&mut self) -> LabelResult<bool>;

    /// Copy the label buffer back and release it
    fn download(&mut self) -> LabelResult<LabelGrid>;
}

/// Drive a device to its fixed point.
///
/// # Returns
///
/// The number of propagation rounds dispatched.
pub fn run_to_convergence<D: PropagationDevice + ?Sized>(device: &mut D) -> LabelResult<usize> {
    device.write_changed(true)?;
    device.dispatch_start_labels()?;

    let mut rounds = 0;
    loop {
        device.finish()?;
        if !device.read_changed()? {
            break;
        }
        device.write_changed(false)?;
        device.dispatch_propagate()?;
        rounds += 1;
    }

    debug!("propagation converged after {} rounds", rounds);
    Ok(rounds)
}

/// Propagation kernel run each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    /// Take the minimum over the four direct neighbors
    #[default]
    Neighbour,
    /// Take the minimum along the whole foreground run in each of the four
    /// directions
    Plus,
}

/// Options for propagation strategies
#[derive(Debug, Clone, Default)]
pub struct PropagationOptions {
    /// Kernel to iterate
    pub kernel: Kernel,
}

impl PropagationOptions {
    /// Create options for the given kernel
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    /// Set the kernel
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    StartLabels,
    WriteChanged(bool),
    Propagate,
}

/// CPU emulation of a propagation device
#[derive(Debug, Default)]
pub struct HostDevice {
    kernel: Kernel,
    buffer: Option<LabelGrid>,
    changed: bool,
    queue: Vec<Command>,
}

impl HostDevice {
    /// Create a device that runs `options.kernel`
    pub fn new(options: &PropagationOptions) -> Self {
        Self {
            kernel: options.kernel,
            ..Default::default()
        }
    }

    /// Kernel this device runs
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    fn buffer_mut(&mut self) -> LabelResult<&mut LabelGrid> {
        self.buffer
            .as_mut()
            .ok_or_else(|| LabelError::Device("no buffer uploaded".to_string()))
    }

    fn enqueue(&mut self, command: Command) -> LabelResult<()> {
        if self.buffer.is_none() {
            return Err(LabelError::Device(
                "dispatch before buffer upload".to_string(),
            ));
        }
        self.queue.push(command);
        Ok(())
    }

    fn execute(&mut self, command: Command) -> LabelResult<()> {
        match command {
            Command::StartLabels => start_labels(self.buffer_mut()?),
            Command::WriteChanged(value) => self.changed = value,
            Command::Propagate => {
                let kernel = self.kernel;
                let grid = self.buffer_mut()?;
                let changed = match kernel {
                    Kernel::Neighbour => neighbour_propagate(grid),
                    Kernel::Plus => plus_propagate(grid),
                };
                self.changed |= changed;
            }
        }
        Ok(())
    }
}

impl PropagationDevice for HostDevice {
    fn upload(&mut self, grid: &LabelGrid) -> LabelResult<()> {
        self.buffer = Some(grid.clone());
        self.queue.clear();
        self.changed = false;
        Ok(())
    }

    fn dispatch_start_labels(&mut self) -> LabelResult<()> {
        self.enqueue(Command::StartLabels)
    }

    fn write_changed(&mut self, changed: bool) -> LabelResult<()> {
        self.enqueue(Command::WriteChanged(changed))
    }

    fn dispatch_propagate(&mut self) -> LabelResult<()> {
        self.enqueue(Command::Propagate)
    }

    fn finish(&mut self) -> LabelResult<()> {
        let pending = std::mem::take(&mut self.queue);
        for command in pending {
            self.execute(command)?;
        }
        Ok(())
    }

    fn read_changed(&mut self) -> LabelResult<bool> {
        self.finish()?;
        Ok(self.changed)
    }

    fn download(&mut self) -> LabelResult<LabelGrid> {
        self.finish()?;
        self.buffer
            .take()
            .ok_or_else(|| LabelError::Device("no buffer to download".to_string()))
    }
}

fn start_labels(grid: &mut LabelGrid) {
    for (i, cell) in grid.data_mut().iter_mut().enumerate() {
        if *cell != BACKGROUND {
            *cell = i as Label + FIRST_LABEL;
        }
    }
}

fn neighbour_propagate(grid: &mut LabelGrid) -> bool {
    let snapshot = grid.data().to_vec();
    let mut changed = false;

    for i in 0..snapshot.len() {
        let own = snapshot[i];
        if own == BACKGROUND {
            continue;
        }
        let m = grid
            .neighbors4(i)
            .map(|n| snapshot[n])
            .filter(|&v| v != BACKGROUND)
            .fold(own, Label::min);
        if m < own {
            grid.data_mut()[i] = m;
            changed = true;
        }
    }

    changed
}

fn plus_propagate(grid: &mut LabelGrid) -> bool {
    let (width, height) = grid.dimensions();
    let snapshot = grid.data().to_vec();
    let mut changed = false;

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let own = snapshot[i];
            if own == BACKGROUND {
                continue;
            }

            let mut m = own;
            let mut walk = |cells: &mut dyn Iterator<Item = usize>| {
                for n in cells {
                    let v = snapshot[n];
                    if v == BACKGROUND {
                        break;
                    }
                    m = m.min(v);
                }
            };
            walk(&mut (x + 1..width).map(|cx| y * width + cx));
            walk(&mut (0..x).rev().map(|cx| y * width + cx));
            walk(&mut (y + 1..height).map(|cy| cy * width + x));
            walk(&mut (0..y).rev().map(|cy| cy * width + x));

            if m < own {
                grid.data_mut()[i] = m;
                changed = true;
            }
        }
    }

    changed
}

/// [`Strategy`] adapter over a [`PropagationDevice`]
///
/// `accept_input` uploads, `run` performs the handshake loop and
/// `retrieve_output` downloads, so the timed phase excludes transfers.
pub struct PropagationStrategy<D: PropagationDevice = HostDevice> {
    name: &'static str,
    device: D,
    ready: bool,
    rounds: usize,
}

impl PropagationStrategy<HostDevice> {
    /// Host-emulated strategy for the given options
    pub fn host(options: &PropagationOptions) -> Self {
        let name = match options.kernel {
            Kernel::Neighbour => "Host neighbour propagation",
            Kernel::Plus => "Host plus propagation",
        };
        Self::with_device(name, HostDevice::new(options))
    }
}

impl<D: PropagationDevice> PropagationStrategy<D> {
    /// Wrap an arbitrary device
    pub fn with_device(name: &'static str, device: D) -> Self {
        Self {
            name,
            device,
            ready: false,
            rounds: 0,
        }
    }

    /// Propagation rounds of the last run
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl<D: PropagationDevice> Strategy for PropagationStrategy<D> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn accept_input(&mut self, input: &LabelGrid) -> LabelResult<()> {
        self.device.upload(input)?;
        self.ready = true;
        Ok(())
    }

    fn run(&mut self) -> LabelResult<()> {
        if !self.ready {
            return Err(LabelError::NoInput);
        }
        self.rounds = run_to_convergence(&mut self.device)?;
        Ok(())
    }

    fn retrieve_output(&mut self) -> LabelResult<LabelGrid> {
        if !self.ready {
            return Err(LabelError::NoInput);
        }
        self.ready = false;
        self.device.download()
    }
}
