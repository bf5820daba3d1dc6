//! Label propagation regression test
//!
//! Drives the host-emulated device through the handshake loop, and a
//! counting device through the same loop to check the order of calls.
//!
//! Run with:
//! ```
//! cargo test -p ccl-label --test propagation_reg
//! ```

use ccl_label::ccl_core::{BACKGROUND, LabelGrid};
use ccl_label::{
    HostDevice, Kernel, LabelError, LabelResult, PropagationDevice, PropagationOptions,
    PropagationStrategy, Strategy, StrategyKind, label, partition_equivalent, run_to_convergence,
    valid_result,
};
use ccl_test::{RegParams, all_foreground, comb, random_grid, serpentine, setup_logging};

/// Device that records every call and converges after a fixed number of
/// rounds
struct ScriptedDevice {
    calls: Vec<&'static str>,
    rounds_left: usize,
    changed: bool,
    fail_on_finish: bool,
}

impl ScriptedDevice {
    fn new(rounds: usize) -> Self {
        Self {
            calls: Vec::new(),
            rounds_left: rounds,
            changed: false,
            fail_on_finish: false,
        }
    }
}

impl PropagationDevice for ScriptedDevice {
    fn upload(&mut self, _grid: &LabelGrid) -> LabelResult<()> {
        self.calls.push("upload");
        Ok(())
    }

    fn dispatch_start_labels(&mut self) -> LabelResult<()> {
        self.calls.push("start");
        Ok(())
    }

    fn write_changed(&mut self, changed: bool) -> LabelResult<()> {
        self.calls.push(if changed { "set" } else { "clear" });
        self.changed = changed;
        Ok(())
    }

    fn dispatch_propagate(&mut self) -> LabelResult<()> {
        self.calls.push("propagate");
        if self.rounds_left > 0 {
            self.rounds_left -= 1;
            self.changed = true;
        }
        Ok(())
    }

    fn finish(&mut self) -> LabelResult<()> {
        self.calls.push("finish");
        if self.fail_on_finish {
            return Err(LabelError::Device("lost device".to_string()));
        }
        Ok(())
    }

    fn read_changed(&mut self) -> LabelResult<bool> {
        self.calls.push("read");
        Ok(self.changed)
    }

    fn download(&mut self) -> LabelResult<LabelGrid> {
        self.calls.push("download");
        Ok(LabelGrid::new(1, 1)?)
    }
}

#[test]
fn propagation_reg() {
    setup_logging("warn");
    let mut rp = RegParams::new("propagation");

    // -----------------------------------------------------------
    // Handshake order
    // -----------------------------------------------------------

    let mut device = ScriptedDevice::new(2);
    let rounds = run_to_convergence(&mut device).unwrap();
    // two changing rounds plus the one that finds nothing to do
    rp.compare_values(3.0, rounds as f64, 0.0);
    let expected = [
        "set",
        "start",
        "finish",
        "read",
        "clear",
        "propagate",
        "finish",
        "read",
        "clear",
        "propagate",
        "finish",
        "read",
        "clear",
        "propagate",
        "finish",
        "read",
    ];
    rp.check(device.calls == expected, "handshake call order");

    // Device errors end the run at once
    let mut failing = ScriptedDevice::new(5);
    failing.fail_on_finish = true;
    rp.check(
        matches!(
            run_to_convergence(&mut failing),
            Err(LabelError::Device(_))
        ),
        "device error propagated",
    );
    rp.check(!failing.calls.contains(&"read"), "no read after failure");

    // Strategy phases map onto upload, handshake and download
    let mut strategy = PropagationStrategy::with_device("Scripted", ScriptedDevice::new(0));
    let input = all_foreground(1, 1);
    strategy.accept_input(&input).unwrap();
    strategy.run().unwrap();
    strategy.retrieve_output().unwrap();
    rp.compare_values(1.0, strategy.rounds() as f64, 0.0);

    // -----------------------------------------------------------
    // Host device kernels
    // -----------------------------------------------------------

    for kernel in [Kernel::Neighbour, Kernel::Plus] {
        for (i, grid) in [
            random_grid(33, 21, 0.6, 5),
            comb(6, 9),
            serpentine(8, 4),
        ]
        .iter()
        .enumerate()
        {
            let mut strategy = PropagationStrategy::host(&PropagationOptions::new(kernel));
            strategy.accept_input(grid).unwrap();
            strategy.run().unwrap();
            rp.check(strategy.rounds() >= 1, "at least one round");
            let out = strategy.retrieve_output().unwrap();
            let reference = label(StrategyKind::OnePass, grid).unwrap();
            rp.check(valid_result(&out), &format!("{:?} valid on grid {}", kernel, i));
            rp.check(
                partition_equivalent(&reference, &out),
                &format!("{:?} partition on grid {}", kernel, i),
            );

            // labels only ever decrease from the start label
            let mut min_ok = true;
            for (idx, &v) in out.data().iter().enumerate() {
                if v != BACKGROUND && (v as usize) > idx + 2 {
                    min_ok = false;
                }
            }
            rp.check(min_ok, "labels bounded by start labels");
        }
    }

    // The plus kernel agrees with the neighbour kernel in fewer rounds
    let grid = serpentine(16, 3);
    let mut neighbour = PropagationStrategy::host(&PropagationOptions::new(Kernel::Neighbour));
    let mut plus =
        PropagationStrategy::host(&PropagationOptions::default().with_kernel(Kernel::Plus));
    let a = ccl_label::run_strategy(&mut neighbour, &grid).unwrap();
    let b = ccl_label::run_strategy(&mut plus, &grid).unwrap();
    rp.compare_grids(&a, &b);
    rp.check(plus.rounds() < neighbour.rounds(), "plus converges faster");

    // Host device refuses work before an upload
    let mut device = HostDevice::new(&PropagationOptions::default());
    rp.check(
        device.dispatch_propagate().is_err(),
        "dispatch without buffer fails",
    );

    assert!(rp.cleanup(), "propagation regression test failed");
}
