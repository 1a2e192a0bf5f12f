use crate::{
    error::Result,
    jog_controller::{ActionOutputs, JogController},
    machine::{Actuator, Machine, MachineSignals},
    pendant::{PendantState, RawReport, Transport},
};

/// Owns every piece of per-cycle state and runs report cycles one at a time.
///
/// A cycle decodes the report, forwards the pendant estop switch, samples the
/// machine, decides, applies the actions and finally sends the display frame.
/// Hosts with several threads must keep the driver on one of them or behind a
/// single lock.
pub struct PendantDriver<T, M> {
    transport: T,
    machine: M,
    pendant: PendantState,
    controller: JogController,
}

impl<T, M> PendantDriver<T, M>
where
    T: Transport,
    M: Machine + Actuator,
{
    pub fn new(transport: T, machine: M, controller: JogController) -> Self {
        Self {
            transport,
            machine,
            pendant: PendantState::new(),
            controller,
        }
    }

    /// Enter the polling loop. This blocks until an error occurs.
    pub fn run(mut self) -> Result<()> {
        loop {
            self.poll_once()?;
        }
    }

    /// Wait for one report and process it. `Ok(None)` when nothing arrived.
    pub fn poll_once(&mut self) -> Result<Option<ActionOutputs>> {
        match self.transport.read_report()? {
            Some(report) => self.process(&report).map(Some),
            None => Ok(None),
        }
    }

    pub fn process(&mut self, report: &RawReport) -> Result<ActionOutputs> {
        self.pendant.update(report);
        self.machine.set_estop_latch(self.pendant.estop);

        let signals = MachineSignals::query(&self.machine, self.controller.axes());
        let outputs = self.controller.update(&self.pendant, &signals);

        apply(&mut self.machine, &outputs);
        self.transport.write_display(&outputs.display)?;
        Ok(outputs)
    }

    pub fn pendant(&self) -> &PendantState {
        &self.pendant
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn apply<A: Actuator + ?Sized>(actuator: &mut A, outputs: &ActionOutputs) {
    actuator.enable_jog(outputs.jog_actuator());
    if let Some(offset) = outputs.zero_offset {
        actuator.set_zero_offset(offset);
    }
    actuator.commit_zero(outputs.zero_actuator());
    actuator.set_feed_override_enable(outputs.feed_override_enable);
    actuator.set_jog_scale(outputs.tick_scale);
    actuator.set_jog_counts(outputs.tick_position);
}
