//! End-to-end sessions against a simulated host.
//!
//! The simulated host dispatches commands the way the simulator does: a
//! begin/end on a command synchronously runs the plugin handler bound to it,
//! and if the handler passes the event through, the host's own default action
//! runs. Default actions are what the pilot would see (camera pans, trim
//! wheel moves).

use std::cell::{OnceCell, RefCell};

use pretty_assertions::assert_eq;
use trimhat::{
    CommandHost, CommandPhase, Disposition, HandlerBinding, HatDirection, TrimCommand, TrimHat,
    HOLD_COMMAND,
};

#[derive(Default)]
struct Sim {
    plugin: OnceCell<TrimHat<usize>>,
    commands: RefCell<Vec<String>>,
    handlers: RefCell<Vec<(usize, HandlerBinding)>>,
    /// Host default actions that ran, as (command, phase)
    defaults: RefCell<Vec<(String, CommandPhase)>>,
}

/// Host access handed to the plugin; cheap to create for nested dispatch
struct Port<'a>(&'a Sim);

impl Sim {
    fn start() -> Sim {
        let sim = Sim::default();
        let plugin = TrimHat::start(&mut Port(&sim), None).unwrap();
        assert!(sim.plugin.set(plugin).is_ok());
        sim
    }

    fn plugin(&self) -> &TrimHat<usize> {
        self.plugin.get().unwrap()
    }

    fn command(&self, name: &str) -> usize {
        let mut commands = self.commands.borrow_mut();
        match commands.iter().position(|c| c == name) {
            Some(idx) => idx,
            None => {
                commands.push(name.to_string());
                commands.len() - 1
            }
        }
    }

    /// Simulate the pilot (or a binding) driving a command
    fn press(&self, name: &str, phase: CommandPhase) {
        let cmd = self.command(name);
        self.dispatch(cmd, phase);
    }

    fn dispatch(&self, cmd: usize, phase: CommandPhase) {
        let binding = self
            .handlers
            .borrow()
            .iter()
            .find(|(c, _)| *c == cmd)
            .map(|&(_, b)| b);

        let disposition = match (binding, self.plugin.get()) {
            (Some(HandlerBinding::Hold), Some(p)) => p.handle_hold(&mut Port(self), phase),
            (Some(HandlerBinding::Hat(dir)), Some(p)) => {
                p.handle_hat(&mut Port(self), dir, phase)
            }
            _ => Disposition::PassThrough,
        };

        if disposition == Disposition::PassThrough {
            let name = self.commands.borrow()[cmd].clone();
            self.defaults.borrow_mut().push((name, phase));
        }
    }

    fn take_defaults(&self) -> Vec<(String, CommandPhase)> {
        std::mem::take(&mut *self.defaults.borrow_mut())
    }
}

impl CommandHost for Port<'_> {
    type Command = usize;

    fn find_command(&mut self, name: &str) -> Option<usize> {
        Some(self.0.command(name))
    }

    fn create_command(&mut self, name: &str, _description: &str) -> Option<usize> {
        Some(self.0.command(name))
    }

    fn register_handler(&mut self, command: usize, binding: HandlerBinding) {
        self.0.handlers.borrow_mut().push((command, binding));
    }

    fn unregister_handler(&mut self, command: usize, binding: HandlerBinding) {
        self.0
            .handlers
            .borrow_mut()
            .retain(|&h| h != (command, binding));
    }

    fn command_begin(&mut self, command: usize) {
        self.0.dispatch(command, CommandPhase::Begin);
    }

    fn command_end(&mut self, command: usize) {
        self.0.dispatch(command, CommandPhase::End);
    }
}

fn hat(dir: HatDirection) -> &'static str {
    dir.command_name()
}

fn action(name: &str, phase: CommandPhase) -> (String, CommandPhase) {
    (name.to_string(), phase)
}

#[test]
fn hat_pans_camera_when_not_holding() {
    let sim = Sim::start();
    sim.plugin().enable();

    sim.press(hat(HatDirection::Up), CommandPhase::Begin);
    sim.press(hat(HatDirection::Up), CommandPhase::End);

    assert_eq!(
        sim.take_defaults(),
        vec![
            action(hat(HatDirection::Up), CommandPhase::Begin),
            action(hat(HatDirection::Up), CommandPhase::End),
        ]
    );
}

#[test]
fn hold_cancels_camera_pan_then_trims() {
    let sim = Sim::start();
    sim.plugin().enable();

    // Pilot is panning when they grab the trim button
    sim.press(hat(HatDirection::Left), CommandPhase::Begin);
    sim.take_defaults();

    sim.press(HOLD_COMMAND, CommandPhase::Begin);
    // The hat ends issued by the plugin reach the host's camera handling
    let expected: Vec<_> = HatDirection::ALL
        .iter()
        .map(|d| action(d.command_name(), CommandPhase::End))
        .collect();
    assert_eq!(sim.take_defaults(), expected);

    sim.press(hat(HatDirection::Up), CommandPhase::Begin);
    sim.press(hat(HatDirection::Up), CommandPhase::Continue);
    sim.press(hat(HatDirection::Up), CommandPhase::End);
    let pitch_down = TrimCommand::PitchDown.command_name();
    assert_eq!(
        sim.take_defaults(),
        vec![
            action(pitch_down, CommandPhase::Begin),
            action(pitch_down, CommandPhase::End),
        ]
    );
}

#[test]
fn diagonal_does_nothing_while_holding() {
    let sim = Sim::start();
    sim.plugin().enable();
    sim.press(HOLD_COMMAND, CommandPhase::Begin);
    sim.take_defaults();

    sim.press(hat(HatDirection::UpLeft), CommandPhase::Begin);
    sim.press(hat(HatDirection::UpLeft), CommandPhase::End);
    assert!(sim.take_defaults().is_empty());
}

#[test]
fn releasing_hold_releases_every_trim() {
    let sim = Sim::start();
    sim.plugin().enable();
    sim.press(HOLD_COMMAND, CommandPhase::Begin);
    sim.press(hat(HatDirection::Right), CommandPhase::Begin);
    sim.take_defaults();

    // Hold released while the hat is still deflected
    sim.press(HOLD_COMMAND, CommandPhase::End);
    let expected: Vec<_> = TrimCommand::ALL
        .iter()
        .map(|t| action(t.command_name(), CommandPhase::End))
        .collect();
    assert_eq!(sim.take_defaults(), expected);

    // The hat's own release now goes back to the camera
    sim.press(hat(HatDirection::Right), CommandPhase::End);
    assert_eq!(
        sim.take_defaults(),
        vec![action(hat(HatDirection::Right), CommandPhase::End)]
    );
}

#[test]
fn reverse_preference_drives_pitch_up() {
    let sim = Sim::start();
    sim.plugin().enable();
    assert!(sim.plugin().toggle_reverse());
    sim.press(HOLD_COMMAND, CommandPhase::Begin);
    sim.take_defaults();

    sim.press(hat(HatDirection::Up), CommandPhase::Begin);
    assert_eq!(
        sim.take_defaults(),
        vec![action(TrimCommand::PitchUp.command_name(), CommandPhase::Begin)]
    );
}

#[test]
fn disabled_plugin_leaves_hat_alone() {
    let sim = Sim::start();
    sim.plugin().enable();
    sim.press(HOLD_COMMAND, CommandPhase::Begin);
    sim.plugin().disable();
    sim.take_defaults();

    sim.press(hat(HatDirection::Down), CommandPhase::Begin);
    assert_eq!(
        sim.take_defaults(),
        vec![action(hat(HatDirection::Down), CommandPhase::Begin)]
    );
}

#[test]
fn stop_unbinds_everything() {
    let sim = Sim::start();
    sim.plugin().stop(&mut Port(&sim));
    assert!(sim.handlers.borrow().is_empty());
}
