//! Trim router state machine
//!
//! ```text
//!   Disabled --enable--> Idle --hold begin--> Trimming
//!      ^                  |  <--hold end----     |
//!      +-----disable------+----------disable-----+
//! ```
//!
//! All state sits in `Cell`s so every handler only needs `&self`. The host
//! calls back into the hat handlers synchronously while the hold handler is
//! still running (ending the hat commands re-enters them), so handlers must
//! be able to nest.

use std::cell::Cell;

use tracing::{debug, warn};

use crate::direction::{HatDirection, TrimCommand};
use crate::host::{CommandHost, CommandPhase, Disposition};
use crate::table::CommandTable;

/// Router state
///
/// Folds the enabled and trimming flags together, so trimming can never be
/// observed while disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Disabled,
    /// Enabled, hold command not active: the hat pans the camera
    Idle,
    /// Enabled and the hold command is active: the hat trims
    Trimming,
}

/// Forwards hat switch phases to trim commands while the hold command is active
#[derive(Debug)]
pub struct TrimRouter<C> {
    commands: CommandTable<C>,
    state: Cell<RouterState>,
    reverse: Cell<bool>,
    /// Trim command begun by each direction and not yet ended
    held: [Cell<Option<TrimCommand>>; HatDirection::COUNT],
}

impl<C: Copy> TrimRouter<C> {
    /// Create a disabled router over resolved commands
    pub fn new(commands: CommandTable<C>) -> Self {
        Self {
            commands,
            state: Cell::new(RouterState::Disabled),
            reverse: Cell::new(false),
            held: Default::default(),
        }
    }

    pub fn commands(&self) -> &CommandTable<C> {
        &self.commands
    }

    pub fn state(&self) -> RouterState {
        self.state.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.get() != RouterState::Disabled
    }

    pub fn is_trimming(&self) -> bool {
        self.state.get() == RouterState::Trimming
    }

    pub fn reverse(&self) -> bool {
        self.reverse.get()
    }

    /// Swap the pitch mapping (hat up trims nose up)
    pub fn set_reverse(&self, reverse: bool) {
        self.reverse.set(reverse);
    }

    /// Plugin activation. No-op if already enabled.
    pub fn enable(&self) {
        if self.state.get() == RouterState::Disabled {
            self.state.set(RouterState::Idle);
            debug!("Router enabled");
        }
    }

    /// Plugin deactivation
    ///
    /// Drops out of trimming without ending any command; nothing is forwarded
    /// again until the router is enabled and the hold command begins afresh.
    pub fn disable(&self) {
        if self.state.replace(RouterState::Disabled) == RouterState::Trimming {
            debug!("Trimming cancelled by disable");
        }
        self.clear_held();
    }

    /// Handle a phase of the hold-to-trim command
    pub fn handle_hold<H>(&self, host: &mut H, phase: CommandPhase) -> Disposition
    where
        H: CommandHost<Command = C>,
    {
        if !self.is_enabled() {
            return Disposition::Consumed;
        }

        match phase {
            CommandPhase::Begin => {
                // Cancel any camera pan in progress. These ends come back
                // through `handle_hat` and must still pass through.
                for (_, cmd) in self.commands.hats() {
                    host.command_end(cmd);
                }
                self.state.set(RouterState::Trimming);
                debug!("Trimming started");
            }
            CommandPhase::Continue => {}
            CommandPhase::End => {
                self.state.set(RouterState::Idle);
                self.clear_held();
                for cmd in self.commands.trims() {
                    host.command_end(cmd);
                }
                debug!("Trimming stopped");
            }
            CommandPhase::Unknown(raw) => {
                warn!("Invalid command phase {} for hold command", raw);
            }
        }
        Disposition::Consumed
    }

    /// Handle a phase of one of the hat switch commands
    pub fn handle_hat<H>(
        &self,
        host: &mut H,
        direction: HatDirection,
        phase: CommandPhase,
    ) -> Disposition
    where
        H: CommandHost<Command = C>,
    {
        if !self.is_trimming() {
            return Disposition::PassThrough;
        }

        let Some(mapped) = direction.trim(self.reverse.get()) else {
            // Diagonals don't trim, but must not pan either
            return Disposition::Consumed;
        };

        let slot = &self.held[direction.index()];
        match phase {
            CommandPhase::Begin => {
                slot.set(Some(mapped));
                host.command_begin(self.commands.trim(mapped));
            }
            CommandPhase::Continue => {}
            CommandPhase::End => {
                // End whatever this direction began, even if reverse flipped since
                let trim = slot.take().unwrap_or(mapped);
                host.command_end(self.commands.trim(trim));
            }
            CommandPhase::Unknown(raw) => {
                warn!("Invalid command phase {} for {:?}", raw, direction);
            }
        }
        Disposition::Consumed
    }

    fn clear_held(&self) {
        for slot in &self.held {
            slot.set(None);
        }
    }
}
