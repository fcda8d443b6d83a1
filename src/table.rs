//! Resolved command handles
//!
//! Built once at startup and never modified afterwards.

use tracing::debug;

use crate::direction::{HatDirection, TrimCommand, HOLD_COMMAND, HOLD_DESCRIPTION};
use crate::error::StartupError;
use crate::host::CommandHost;

/// Host handles for every command the router touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTable<C> {
    hold: C,
    trim: [C; TrimCommand::COUNT],
    hat: [C; HatDirection::COUNT],
}

impl<C: Copy> CommandTable<C> {
    /// Create the hold command, then look up the trim and hat commands
    ///
    /// Fails on the first command that cannot be created or found.
    pub fn resolve<H>(host: &mut H) -> Result<Self, StartupError>
    where
        H: CommandHost<Command = C>,
    {
        let hold = host
            .create_command(HOLD_COMMAND, HOLD_DESCRIPTION)
            .ok_or(StartupError::CreateCommand(HOLD_COMMAND))?;

        let trim = resolve_all(host, TrimCommand::ALL.map(TrimCommand::command_name))?;
        let hat = resolve_all(host, HatDirection::ALL.map(HatDirection::command_name))?;

        debug!(
            "Resolved {} trim and {} hat commands",
            trim.len(),
            hat.len()
        );

        Ok(Self { hold, trim, hat })
    }

    /// The plugin-owned hold-to-trim command
    pub fn hold(&self) -> C {
        self.hold
    }

    pub fn trim(&self, command: TrimCommand) -> C {
        self.trim[command.index()]
    }

    pub fn hat(&self, direction: HatDirection) -> C {
        self.hat[direction.index()]
    }

    /// Trim handles in [`TrimCommand::ALL`] order
    pub fn trims(&self) -> impl Iterator<Item = C> + '_ {
        self.trim.iter().copied()
    }

    /// Hat handles paired with their direction, in [`HatDirection::ALL`] order
    pub fn hats(&self) -> impl Iterator<Item = (HatDirection, C)> + '_ {
        HatDirection::ALL.into_iter().zip(self.hat.iter().copied())
    }
}

fn resolve_all<H, const N: usize>(
    host: &mut H,
    names: [&'static str; N],
) -> Result<[H::Command; N], StartupError>
where
    H: CommandHost,
{
    let mut found = Vec::with_capacity(N);
    for name in names {
        let cmd = host
            .find_command(name)
            .ok_or(StartupError::CommandNotFound(name))?;
        found.push(cmd);
    }
    // `found` has exactly N entries here
    found
        .try_into()
        .map_err(|_| StartupError::CommandNotFound(names[0]))
}
