//! Plugin instance and lifecycle
//!
//! Ties the router to its command registrations and the persisted reverse
//! preference. The host binding owns one [`TrimHat`] between start and stop.

use tracing::{info, warn};

use crate::config::PreferenceStore;
use crate::direction::HatDirection;
use crate::error::StartupError;
use crate::host::{CommandHost, CommandPhase, Disposition, HandlerBinding};
use crate::router::TrimRouter;
use crate::table::CommandTable;

/// Metadata reported to the host at start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
}

impl PluginInfo {
    pub const TRIMHAT: PluginInfo = PluginInfo {
        name: "trimhat",
        signature: "com.amyinorbit.trimhat",
        description: "trim your plane using the hat switch",
    };
}

/// A started plugin
#[derive(Debug)]
pub struct TrimHat<C> {
    router: TrimRouter<C>,
    /// `None` when the host gave us nowhere to keep preferences
    prefs: Option<PreferenceStore>,
}

impl<C: Copy> TrimHat<C> {
    /// Resolve every command and register all handlers
    ///
    /// Nothing is registered if any command is missing.
    pub fn start<H>(host: &mut H, prefs: Option<PreferenceStore>) -> Result<Self, StartupError>
    where
        H: CommandHost<Command = C>,
    {
        let commands = CommandTable::resolve(host)?;

        for (command, binding) in bindings(&commands) {
            host.register_handler(command, binding);
        }

        match &prefs {
            Some(store) => info!("Started, preferences at {:?}", store.path()),
            None => warn!("Started without a preferences location, reverse won't persist"),
        }

        Ok(Self {
            router: TrimRouter::new(commands),
            prefs,
        })
    }

    /// Unregister every handler registered by [`TrimHat::start`]
    pub fn stop<H>(&self, host: &mut H)
    where
        H: CommandHost<Command = C>,
    {
        for (command, binding) in bindings(self.router.commands()) {
            host.unregister_handler(command, binding);
        }
        info!("Stopped");
    }

    /// Activate the router and pick up the stored reverse preference
    ///
    /// If nothing is stored yet, the current value is written out.
    pub fn enable(&self) {
        self.router.enable();

        if let Some(store) = &self.prefs {
            match store.load_reverse() {
                Some(reverse) => self.router.set_reverse(reverse),
                None => self.persist_reverse(store),
            }
        }
        info!("enabled (reverse: {})", self.router.reverse());
    }

    pub fn disable(&self) {
        self.router.disable();
        info!("disabled");
    }

    pub fn handle_hold<H>(&self, host: &mut H, phase: CommandPhase) -> Disposition
    where
        H: CommandHost<Command = C>,
    {
        self.router.handle_hold(host, phase)
    }

    pub fn handle_hat<H>(
        &self,
        host: &mut H,
        direction: HatDirection,
        phase: CommandPhase,
    ) -> Disposition
    where
        H: CommandHost<Command = C>,
    {
        self.router.handle_hat(host, direction, phase)
    }

    pub fn reverse(&self) -> bool {
        self.router.reverse()
    }

    /// Flip the reverse preference and persist it. Returns the new value.
    ///
    /// A failed write is logged; the new value still applies for this session.
    pub fn toggle_reverse(&self) -> bool {
        let reverse = !self.router.reverse();
        self.router.set_reverse(reverse);
        if let Some(store) = &self.prefs {
            self.persist_reverse(store);
        }
        info!("reverse {}", if reverse { "on" } else { "off" });
        reverse
    }

    pub fn router(&self) -> &TrimRouter<C> {
        &self.router
    }

    fn persist_reverse(&self, store: &PreferenceStore) {
        if let Err(e) = store.save_reverse(self.router.reverse()) {
            warn!("Could not save preferences to {:?}: {}", store.path(), e);
        }
    }
}

/// Every handler registration, hold command first
fn bindings<C: Copy>(commands: &CommandTable<C>) -> impl Iterator<Item = (C, HandlerBinding)> + '_ {
    std::iter::once((commands.hold(), HandlerBinding::Hold)).chain(
        commands
            .hats()
            .map(|(direction, command)| (command, HandlerBinding::Hat(direction))),
    )
}
