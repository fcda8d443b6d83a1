//! Host command seam
//!
//! Everything the router needs from the simulator goes through [`CommandHost`]:
//! looking up and creating commands, binding handlers to them, and driving
//! their begin/end phases. [`RecordingHost`] is an in-memory implementation
//! that records every call.

use crate::direction::HatDirection;

/// Lifecycle phase of a held command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandPhase {
    Begin,
    Continue,
    End,
    /// A phase value the host sent that we do not know about
    Unknown(i32),
}

impl CommandPhase {
    /// Decode the host's raw phase value (0 = begin, 1 = continue, 2 = end)
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => CommandPhase::Begin,
            1 => CommandPhase::Continue,
            2 => CommandPhase::End,
            other => CommandPhase::Unknown(other),
        }
    }
}

/// What a handler tells the host about the event it just saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Suppress the host's default handling
    Consumed,
    /// Let the host's default handling run
    PassThrough,
}

impl Disposition {
    pub fn is_consumed(self) -> bool {
        self == Disposition::Consumed
    }
}

/// Which plugin handler a command is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerBinding {
    /// The hold-to-trim command handler
    Hold,
    /// A hat switch handler, bound to its direction
    Hat(HatDirection),
}

/// Simulator command API
///
/// Handlers are expected to be invoked synchronously by the host, possibly
/// from inside a `command_begin`/`command_end` call made by another handler.
pub trait CommandHost {
    /// Opaque handle to a host command
    type Command: Copy + PartialEq + std::fmt::Debug;

    /// Look up an existing command by identifier
    fn find_command(&mut self, name: &str) -> Option<Self::Command>;

    /// Create a new command owned by this plugin
    fn create_command(&mut self, name: &str, description: &str) -> Option<Self::Command>;

    /// Bind a plugin handler so it runs before the host's default handling
    fn register_handler(&mut self, command: Self::Command, binding: HandlerBinding);

    /// Undo a previous [`CommandHost::register_handler`] with the same arguments
    fn unregister_handler(&mut self, command: Self::Command, binding: HandlerBinding);

    /// Start holding a command
    fn command_begin(&mut self, command: Self::Command);

    /// Release a command; harmless if it was not held
    fn command_end(&mut self, command: Self::Command);
}

/// A call made against a [`RecordingHost`], with commands named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Find(String),
    Create(String),
    Register(String, HandlerBinding),
    Unregister(String, HandlerBinding),
    Begin(String),
    End(String),
}

/// In-memory host that resolves any command identifier and records all calls
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    /// Command identifiers; a handle is an index into this list
    commands: Vec<String>,
    /// Identifiers `find_command` refuses to resolve
    missing: Vec<String>,
    /// Refuse to create commands
    fail_create: bool,
    /// Currently registered handlers
    handlers: Vec<(usize, HandlerBinding)>,
    calls: Vec<HostCall>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_command` fail for `name`
    pub fn without_command(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    /// Make `create_command` fail
    pub fn refusing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// All calls so far, oldest first
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain the recorded calls
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Identifier behind a handle
    pub fn name_of(&self, command: usize) -> Option<&str> {
        self.commands.get(command).map(String::as_str)
    }

    /// Handlers still registered, by command identifier
    pub fn registered_handlers(&self) -> Vec<(String, HandlerBinding)> {
        self.handlers
            .iter()
            .map(|&(cmd, binding)| (self.label(cmd), binding))
            .collect()
    }

    fn label(&self, command: usize) -> String {
        self.name_of(command).unwrap_or("<unknown>").to_string()
    }

    fn intern(&mut self, name: &str) -> usize {
        match self.commands.iter().position(|c| c == name) {
            Some(idx) => idx,
            None => {
                self.commands.push(name.to_string());
                self.commands.len() - 1
            }
        }
    }
}

impl CommandHost for RecordingHost {
    type Command = usize;

    fn find_command(&mut self, name: &str) -> Option<usize> {
        self.calls.push(HostCall::Find(name.to_string()));
        if self.missing.iter().any(|m| m == name) {
            return None;
        }
        Some(self.intern(name))
    }

    fn create_command(&mut self, name: &str, _description: &str) -> Option<usize> {
        self.calls.push(HostCall::Create(name.to_string()));
        if self.fail_create {
            return None;
        }
        Some(self.intern(name))
    }

    fn register_handler(&mut self, command: usize, binding: HandlerBinding) {
        let name = self.label(command);
        self.calls.push(HostCall::Register(name, binding));
        self.handlers.push((command, binding));
    }

    fn unregister_handler(&mut self, command: usize, binding: HandlerBinding) {
        let name = self.label(command);
        self.calls.push(HostCall::Unregister(name, binding));
        self.handlers.retain(|&h| h != (command, binding));
    }

    fn command_begin(&mut self, command: usize) {
        let name = self.label(command);
        self.calls.push(HostCall::Begin(name));
    }

    fn command_end(&mut self, command: usize) {
        let name = self.label(command);
        self.calls.push(HostCall::End(name));
    }
}
