//! XPLM command API behind the `CommandHost` seam

use std::ffi::{c_int, c_void, CString};
use std::ptr;

use tracing::warn;
use trimhat::{CommandHost, CommandPhase, Disposition, HandlerBinding, HatDirection};
use xplm_sys::{
    XPLMCommandBegin, XPLMCommandEnd, XPLMCommandPhase, XPLMCommandRef, XPLMCreateCommand,
    XPLMFindCommand, XPLMRegisterCommandHandler, XPLMUnregisterCommandHandler,
};

use crate::with_instance;

type CommandCallback =
    unsafe extern "C" fn(XPLMCommandRef, XPLMCommandPhase, *mut c_void) -> c_int;

/// Handlers run before the simulator's own
const BEFORE: c_int = 1;

/// The running simulator
#[derive(Debug, Clone, Copy, Default)]
pub struct Xplm;

impl CommandHost for Xplm {
    type Command = XPLMCommandRef;

    fn find_command(&mut self, name: &str) -> Option<XPLMCommandRef> {
        let name = CString::new(name).ok()?;
        // SAFETY: `name` is NUL-terminated and outlives the call
        let cmd = unsafe { XPLMFindCommand(name.as_ptr()) };
        (!cmd.is_null()).then_some(cmd)
    }

    fn create_command(&mut self, name: &str, description: &str) -> Option<XPLMCommandRef> {
        let name = CString::new(name).ok()?;
        let description = CString::new(description).ok()?;
        // SAFETY: both strings are NUL-terminated; the host copies them
        let cmd = unsafe { XPLMCreateCommand(name.as_ptr(), description.as_ptr()) };
        (!cmd.is_null()).then_some(cmd)
    }

    fn register_handler(&mut self, command: XPLMCommandRef, binding: HandlerBinding) {
        let (callback, refcon) = callback_for(binding);
        // SAFETY: `command` came from the host and the callback is 'static
        unsafe { XPLMRegisterCommandHandler(command, Some(callback), BEFORE, refcon) };
    }

    fn unregister_handler(&mut self, command: XPLMCommandRef, binding: HandlerBinding) {
        let (callback, refcon) = callback_for(binding);
        // SAFETY: same arguments as the matching registration
        unsafe { XPLMUnregisterCommandHandler(command, Some(callback), BEFORE, refcon) };
    }

    fn command_begin(&mut self, command: XPLMCommandRef) {
        // SAFETY: `command` came from the host
        unsafe { XPLMCommandBegin(command) }
    }

    fn command_end(&mut self, command: XPLMCommandRef) {
        // SAFETY: `command` came from the host
        unsafe { XPLMCommandEnd(command) }
    }
}

/// Callback and refcon for a binding. Hat handlers carry their direction
/// index in the refcon.
fn callback_for(binding: HandlerBinding) -> (CommandCallback, *mut c_void) {
    match binding {
        HandlerBinding::Hold => (hold_handler as CommandCallback, ptr::null_mut()),
        HandlerBinding::Hat(direction) => (
            hat_handler as CommandCallback,
            direction.index() as *mut c_void,
        ),
    }
}

/// Host return value: 0 stops the simulator's own handling
fn to_host(disposition: Disposition) -> c_int {
    match disposition {
        Disposition::Consumed => 0,
        Disposition::PassThrough => 1,
    }
}

unsafe extern "C" fn hold_handler(
    _command: XPLMCommandRef,
    phase: XPLMCommandPhase,
    _refcon: *mut c_void,
) -> c_int {
    let phase = CommandPhase::from_raw(phase);
    let disposition = with_instance(|instance| instance.plugin.handle_hold(&mut Xplm, phase));
    to_host(disposition.unwrap_or(Disposition::PassThrough))
}

unsafe extern "C" fn hat_handler(
    _command: XPLMCommandRef,
    phase: XPLMCommandPhase,
    refcon: *mut c_void,
) -> c_int {
    let Some(direction) = HatDirection::from_index(refcon as usize) else {
        warn!("Invalid hat direction {}", refcon as usize);
        return to_host(Disposition::PassThrough);
    };
    let phase = CommandPhase::from_raw(phase);
    let disposition =
        with_instance(|instance| instance.plugin.handle_hat(&mut Xplm, direction, phase));
    to_host(disposition.unwrap_or(Disposition::PassThrough))
}
