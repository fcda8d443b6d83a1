//! X-Plane plugin entry points for trimhat
//!
//! Build as a cdylib and install as `trimhat/<platform>_x64/trimhat.xpl`.
//! All entry points and callbacks run on the simulator's main thread, so the
//! plugin instance lives in a thread-local slot.

mod host;
mod menu;

use std::cell::RefCell;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::path::PathBuf;
use std::ptr;

use anyhow::{ensure, Context, Result};
use tracing::{error, warn};
use trimhat::{PluginInfo, PreferenceStore, TrimHat};
use xplm_sys::{
    XPLMCommandRef, XPLMDebugString, XPLMEnableFeature, XPLMGetPrefsPath, XPLMPluginID,
};

use crate::host::Xplm;
use crate::menu::ReverseMenu;

/// Size of the name/signature/description buffers the host hands to start
const HOST_STRING_LEN: usize = 256;

/// Size the host requires for path output buffers
const HOST_PATH_LEN: usize = 512;

struct Instance {
    plugin: TrimHat<XPLMCommandRef>,
    /// Present while enabled
    menu: Option<ReverseMenu>,
}

thread_local! {
    static INSTANCE: RefCell<Option<Instance>> = const { RefCell::new(None) };
}

/// Run `f` against the started plugin, if any
///
/// Only takes a shared borrow: command handlers nest when one handler
/// begins or ends another command.
fn with_instance<R>(f: impl FnOnce(&Instance) -> R) -> Option<R> {
    INSTANCE.with_borrow(|slot| slot.as_ref().map(f))
}

fn debug_string(line: &CStr) {
    // SAFETY: `line` is NUL-terminated and outlives the call
    unsafe { XPLMDebugString(line.as_ptr()) }
}

/// Copy `src` into a host-owned buffer, truncating to fit
///
/// # Safety
/// `dst` must point to at least [`HOST_STRING_LEN`] writable bytes.
unsafe fn write_host_string(dst: *mut c_char, src: &str) {
    let len = src.len().min(HOST_STRING_LEN - 1);
    unsafe {
        ptr::copy_nonoverlapping(src.as_ptr().cast::<c_char>(), dst, len);
        *dst.add(len) = 0;
    }
}

fn host_prefs_file() -> Result<PathBuf> {
    let mut buf: [c_char; HOST_PATH_LEN] = [0; HOST_PATH_LEN];
    // SAFETY: the buffer is the size the host asks for
    unsafe { XPLMGetPrefsPath(buf.as_mut_ptr()) };
    // SAFETY: the host NUL-terminates, and the buffer was zeroed
    let path = unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_str()
        .context("preferences path is not UTF-8")?;
    ensure!(!path.is_empty(), "host returned no preferences path");
    Ok(PathBuf::from(path))
}

fn start() -> Result<Instance> {
    let prefs = match host_prefs_file() {
        Ok(file) => PreferenceStore::beside(&file),
        Err(e) => {
            warn!("Preferences unavailable: {:#}", e);
            None
        }
    };
    let plugin = TrimHat::start(&mut Xplm, prefs).context("resolving simulator commands")?;
    Ok(Instance { plugin, menu: None })
}

/// # Safety
/// Called by X-Plane with three writable buffers of 256 bytes.
#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "C" fn XPluginStart(
    out_name: *mut c_char,
    out_signature: *mut c_char,
    out_description: *mut c_char,
) -> c_int {
    let info = PluginInfo::TRIMHAT;
    unsafe {
        write_host_string(out_name, info.name);
        write_host_string(out_signature, info.signature);
        write_host_string(out_description, info.description);
        XPLMEnableFeature(c"XPLM_USE_NATIVE_PATHS".as_ptr(), 1);
    }

    trimhat::logging::init(debug_string);

    match start() {
        Ok(instance) => {
            INSTANCE.set(Some(instance));
            1
        }
        Err(e) => {
            error!("Failed to start: {:#}", e);
            0
        }
    }
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn XPluginStop() {
    if let Some(instance) = INSTANCE.take() {
        instance.plugin.stop(&mut Xplm);
    }
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn XPluginEnable() -> c_int {
    INSTANCE.with_borrow_mut(|slot| {
        let Some(instance) = slot.as_mut() else {
            return 0;
        };
        instance.plugin.enable();
        match ReverseMenu::create(instance.plugin.reverse()) {
            Ok(menu) => instance.menu = Some(menu),
            Err(e) => warn!("Menu unavailable: {:#}", e),
        }
        1
    })
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn XPluginDisable() {
    INSTANCE.with_borrow_mut(|slot| {
        if let Some(instance) = slot.as_mut() {
            instance.plugin.disable();
            instance.menu = None;
        }
    });
}

#[allow(non_snake_case)]
#[no_mangle]
pub extern "C" fn XPluginReceiveMessage(_from: XPLMPluginID, _message: c_int, _param: *mut c_void) {
}
