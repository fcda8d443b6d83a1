//! Top-level "trimhat" menu with a single checkable reverse item

use std::ffi::{c_int, c_void, CString};
use std::ptr;

use anyhow::{bail, Result};
use trimhat::PluginInfo;
use xplm_sys::{
    xplm_Menu_Checked, xplm_Menu_Unchecked, XPLMAppendMenuItem, XPLMCheckMenuItem, XPLMCreateMenu,
    XPLMDestroyMenu, XPLMMenuCheck, XPLMMenuID,
};

use crate::with_instance;

type MenuCallback = unsafe extern "C" fn(*mut c_void, *mut c_void);

/// Menu label of the reverse toggle
const REVERSE_LABEL: &str = "Reverse pitch trim";

/// Owns the menu; destroyed on drop
#[derive(Debug)]
pub struct ReverseMenu {
    menu: XPLMMenuID,
    item: c_int,
}

impl ReverseMenu {
    pub fn create(reverse: bool) -> Result<Self> {
        let title = CString::new(PluginInfo::TRIMHAT.name)?;
        let label = CString::new(REVERSE_LABEL)?;

        // SAFETY: a null parent puts the menu in the menu bar; strings are
        // copied by the host
        let menu = unsafe {
            XPLMCreateMenu(
                title.as_ptr(),
                ptr::null_mut(),
                0,
                Some(menu_handler as MenuCallback),
                ptr::null_mut(),
            )
        };
        if menu.is_null() {
            bail!("host refused to create the menu");
        }

        // SAFETY: `menu` was just created
        let item = unsafe { XPLMAppendMenuItem(menu, label.as_ptr(), ptr::null_mut(), 0) };
        // Dropping `created` tears the menu down again on failure
        let created = Self { menu, item };
        if item < 0 {
            bail!("host refused to add the reverse item");
        }

        created.set_checked(reverse);
        Ok(created)
    }

    pub fn set_checked(&self, checked: bool) {
        let state = if checked {
            xplm_Menu_Checked
        } else {
            xplm_Menu_Unchecked
        };
        // SAFETY: menu and item are alive until drop
        unsafe { XPLMCheckMenuItem(self.menu, self.item, state as XPLMMenuCheck) };
    }
}

impl Drop for ReverseMenu {
    fn drop(&mut self) {
        // SAFETY: created in `create`, destroyed only here
        unsafe { XPLMDestroyMenu(self.menu) };
    }
}

unsafe extern "C" fn menu_handler(_menu_ref: *mut c_void, _item_ref: *mut c_void) {
    with_instance(|instance| {
        let reverse = instance.plugin.toggle_reverse();
        if let Some(menu) = &instance.menu {
            menu.set_checked(reverse);
        }
    });
}
