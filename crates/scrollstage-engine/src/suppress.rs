//! Native-scroll suppression: idempotent toggles over the host's default
//! wheel/touch handling, plus the independent full-page lock used by modal
//! collaborators.

use crate::host::PageHost;
use crate::session::SessionState;

/// Cancel default wheel/touch behavior at the document level.
pub fn disable<H: PageHost>(session: &mut SessionState, host: &mut H) {
    if session.native_scroll_disabled {
        return;
    }
    host.set_input_suppressed(true);
    session.native_scroll_disabled = true;
}

/// Restore default wheel/touch behavior.
pub fn enable<H: PageHost>(session: &mut SessionState, host: &mut H) {
    if !session.native_scroll_disabled {
        return;
    }
    host.set_input_suppressed(false);
    session.native_scroll_disabled = false;
}

/// Force full page-scroll lockdown regardless of section policy. The engine
/// treats this as an unconditional block on new transitions.
pub fn lock_page<H: PageHost>(session: &mut SessionState, host: &mut H) {
    if session.page_locked {
        return;
    }
    host.set_page_locked(true);
    session.page_locked = true;
}

pub fn unlock_page<H: PageHost>(session: &mut SessionState, host: &mut H) {
    if !session.page_locked {
        return;
    }
    host.set_page_locked(false);
    session.page_locked = false;
}
