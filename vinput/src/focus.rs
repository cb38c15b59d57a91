//! Caret placement on focus.

use log::trace;

use crate::host::NativeControl;
use crate::value::Kind;

/// Move the caret to the end of `text` when the control gains focus.
///
/// Returns the caret position, or `None` when nothing was done: kinds without
/// a text caret (number, color, range, ...) and controls that don't support
/// selection ranges are left alone.
pub fn place_caret_at_end(kind: Kind, text: &str, control: &mut dyn NativeControl) -> Option<usize> {
    if !kind.has_caret() {
        return None;
    }
    if !control.supports_selection() {
        trace!("control for {kind} field has no selection support");
        return None;
    }
    let end = text.chars().count();
    control.set_selection_range(end, end);
    Some(end)
}
