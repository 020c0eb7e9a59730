use crate::mpris::MprisHandle;
use crate::session::SessionState;

/// Push a fresh snapshot to the bus only when something actually changed.
pub fn sync_if_changed(mpris: &MprisHandle, snapshot: &SessionState, last: &mut SessionState) {
    if snapshot != last {
        mpris.sync(snapshot);
        *last = snapshot.clone();
    }
}
