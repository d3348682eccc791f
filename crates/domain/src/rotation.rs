use crate::{MesocycleSession, SessionID};

/// Round-robin selection of the next session. Falls back to the first session
/// when there is no prior completion or the last completed session is not part
/// of the list (e.g. it belongs to a superseded mesocycle).
#[must_use]
pub fn next_session(
    sessions: &[MesocycleSession],
    last_completed: Option<SessionID>,
) -> Option<&MesocycleSession> {
    if sessions.is_empty() {
        return None;
    }

    let Some(last_completed) = last_completed else {
        return sessions.first();
    };

    let Some(index) = sessions.iter().position(|s| s.id == last_completed) else {
        return sessions.first();
    };

    sessions.get((index + 1) % sessions.len())
}
