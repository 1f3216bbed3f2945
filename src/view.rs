/// Which page a request gets. Decided per request from the gate's current
/// state, never captured at startup: an authenticated view must become
/// unreachable the moment the session clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    LoginPrompt,
    Scorecard,
}

pub fn select_view(authenticated: bool) -> ViewKind {
    if authenticated {
        ViewKind::Scorecard
    } else {
        ViewKind::LoginPrompt
    }
}
