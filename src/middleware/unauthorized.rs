// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The 401 policy: forget the session and send the user to sign in.

use crate::session::SessionHolder;

/// Route the user is sent to when the session is no longer accepted.
pub const SIGN_IN_ROUTE: &str = "/admin/sign-in";

/// Navigation side effect triggered by the client.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator for terminal use: tells the user to sign in again.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignInNotice;

impl Navigator for SignInNotice {
    fn navigate(&self, route: &str) {
        tracing::warn!(route, "Session no longer valid; sign in again");
    }
}

/// Clear stored identity and navigate to the sign-in route.
///
/// A storage failure is logged; navigation happens regardless.
pub fn force_sign_out(session: &SessionHolder, navigator: &dyn Navigator) {
    if let Err(e) = session.clear() {
        tracing::error!(error = %e, "Failed to clear stored session");
    }
    navigator.navigate(SIGN_IN_ROUTE);
}
