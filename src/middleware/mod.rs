// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request pipeline policies (bearer authentication, forced sign-out).

pub mod auth;
pub mod unauthorized;

pub use auth::{expires_within, token_expiry, TOKEN_REFRESH_MARGIN_SECS};
pub use unauthorized::{force_sign_out, Navigator, SignInNotice, SIGN_IN_ROUTE};
