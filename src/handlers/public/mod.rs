// handlers/public/mod.rs - Public handlers (no session required)
//
// Token acquisition and liveness only. Nothing here reads the session cookie
// except sign-out, which clears it unconditionally.

pub mod auth;
pub mod health;
