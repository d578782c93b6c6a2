// handlers/protected/mod.rs - Protected handlers (session cookie required)
//
// Every handler here takes `CurrentUser`, so the credential gate has already
// run and failed with 401/404 before the handler body executes.

pub mod auth;
pub mod resource;
