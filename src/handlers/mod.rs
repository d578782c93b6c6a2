// handlers/mod.rs - Two-tier handler layout
//
// Public (no credential) → Protected (session cookie resolved to a user).
// Page loads outside /api are additionally screened by the edge filter in
// middleware/edge.rs before they reach any handler.

pub mod pages;
pub mod protected; // Tier 2: CurrentUser extractor required (/api/auth, /api/todos, /api/notes)
pub mod public; // Tier 1: No credential required (/health, /api/auth/signin, ...)
