/// Operator provisioning of the game aggregate.
pub mod admin_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// The three engine operations: guess, hint, reveal.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Read-only public projections of the game.
pub mod public_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Storage connection supervisor with reconnect and degraded mode.
pub mod storage_supervisor;
