// routefix - app/mod.rs
//
// Application layer: per-pass orchestration and route file content I/O.
// Dependencies: core layer.

pub mod fix;
