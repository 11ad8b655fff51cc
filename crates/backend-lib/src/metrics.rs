// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for Prometheus metric keys
pub const SESSION_CREATED: &str = "auth.session.created";
pub const SESSION_DESTROYED: &str = "auth.session.destroyed";
pub const SESSION_ACTIVE: &str = "auth.session.active";
pub const GATE_UNAUTHORIZED: &str = "auth.gate.unauthorized";
pub const GATE_FORBIDDEN: &str = "auth.gate.forbidden";
pub const USER_REGISTERED: &str = "auth.user.registered";
pub const RESET_ISSUED: &str = "auth.reset.issued";
pub const RESET_CONSUMED: &str = "auth.reset.consumed";
