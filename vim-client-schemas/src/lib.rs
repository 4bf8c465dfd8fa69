pub mod cli_models;
pub mod vim_models;

/// Header carrying the session key on every authenticated request.
pub const SESSION_HEADER: &str = "vmware-api-session-id";
