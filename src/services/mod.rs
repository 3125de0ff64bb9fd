pub mod detail_sessions;

pub use detail_sessions::{DetailSessions, RequestTicket};
