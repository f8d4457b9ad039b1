mod session;

pub use session::Session;
pub use session::SessionId;
pub use session::SessionStore;
