mod session;

pub use session::{FocusSession, SessionSpec};
