pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{CaptureError, ConfigError, ScreenCheckError};
pub use events::{EventBus, SessionEvent};
pub use id::{new_id, SessionId};
pub use types::{
    DisplaySurface, EndReason, SessionError, SessionErrorKind, SessionSnapshot, SessionStatus,
    StreamMetadata,
};

pub type Result<T> = std::result::Result<T, ScreenCheckError>;
