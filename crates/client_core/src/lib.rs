//! Client side of the résumé review flow: the transport client for the analysis
//! backend, the interaction state machine driven by the UIs, and client settings.

pub mod error;
pub mod session;
pub mod settings;
pub mod transport;
pub mod types;

pub use error::{AnalysisError, ClientSetupError};
pub use session::{ReviewSession, SubmissionState, SubmitRejection};
pub use settings::{load_settings, ClientSettings};
pub use shared::domain::{AnalysisResult, HealthStatus};
pub use transport::{ReviewBackend, ReviewClient};
pub use types::{FileCandidate, FileContent, SelectedFile};
