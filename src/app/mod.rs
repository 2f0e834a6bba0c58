// Application layer - Use case interactors

pub mod compare_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod retry;
pub mod validate_interactor;

// Re-export interactors
pub use compare_interactor::{CompareInteractor, CompareRequest, CompareResponse};
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{InspectInteractor, InspectRequest, InspectResponse};
pub use validate_interactor::{FrameSource, ValidateInteractor, ValidateRequest, ValidateResponse};
