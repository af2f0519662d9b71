pub mod controller;
pub mod transport;

pub use controller::{FormController, FormEvent, SubmitOutcome, UiState};
pub use transport::{
    form_endpoint, FormTransport, HttpFormTransport, TransportError, DEFAULT_REQUEST_TIMEOUT,
};
