//! Client side of the contact form: local checks, one request to the relay,
//! and the status the page renders.

pub mod form;
pub mod status;

pub use form::ContactForm;
pub use status::{FormFields, FormPhase, FormStatus, SubmitOutcome};

pub const INCOMPLETE_FORM_MESSAGE: &str = "Veuillez remplir tous les champs du formulaire";
pub const SUBMIT_FAILED_MESSAGE: &str = "Une erreur s'est produite lors de l'envoi du formulaire";
pub const NETWORK_ERROR_MESSAGE: &str = "Une erreur inconnue s'est produite";
