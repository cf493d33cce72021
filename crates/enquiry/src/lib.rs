mod enquiry;
mod validate;

pub use enquiry::{Enquiry, EnquiryInput, FormKind, DEFAULT_MODAL_MESSAGE};
pub use validate::{check_field, validate_input, FieldErrors};
