mod form;
mod runtime;

pub use form::{FormField, FormState};
pub use runtime::{Notice, NoticeLevel, Phase, State};
