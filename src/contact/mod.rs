pub mod form;
pub mod notice;
pub mod pipeline;
pub mod relay;
pub mod validate;

pub use form::{ContactForm, Field, apply};
pub use notice::{NoticeState, SUCCESS_NOTICE_DURATION, SuccessNotice};
pub use pipeline::{ContactPipeline, SubmitOutcome, SubmitPhase};
pub use relay::RelayClient;
pub use validate::{ValidationErrors, validate};
