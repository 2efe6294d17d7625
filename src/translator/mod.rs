pub mod interface;
pub mod marian;
pub mod factory;

pub use interface::{TranslatorInterface, TranslateRequest, TranslateResponse};
pub use marian::MarianTranslator;
pub use factory::TranslatorFactory;
