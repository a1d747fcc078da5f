pub mod suggestions;
pub mod suggestion_service;

pub use suggestion_service::SuggestionService;
pub use suggestions::get_suggestions;
