pub mod address_search_input;
pub mod address_search_state;
pub mod error;
pub mod loading;

pub use address_search_input::AddressSearchInput;
pub use address_search_state::FieldChange;
