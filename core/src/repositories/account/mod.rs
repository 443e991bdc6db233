pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod activation_store;

pub use activation_store::ActivationCodeStore;
pub use r#trait::AccountRepository;
