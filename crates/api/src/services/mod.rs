//! Business logic sitting between routes and repositories.

pub mod checkout;

pub use checkout::CheckoutService;
