//! Domain models returned by the API.
//!
//! Every model serializes to the camelCase JSON shape the dashboard and
//! storefront consume. Database mapping is via `sqlx::FromRow`; column
//! names follow the snake_case fields.

pub mod billboard;
pub mod category;
pub mod color;
pub mod order;
pub mod product;
pub mod size;
pub mod store;

pub use billboard::Billboard;
pub use category::Category;
pub use color::Color;
pub use order::{Order, OrderItem, OrderWithItems};
pub use product::{Product, ProductDetail, ProductImage};
pub use size::Size;
pub use store::Store;
