//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod user;

// Catalog
pub mod food;
pub mod menu;

// Floor
pub mod dining_table;

// Orders and billing
pub mod invoice;
pub mod order;
pub mod order_item;

// Re-exports
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use food::{Food, FoodCreate, FoodListResponse, FoodUpdate};
pub use invoice::{
    Invoice, InvoiceCreate, InvoiceUpdate, InvoiceView, OrderItemDetail, PaymentMethod,
    PaymentStatus,
};
pub use menu::{Menu, MenuCreate, MenuUpdate};
pub use order::{Order, OrderCreate, OrderUpdate};
pub use order_item::{OrderItem, OrderItemCreate, OrderItemPack, OrderItemUpdate};
pub use user::{
    LoginRequest, SignupRequest, User, UserListResponse, UserResponse, UserRole,
};
