pub mod items;
pub mod payment_methods;
pub mod products;
pub mod sale_items;
pub mod sales;

pub use items::Entity as Items;
pub use payment_methods::Entity as PaymentMethods;
pub use products::Entity as Products;
pub use sale_items::Entity as SaleItems;
pub use sales::Entity as Sales;
