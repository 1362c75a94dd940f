pub mod items;
pub mod payments;
pub mod products;
pub mod sales;
