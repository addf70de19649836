mod bulk_price_change;
mod product;
mod tax_policy;

pub use bulk_price_change::BulkPriceChangeRequest;
pub use product::Product;
pub use tax_policy::TaxPolicy;
