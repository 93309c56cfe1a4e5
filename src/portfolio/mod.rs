pub mod aggregate;
pub mod allocator;
pub mod session;
pub mod tracker;
pub mod valuation;
pub mod weights;
