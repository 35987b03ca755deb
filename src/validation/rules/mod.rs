pub(crate) mod aggregation;
pub(crate) mod balance;
