//! Present-value comparison of repayment-rate policies

mod comparator;
mod discount;

pub use comparator::{
    compare_policies, compare_policies_with_threshold, ComparisonResult, Rationale, Recommendation,
};
pub use discount::DiscountCurve;
