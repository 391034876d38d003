//! Income projection and gross-to-net conversion

mod bands;
mod projector;
mod tax;

pub use bands::{Band, BandSchedule};
pub use projector::{project_income, IncomeSeries};
pub use tax::{NetIncomeBreakdown, TaxSchedule};
