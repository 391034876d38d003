//! Running loan state for a single amortization pass

/// Outstanding balance as the simulation steps through the years
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Years simulated so far while the loan was outstanding
    pub year: usize,

    /// Balance carried into the current year
    pub balance: f64,

    /// Interest added over all simulated years
    pub interest_accrued: f64,
}

impl LoanState {
    pub fn new(principal: f64) -> Self {
        Self {
            year: 0,
            balance: principal,
            interest_accrued: 0.0,
        }
    }

    /// A loan with nothing outstanding never reactivates
    pub fn is_settled(&self) -> bool {
        self.balance <= 0.0
    }

    /// Add a full year of interest on the pre-payment balance
    pub fn accrue_interest(&mut self, annual_interest_rate: f64) {
        let interest = self.balance * annual_interest_rate / 100.0;
        self.interest_accrued += interest;
        self.balance += interest;
    }

    /// Apply the year-end payment, capped at what is owed. Returns the amount paid.
    pub fn apply_payment(&mut self, due: f64) -> f64 {
        let payment = due.min(self.balance);
        self.balance -= payment;
        payment
    }

    pub fn advance_year(&mut self) {
        self.year += 1;
    }
}
