//! Effective annual cost of borrowing
//!
//! The rate at which the money actually repaid is worth exactly the principal
//! borrowed: the internal rate of return of the borrower's cash flows.

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Lowest and highest annual rates searched
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

/// Internal rate of return of annual cash flows, index 0 undiscounted
///
/// Newton-Raphson from a 5% guess, falling back to bisection when the
/// derivative vanishes or iteration fails to settle. Returns `None` when the
/// flows never change sign (no rate can zero the NPV).
pub fn internal_rate_of_return(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let mut rate = 0.05;
    for _ in 0..MAX_ITERATIONS {
        let (value, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            return bisect(cashflows);
        }

        let next = (rate - value / slope).clamp(RATE_FLOOR, RATE_CEILING);
        if (next - rate).abs() < TOLERANCE {
            return Some(next);
        }
        rate = next;
    }

    bisect(cashflows)
}

/// Effective annual rate paid on `principal` given the yearly repayments
///
/// The principal is received at time 0 and the repayment for year t lands at
/// the end of that year (time t + 1). Any balance left at the horizon is
/// written off and never paid.
pub fn effective_annual_rate(principal: f64, repayments: &[f64]) -> Option<f64> {
    let flows: Vec<f64> = std::iter::once(principal)
        .chain(repayments.iter().map(|&paid| -paid))
        .collect();
    internal_rate_of_return(&flows)
}

fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(value, slope), (t, &cf)| {
            let growth = (1.0 + rate).powi(t as i32);
            (
                value + cf / growth,
                slope - t as f64 * cf / (growth * (1.0 + rate)),
            )
        })
}

fn npv_at(cashflows: &[f64], rate: f64) -> f64 {
    npv_with_slope(cashflows, rate).0
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut value_low = npv_at(cashflows, low);

    if value_low * npv_at(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let value_mid = npv_at(cashflows, mid);

        if value_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if value_mid * value_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            value_low = value_mid;
        }
    }

    None
}
