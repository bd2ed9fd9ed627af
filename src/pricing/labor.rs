//! Labor estimation.
//!
//! Hours for each task scale linearly with the job size relative to the
//! configured reference size. Fitting and finishing apply to every order.

use rust_decimal::Decimal;

use super::config::LaborConfig;
use super::models::LaborHours;

pub fn estimate_labor(
    has_frame: bool,
    has_mat: bool,
    has_glass: bool,
    united_inches: Decimal,
    config: &LaborConfig,
) -> LaborHours {
    let scale = united_inches / config.reference_size;
    let task = |present: bool, hours: Decimal| {
        if present {
            hours * scale
        } else {
            Decimal::ZERO
        }
    };
    let hours = &config.task_hours;

    LaborHours {
        frame_assembly: task(has_frame, hours.frame_assembly),
        mat_cutting: task(has_mat, hours.mat_cutting),
        glass_cutting: task(has_glass, hours.glass_cutting),
        fitting: task(true, hours.fitting),
        finishing: task(true, hours.finishing),
    }
}

pub fn labor_cost(hours: &LaborHours, base_rate: Decimal, regional_factor: Decimal) -> Decimal {
    hours.total() * base_rate * regional_factor
}
