//! Flat-fee add-on services.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::config::SpecialServiceFee;
use super::error::PricingError;
use super::models::AppliedService;

/// Resolve each service id against the fee table and sum the fees.
///
/// Unknown ids fail the whole lookup. Repeated ids are charged each time.
pub fn price_special_services(
    ids: &[String],
    fee_table: &BTreeMap<String, SpecialServiceFee>,
) -> Result<(Vec<AppliedService>, Decimal), PricingError> {
    let applied = ids
        .iter()
        .map(|id| {
            fee_table
                .get(id)
                .map(|service| AppliedService {
                    id: id.clone(),
                    description: service.description.clone(),
                    fee: service.fee,
                })
                .ok_or_else(|| PricingError::UnknownSpecialService { id: id.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = applied.iter().map(|service| service.fee).sum();
    Ok((applied, total))
}
