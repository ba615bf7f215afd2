//! Stock-out planning: FEFO withdrawal across a product's lots.

use crate::errors::{AppError, AppResult};
use crate::models::lot::Lot;

/// One deduction step of a withdrawal plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    pub lot_id: i64,
    pub taken: u32,
    pub remaining: u32,
}

/// Plan a FEFO withdrawal of `requested` units.
///
/// `lots` must already be the eligible set in FEFO order: quantite > 0 and
/// not expired. The plan is all-or-nothing: when the total available stock
/// is below the request, no deduction happens at all.
pub fn plan_withdrawal(lots: &[Lot], requested: u32) -> AppResult<Vec<Deduction>> {
    if requested == 0 {
        return Ok(Vec::new());
    }

    let available: u32 = lots.iter().map(|l| l.quantite).sum();
    if available < requested {
        return Err(AppError::InsufficientStock {
            requested,
            available,
        });
    }

    let mut plan = Vec::new();
    let mut reste = requested;
    for lot in lots {
        if reste == 0 {
            break;
        }
        let taken = lot.quantite.min(reste);
        plan.push(Deduction {
            lot_id: lot.id,
            taken,
            remaining: lot.quantite - taken,
        });
        reste -= taken;
    }

    Ok(plan)
}
