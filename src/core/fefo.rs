//! FEFO candidate selection: given a scanned or typed code, pick the lot
//! with the nearest expiry among in-stock lots of the matching product.

use crate::models::lot::Lot;
use crate::utils::date::fmt_date;
use crate::utils::normalize;

/// Preview shown while typing on the movement screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FefoPreview {
    pub produit: String,
    pub entree: String,
    pub peremption: String,
}

impl FefoPreview {
    /// Placeholder preview when no lot matches the typed code.
    pub fn not_found() -> Self {
        Self {
            produit: "Non trouvé".to_string(),
            entree: "-".to_string(),
            peremption: "-".to_string(),
        }
    }
}

/// Select the FEFO candidate for a typed code.
///
/// Candidates are lots with quantite > 0 whose barcode or reference equals
/// the normalized code (case-insensitive). Among them the minimum date_fin
/// wins; ties on equal expiry keep the first candidate in original order
/// (strict `<` below never replaces an equal best).
pub fn pick<'a>(lots: &'a [Lot], code: &str) -> Option<&'a Lot> {
    let code = normalize(code);
    if code.is_empty() {
        return None;
    }

    let mut best: Option<&Lot> = None;
    for lot in lots {
        if lot.quantite == 0 {
            continue;
        }
        if normalize(&lot.barcode) != code && normalize(&lot.reference) != code {
            continue;
        }
        match best {
            Some(b) if lot.date_fin >= b.date_fin => {}
            _ => best = Some(lot),
        }
    }
    best
}

/// Build the live preview for a typed code.
pub fn preview(lots: &[Lot], code: &str) -> FefoPreview {
    match pick(lots, code) {
        None => FefoPreview::not_found(),
        Some(lot) => FefoPreview {
            produit: lot.display_name().to_string(),
            entree: fmt_date(lot.date_entree),
            peremption: fmt_date(lot.date_fin),
        },
    }
}
