//! Stock and expiry status computation, plus the alert listing logic.
//!
//! Pure functions over products and their lots: the CLI assembles
//! ProductWithLots values from the database and renders what comes back.

use crate::models::alert_level::AlertLevel;
use crate::models::lot::Lot;
use crate::models::product::Product;
use crate::utils::normalize;
use chrono::NaiveDate;

/// A product joined with its stock total and its lots in FEFO order.
#[derive(Debug, Clone)]
pub struct ProductWithLots {
    pub product: Product,
    pub stock_total: u32,
    pub lots: Vec<Lot>,
}

impl ProductWithLots {
    /// Next lot to leave the shelf: first in-stock lot in FEFO order.
    pub fn next_lot(&self) -> Option<&Lot> {
        self.lots.iter().find(|l| l.quantite > 0)
    }
}

/// Stock status of a product.
pub fn stock_status(stock_total: u32, qnt_alert: u32) -> (AlertLevel, String) {
    if stock_total == 0 {
        (AlertLevel::Danger, "Rupture de stock".to_string())
    } else if stock_total <= qnt_alert {
        (AlertLevel::Near, "Seuil de stock atteint".to_string())
    } else {
        (AlertLevel::Ok, "Stock normal".to_string())
    }
}

/// Expiry status of a single lot, as shown on the lot listing.
pub fn lot_expiry_status(days_left: i64, alert_days: u32) -> (AlertLevel, String) {
    if days_left < 0 {
        (AlertLevel::Danger, "Expiré".to_string())
    } else if days_left == 0 {
        (AlertLevel::Danger, "Il expire aujourd'hui".to_string())
    } else if days_left <= alert_days as i64 {
        (AlertLevel::Near, format!("Il reste {} jour(s)", days_left))
    } else {
        (AlertLevel::Ok, format!("Il reste {} jour(s)", days_left))
    }
}

/// Expiry status of a product, driven by its next FEFO lot. A product with
/// no stock has no meaningful expiry status.
pub fn product_expiry_status(
    stock_total: u32,
    next_expiry: Option<NaiveDate>,
    alert_days: u32,
    today: NaiveDate,
) -> (AlertLevel, String) {
    if stock_total == 0 {
        return (AlertLevel::Ok, "Pas de stock".to_string());
    }

    let Some(expiry) = next_expiry else {
        return (AlertLevel::Ok, "Aucune date de péremption".to_string());
    };

    let days_left = (expiry - today).num_days();
    if days_left < 0 {
        (AlertLevel::Danger, "Produit expiré".to_string())
    } else if days_left == 0 {
        (AlertLevel::Danger, "Expire aujourd'hui".to_string())
    } else if days_left <= alert_days as i64 {
        (AlertLevel::Near, format!("Expire dans {} jour(s)", days_left))
    } else {
        (AlertLevel::Ok, format!("Expire dans {} jour(s)", days_left))
    }
}

/// Which alerts to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    All,
    Stock,
    Expiry,
}

impl AlertKind {
    pub fn from_code(s: &str) -> Self {
        match normalize(s).as_str() {
            "stock" => AlertKind::Stock,
            "expiry" => AlertKind::Expiry,
            _ => AlertKind::All,
        }
    }

    fn wants_stock(&self) -> bool {
        matches!(self, AlertKind::All | AlertKind::Stock)
    }

    fn wants_expiry(&self) -> bool {
        matches!(self, AlertKind::All | AlertKind::Expiry)
    }
}

/// One row of the alerts listing, stock or expiry.
#[derive(Debug, Clone)]
pub struct AlertRow {
    pub type_label: &'static str,
    pub status_label: String,
    pub level: AlertLevel,
    pub lot_id: Option<i64>,
    pub produit_nom: String,
    pub reference: String,
    pub barcode: String,
    pub famille: String,
    pub stock_total: u32,
    pub lot_quantite: Option<u32>,
    pub date_entree: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    pub days_left: Option<i64>,
    pub min_qte: u32,
    pub min_jour: u32,
}

/// Build the critical and warning alert lists.
///
/// `query` is a case-insensitive substring over nom/reference/barcode,
/// `famille` an exact family-name filter; both empty strings disable the
/// filter.
pub fn build_alerts(
    products: &[ProductWithLots],
    kind: AlertKind,
    query: &str,
    famille: &str,
    today: NaiveDate,
) -> (Vec<AlertRow>, Vec<AlertRow>) {
    let query = normalize(query);
    let famille = normalize(famille);

    let mut critical = Vec::new();
    let mut warnings = Vec::new();

    for pw in products {
        let p = &pw.product;

        if !query.is_empty() {
            let nom = normalize(p.display_name());
            let reference = normalize(&p.reference);
            let barcode = normalize(&p.barcode);
            if !nom.contains(&query) && !reference.contains(&query) && !barcode.contains(&query) {
                continue;
            }
        }

        if !famille.is_empty() && normalize(&p.famille) != famille {
            continue;
        }

        if kind.wants_stock() {
            let (level, label) = stock_status(pw.stock_total, p.nbr_qnt_alert);
            if level != AlertLevel::Ok {
                let next = pw.next_lot();
                let row = AlertRow {
                    type_label: "Alerte stock",
                    status_label: label,
                    level,
                    lot_id: None,
                    produit_nom: p.display_name().to_string(),
                    reference: p.reference.clone(),
                    barcode: p.barcode.clone(),
                    famille: p.famille.clone(),
                    stock_total: pw.stock_total,
                    lot_quantite: next.map(|l| l.quantite),
                    date_entree: next.map(|l| l.date_entree),
                    date_fin: next.map(|l| l.date_fin),
                    days_left: next.map(|l| (l.date_fin - today).num_days()),
                    min_qte: p.nbr_qnt_alert,
                    min_jour: p.nbr_days_alert,
                };
                if level.is_danger() {
                    critical.push(row);
                } else {
                    warnings.push(row);
                }
            }
        }

        if kind.wants_expiry() && pw.stock_total > 0 {
            for lot in pw.lots.iter().filter(|l| l.quantite > 0) {
                let days_left = (lot.date_fin - today).num_days();

                let (level, label) = if days_left < 0 {
                    (AlertLevel::Danger, "Expiré")
                } else if days_left == 0 {
                    (AlertLevel::Danger, "Expire aujourd'hui")
                } else if days_left <= p.nbr_days_alert as i64 {
                    (AlertLevel::Near, "Proche expiration")
                } else {
                    continue;
                };

                let row = AlertRow {
                    type_label: "Alerte expiration",
                    status_label: label.to_string(),
                    level,
                    lot_id: Some(lot.id),
                    produit_nom: p.display_name().to_string(),
                    reference: p.reference.clone(),
                    barcode: p.barcode.clone(),
                    famille: p.famille.clone(),
                    stock_total: pw.stock_total,
                    lot_quantite: Some(lot.quantite),
                    date_entree: Some(lot.date_entree),
                    date_fin: Some(lot.date_fin),
                    days_left: Some(days_left),
                    min_qte: p.nbr_qnt_alert,
                    min_jour: p.nbr_days_alert,
                };
                if level.is_danger() {
                    critical.push(row);
                } else {
                    warnings.push(row);
                }
            }
        }
    }

    (critical, warnings)
}

/// Sort an alert list by one of the discrete keys: "name", "barcode",
/// "date" (expiry, missing dates last), "days" (days left, missing last).
/// Any other key keeps the original order.
pub fn sort_alerts(rows: &mut [AlertRow], key: &str) {
    match normalize(key).as_str() {
        "name" => rows.sort_by(|a, b| normalize(&a.produit_nom).cmp(&normalize(&b.produit_nom))),
        "barcode" => rows.sort_by(|a, b| normalize(&a.barcode).cmp(&normalize(&b.barcode))),
        "date" => rows.sort_by(|a, b| match (a.date_fin, b.date_fin) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        "days" => rows.sort_by(|a, b| match (a.days_left, b.days_left) {
            (Some(da), Some(db)) => da.cmp(&db),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        _ => {}
    }
}
