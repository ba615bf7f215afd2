use chrono::{Local, NaiveDate};

/// A tracked batch of a product with its own quantity, entry date and
/// expiry date. Lots are always read back in FEFO order (date_fin ASC).
#[derive(Debug, Clone)]
pub struct Lot {
    pub id: i64,
    pub produit_id: i64,
    pub quantite: u32,            // ⇔ lots.quantite (INT >= 0)
    pub date_entree: NaiveDate,   // ⇔ lots.date_entree (TEXT "YYYY-MM-DD")
    pub date_fin: NaiveDate,      // ⇔ lots.date_fin (TEXT "YYYY-MM-DD")
    pub created_at: String,       // ⇔ lots.created_at (TEXT, ISO8601)

    // Joined product columns, needed by every listing.
    pub reference: String,
    pub barcode: String,
    pub produit_nom: Option<String>,
    pub nbr_days_alert: u32,
}

impl Lot {
    pub fn new(produit_id: i64, quantite: u32, date_entree: NaiveDate, date_fin: NaiveDate) -> Self {
        Self {
            id: 0,
            produit_id,
            quantite,
            date_entree,
            date_fin,
            created_at: Local::now().to_rfc3339(),
            reference: String::new(),
            barcode: String::new(),
            produit_nom: None,
            nbr_days_alert: 0,
        }
    }

    pub fn entree_str(&self) -> String {
        self.date_entree.format("%Y-%m-%d").to_string()
    }

    pub fn fin_str(&self) -> String {
        self.date_fin.format("%Y-%m-%d").to_string()
    }

    pub fn display_name(&self) -> &str {
        self.produit_nom
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("-")
    }
}
