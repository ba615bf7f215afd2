use chrono::NaiveDate;

/// A stock-out movement ("sortie"): a quantity withdrawn from a product's
/// lots in FEFO order.
#[derive(Debug, Clone)]
pub struct Movement {
    pub id: i64,
    pub produit_id: i64,
    pub reference: String, // joined produits.reference
    pub quantite: u32,
    pub date_sortie: NaiveDate,
}
