use chrono::Local;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub reference: String,    // ⇔ produits.reference (TEXT UNIQUE)
    pub nom: Option<String>,  // ⇔ produits.nom (TEXT, nullable)
    pub barcode: String,      // ⇔ produits.barcode (TEXT UNIQUE)
    pub famille_id: i64,      // ⇔ produits.famille_id
    pub famille: String,      // joined familles.nom
    pub nbr_days_alert: u32,  // days before expiry triggers an alert
    pub nbr_qnt_alert: u32,   // minimum stock threshold
    pub created_at: String,   // ⇔ produits.created_at (TEXT, ISO8601)
}

impl Product {
    /// High-level constructor for products created from the CLI.
    pub fn new(
        id: i64,
        reference: String,
        nom: Option<String>,
        barcode: String,
        famille_id: i64,
        famille: String,
        nbr_days_alert: u32,
        nbr_qnt_alert: u32,
    ) -> Self {
        Self {
            id,
            reference,
            nom,
            barcode,
            famille_id,
            famille,
            nbr_days_alert,
            nbr_qnt_alert,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Display name: falls back to "-" when the product has no name.
    pub fn display_name(&self) -> &str {
        self.nom.as_deref().filter(|n| !n.is_empty()).unwrap_or("-")
    }
}
