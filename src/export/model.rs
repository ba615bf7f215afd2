use serde::Serialize;

/// Flat lot row for export: one line per lot, joined with its product.
#[derive(Serialize, Clone, Debug)]
pub struct LotExport {
    pub id: i64,
    pub produit: String,
    pub reference: String,
    pub barcode: String,
    pub famille: String,
    pub quantite: u32,
    pub date_entree: String,
    pub date_fin: String,
    pub niveau: String,
}
