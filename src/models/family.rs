/// Product family. The fallback family "-" always exists and collects
/// products whose own family was deleted.
pub const FALLBACK_FAMILY: &str = "-";

#[derive(Debug, Clone)]
pub struct Family {
    pub id: i64,
    pub nom: String, // ⇔ familles.nom (TEXT UNIQUE)
}

impl Family {
    pub fn is_fallback(&self) -> bool {
        self.nom == FALLBACK_FAMILY
    }
}
