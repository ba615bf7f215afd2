/// Expiry / stock status of a lot or product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Ok,     // no alert
    Near,   // threshold reached
    Danger, // expired / out of stock
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Ok => "ok",
            AlertLevel::Near => "near",
            AlertLevel::Danger => "danger",
        }
    }

    fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "ok" => Some(AlertLevel::Ok),
            "near" => Some(AlertLevel::Near),
            "danger" => Some(AlertLevel::Danger),
            _ => None,
        }
    }

    /// Helper: convert input from CLI (any case, trimmed)
    pub fn from_code(code: &str) -> Option<Self> {
        AlertLevel::from_db_str(&code.trim().to_lowercase())
    }

    pub fn is_danger(&self) -> bool {
        matches!(self, AlertLevel::Danger)
    }
}
