//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid barcode: {0}")]
    InvalidBarcode(String),

    #[error("Invalid alert level: {0}")]
    InvalidAlertLevel(String),

    #[error("Invalid product map: {0}")]
    InvalidProductMap(#[from] serde_json::Error),

    // ---------------------------
    // Domain errors
    // ---------------------------
    #[error("Famille introuvable: {0}")]
    FamilyNotFound(String),

    #[error("Produit introuvable: {0}")]
    ProductNotFound(String),

    #[error("Référence déjà utilisée: {0}")]
    DuplicateReference(String),

    #[error("Code-barres déjà utilisé: {0}")]
    DuplicateBarcode(String),

    #[error(
        "Produit non disponible (quantité insuffisante): demandé {requested}, disponible {available}"
    )]
    InsufficientStock { requested: u32, available: u32 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
