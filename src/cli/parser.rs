use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for lotkeeper
/// CLI application to track inventory lots (FEFO) with SQLite
#[derive(Parser)]
#[command(
    name = "lotkeeper",
    version = env!("CARGO_PKG_VERSION"),
    about = "An inventory and lot-tracking CLI: FEFO stock management with expiry alerts using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "toggle-panel",
            help = "Toggle the summary panel shown by 'lot list'"
        )]
        toggle_panel: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage product families
    Family {
        #[command(subcommand)]
        action: FamilyCmd,
    },

    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductCmd,
    },

    /// Manage lots
    Lot {
        #[command(subcommand)]
        action: LotCmd,
    },

    /// Withdraw stock (FEFO) or show the stock-out history
    Out {
        /// Product reference or barcode
        code: Option<String>,

        /// Quantity to withdraw
        #[arg(default_value = "1")]
        qty: u32,

        #[arg(long = "history", help = "Show recent stock-out movements")]
        history: bool,
    },

    /// Preview the FEFO pick for a scanned or typed code
    Fefo {
        /// Product reference or barcode
        code: String,
    },

    /// Resolve a code against the product map
    Lookup {
        /// Product reference or barcode
        code: String,

        /// Read the product map from a JSON file instead of the database
        #[arg(long = "map", value_name = "FILE")]
        map: Option<String>,
    },

    /// List stock and expiry alerts
    Alerts {
        #[arg(long = "query", short = 'q', help = "Substring over name/reference/barcode")]
        query: Option<String>,

        #[arg(long = "famille", help = "Filter by family name")]
        famille: Option<String>,

        #[arg(
            long = "kind",
            default_value = "all",
            help = "Alert kind: all, stock or expiry"
        )]
        kind: String,

        #[arg(long = "sort", help = "Sort key: name, barcode, date or days")]
        sort: Option<String>,
    },

    /// Show per-product status and alert counters
    Dashboard,

    /// Populate the database with demo data
    Seed {
        #[arg(long, default_value = "8", help = "Number of familles to create")]
        familles: u32,

        #[arg(long, default_value = "40", help = "Number of produits to create")]
        produits: u32,

        #[arg(long, default_value = "120", help = "Number of lots to create")]
        lots: u32,

        #[arg(long, default_value = "30", help = "Number of sorties to create")]
        sorts: u32,

        #[arg(long, help = "Delete existing data before seeding")]
        reset: bool,
    },

    /// Export lot data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum FamilyCmd {
    /// Add a family
    Add { nom: String },

    /// List families
    List,

    /// Delete a family (products move to the fallback family '-')
    Del {
        nom: String,

        #[arg(long = "with-products", help = "Also delete the family's products")]
        with_products: bool,
    },

    /// Rename a family
    Rename { nom: String, new_name: String },
}

#[derive(Subcommand)]
pub enum ProductCmd {
    /// Add a product
    Add {
        /// Unique reference
        reference: String,

        /// Unique barcode (8-14 digits)
        barcode: String,

        #[arg(long, help = "Display name")]
        nom: Option<String>,

        #[arg(long, help = "Family name (default: fallback family '-')")]
        famille: Option<String>,

        #[arg(long = "days-alert", help = "Days before expiry triggers an alert")]
        days_alert: Option<u32>,

        #[arg(long = "qnt-alert", help = "Minimum stock threshold")]
        qnt_alert: Option<u32>,
    },

    /// Edit an existing product (only the given fields change)
    Edit {
        /// Product reference or barcode
        code: String,

        #[arg(long, help = "New display name")]
        nom: Option<String>,

        #[arg(long, help = "New barcode (8-14 digits)")]
        barcode: Option<String>,

        #[arg(long, help = "New family name")]
        famille: Option<String>,

        #[arg(long = "days-alert", help = "Days before expiry triggers an alert")]
        days_alert: Option<u32>,

        #[arg(long = "qnt-alert", help = "Minimum stock threshold")]
        qnt_alert: Option<u32>,
    },

    /// List products with stock and expiry status
    List {
        #[arg(long, help = "Filter by family name (exact match)")]
        famille: Option<String>,

        #[arg(long, help = "Free-text search over the whole row")]
        search: Option<String>,

        #[arg(long, help = "Sort key: name or qty")]
        sort: Option<String>,
    },

    /// Delete a product by reference or barcode (its lots follow)
    Del { code: String },
}

#[derive(Subcommand)]
pub enum LotCmd {
    /// Add a lot for a product
    Add {
        /// Product reference or barcode
        code: String,

        /// Quantity in the lot
        quantite: u32,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long = "fin")]
        date_fin: String,

        /// Entry date (YYYY-MM-DD, default: today)
        #[arg(long = "entree")]
        date_entree: Option<String>,
    },

    /// Delete an expired lot by id
    Del {
        /// Lot id (see 'lot list')
        id: i64,
    },

    /// List lots in FEFO order
    List {
        #[arg(long, help = "Free-text search over the whole row")]
        search: Option<String>,

        #[arg(long, help = "Filter by alert level: ok, near or danger")]
        level: Option<String>,

        #[arg(long, help = "Sort key: name or qty")]
        sort: Option<String>,

        #[arg(long, help = "Show the summary panel for this run")]
        panel: bool,
    },
}
