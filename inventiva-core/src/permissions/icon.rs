//! Icon identifiers carried by modules, page types and pages.
//!
//! The database stores kebab-case icon names. Instead of a runtime lookup over
//! an open-ended name table, the set is a closed enum with an explicit
//! fallback: unknown or absent names render as [`Icon::FileText`].

use serde::{Deserialize, Serialize};

/// Closed set of icon identifiers used by the Inventiva navigation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    // Fallbacks
    FileText,
    Folder,

    // Modules
    ShoppingCart,
    ShoppingBag,
    Package,
    DollarSign,
    CreditCard,
    Calculator,
    BarChart,
    TrendingUp,
    NotepadText,
    BookDown,
    ChevronsUp,
    WalletCards,

    // Documents
    File,
    FileSpreadsheet,
    Receipt,
    ClipboardList,
    ScrollText,

    // Navigation
    Home,
    Settings,
    LayoutDashboard,
    List,
    Table,

    // Users and permissions
    User,
    Users,
    Shield,
    Lock,
    Key,

    // Inventory
    Boxes,
    Box,
    Warehouse,
    Truck,

    // Finance
    Banknote,
    Wallet,
    Building,
    Landmark,
    Coins,

    // Misc
    Calendar,
    Clock,
    Tag,
    Database,
    Store,
    Briefcase,
}

impl Icon {
    /// Resolve a stored icon name. Unknown or absent names fall back to
    /// [`Icon::FileText`] so navigation never breaks on new data.
    pub fn parse(name: Option<&str>) -> Icon {
        let Some(name) = name else { return Icon::FileText };

        match name {
            "file-text" => Icon::FileText,
            "folder" => Icon::Folder,
            "shopping-cart" => Icon::ShoppingCart,
            "shopping-bag" => Icon::ShoppingBag,
            "package" => Icon::Package,
            "dollar-sign" => Icon::DollarSign,
            "credit-card" => Icon::CreditCard,
            "calculator" => Icon::Calculator,
            "bar-chart-2" | "bar-chart-3" => Icon::BarChart,
            "trending-up" => Icon::TrendingUp,
            "notepad-text" => Icon::NotepadText,
            "book-down" => Icon::BookDown,
            "chevrons-up" => Icon::ChevronsUp,
            "wallet-cards" => Icon::WalletCards,
            "file" => Icon::File,
            "file-spreadsheet" => Icon::FileSpreadsheet,
            "receipt" => Icon::Receipt,
            "clipboard-list" => Icon::ClipboardList,
            "scroll-text" => Icon::ScrollText,
            "home" => Icon::Home,
            "settings" => Icon::Settings,
            "layout-dashboard" => Icon::LayoutDashboard,
            "list" => Icon::List,
            "table" => Icon::Table,
            "user" => Icon::User,
            "users" => Icon::Users,
            "shield" => Icon::Shield,
            "lock" => Icon::Lock,
            "key" => Icon::Key,
            "boxes" => Icon::Boxes,
            "box" => Icon::Box,
            "warehouse" => Icon::Warehouse,
            "truck" => Icon::Truck,
            "banknote" => Icon::Banknote,
            "wallet" => Icon::Wallet,
            "building" | "building-2" => Icon::Building,
            "landmark" => Icon::Landmark,
            "coins" => Icon::Coins,
            "calendar" => Icon::Calendar,
            "clock" => Icon::Clock,
            "tag" => Icon::Tag,
            "database" => Icon::Database,
            "store" => Icon::Store,
            "briefcase" => Icon::Briefcase,
            _ => Icon::FileText,
        }
    }

    /// Canonical kebab-case name (what a selector in the admin UI would list).
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::FileText => "file-text",
            Icon::Folder => "folder",
            Icon::ShoppingCart => "shopping-cart",
            Icon::ShoppingBag => "shopping-bag",
            Icon::Package => "package",
            Icon::DollarSign => "dollar-sign",
            Icon::CreditCard => "credit-card",
            Icon::Calculator => "calculator",
            Icon::BarChart => "bar-chart-3",
            Icon::TrendingUp => "trending-up",
            Icon::NotepadText => "notepad-text",
            Icon::BookDown => "book-down",
            Icon::ChevronsUp => "chevrons-up",
            Icon::WalletCards => "wallet-cards",
            Icon::File => "file",
            Icon::FileSpreadsheet => "file-spreadsheet",
            Icon::Receipt => "receipt",
            Icon::ClipboardList => "clipboard-list",
            Icon::ScrollText => "scroll-text",
            Icon::Home => "home",
            Icon::Settings => "settings",
            Icon::LayoutDashboard => "layout-dashboard",
            Icon::List => "list",
            Icon::Table => "table",
            Icon::User => "user",
            Icon::Users => "users",
            Icon::Shield => "shield",
            Icon::Lock => "lock",
            Icon::Key => "key",
            Icon::Boxes => "boxes",
            Icon::Box => "box",
            Icon::Warehouse => "warehouse",
            Icon::Truck => "truck",
            Icon::Banknote => "banknote",
            Icon::Wallet => "wallet",
            Icon::Building => "building-2",
            Icon::Landmark => "landmark",
            Icon::Coins => "coins",
            Icon::Calendar => "calendar",
            Icon::Clock => "clock",
            Icon::Tag => "tag",
            Icon::Database => "database",
            Icon::Store => "store",
            Icon::Briefcase => "briefcase",
        }
    }

    /// Plain-text rendering handle, used by terminal renderers (demo, logs).
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::FileText | Icon::File | Icon::FileSpreadsheet | Icon::ScrollText => "▤",
            Icon::Folder => "▸",
            Icon::ShoppingCart | Icon::ShoppingBag | Icon::Store => "⊞",
            Icon::Package | Icon::Box | Icon::Boxes | Icon::Warehouse | Icon::Truck => "▣",
            Icon::DollarSign | Icon::Banknote | Icon::Coins | Icon::Landmark => "$",
            Icon::CreditCard | Icon::Wallet | Icon::WalletCards => "≡",
            Icon::Calculator | Icon::BarChart | Icon::TrendingUp | Icon::Table => "▥",
            Icon::NotepadText | Icon::ClipboardList | Icon::List | Icon::Receipt => "≣",
            Icon::BookDown | Icon::ChevronsUp => "↕",
            Icon::Home | Icon::Building | Icon::LayoutDashboard => "⌂",
            Icon::Settings | Icon::Key => "⚙",
            Icon::User | Icon::Users | Icon::Briefcase => "●",
            Icon::Shield | Icon::Lock => "▲",
            Icon::Calendar | Icon::Clock => "◷",
            Icon::Tag | Icon::Database => "◆",
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Icon::FileText
    }
}
