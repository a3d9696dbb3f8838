use serde::{Deserialize, Serialize};

/// One consignment-shop listing after field coercion.
///
/// String fields are never absent: missing source values become `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub business_name: String,
    pub address: String,
    /// Trimmed city name.
    pub city: String,
    /// Trimmed full state name, never an abbreviation.
    pub state: String,
    pub review_count: u32,
    /// Website URL, `""` when unknown.
    pub site: String,
    pub phone: String,
    pub photo: String,
    pub seo_description: String,
    /// Store advertises an accessible pricing tier.
    pub pricing: bool,
    pub wide_selection: bool,
    pub sell_antiques: bool,
    pub sell_books: bool,
    pub clean_organized: bool,
    pub sell_clothes: bool,
    pub sell_furniture: bool,
    pub sell_jewelry: bool,
    pub sell_gift_items: bool,
    pub sell_premium_brand: bool,
    pub sell_merchandise: bool,
    pub friendly_employees: bool,
}

impl StoreRecord {
    /// Deduplication key: lowercased, trimmed name, address and city.
    ///
    /// Components are joined with NUL so that `("a-", "b")` and `("a", "-b")`
    /// stay distinct. A `-` join, as the legacy site data used, merges those
    /// two rows; such near-collisions now both survive.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{}\x00{}\x00{}",
            self.business_name.trim().to_lowercase(),
            self.address.trim().to_lowercase(),
            self.city.trim().to_lowercase(),
        )
    }

    /// Composite `"City, State"` key used by the per-city index.
    #[must_use]
    pub fn city_key(&self) -> String {
        city_key(&self.city, &self.state)
    }

    #[must_use]
    pub fn has_website(&self) -> bool {
        !self.site.is_empty()
    }

    #[must_use]
    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }

    /// Sellable categories this store carries, in [`Category::ALL`] order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| c.offered_by(self))
            .collect()
    }
}

/// Build the `"City, State"` composite key from already-trimmed names.
#[must_use]
pub fn city_key(city: &str, state: &str) -> String {
    format!("{}, {}", city.trim(), state.trim())
}

/// A sellable merchandise category, each backed by one boolean flag on
/// [`StoreRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Clothing,
    Furniture,
    Jewelry,
    Antiques,
    Books,
    GiftItems,
    PremiumBrand,
    Merchandise,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Clothing,
        Category::Furniture,
        Category::Jewelry,
        Category::Antiques,
        Category::Books,
        Category::GiftItems,
        Category::PremiumBrand,
        Category::Merchandise,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Clothing => "clothing",
            Category::Furniture => "furniture",
            Category::Jewelry => "jewelry",
            Category::Antiques => "antiques",
            Category::Books => "books",
            Category::GiftItems => "gift-items",
            Category::PremiumBrand => "premium-brand",
            Category::Merchandise => "merchandise",
        }
    }

    /// Human-readable product name, as used in offers and filter labels.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Furniture => "Furniture",
            Category::Jewelry => "Jewelry",
            Category::Antiques => "Antiques",
            Category::Books => "Books",
            Category::GiftItems => "Gift Items",
            Category::PremiumBrand => "Premium Brands",
            Category::Merchandise => "General Merchandise",
        }
    }

    #[must_use]
    pub fn offered_by(self, store: &StoreRecord) -> bool {
        match self {
            Category::Clothing => store.sell_clothes,
            Category::Furniture => store.sell_furniture,
            Category::Jewelry => store.sell_jewelry,
            Category::Antiques => store.sell_antiques,
            Category::Books => store.sell_books,
            Category::GiftItems => store.sell_gift_items,
            Category::PremiumBrand => store.sell_premium_brand,
            Category::Merchandise => store.sell_merchandise,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    /// Accepts the kebab-case form and the legacy camelCase filter values
    /// (`giftItems`, `premiumBrand`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], "");
        match normalized.as_str() {
            "clothing" | "clothes" => Ok(Category::Clothing),
            "furniture" => Ok(Category::Furniture),
            "jewelry" => Ok(Category::Jewelry),
            "antiques" => Ok(Category::Antiques),
            "books" => Ok(Category::Books),
            "giftitems" => Ok(Category::GiftItems),
            "premiumbrand" | "premiumbrands" => Ok(Category::PremiumBrand),
            "merchandise" => Ok(Category::Merchandise),
            _ => Err(format!("unknown category '{s}'")),
        }
    }
}
