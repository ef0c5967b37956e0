use std::time::Duration;

use serde::Deserialize;

/// HTTP client for the remote product catalog.
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    url: String,
}

#[derive(Debug)]
pub enum CatalogError {
    /// HTTP client could not be constructed
    Client(String),
    /// Network error (DNS, connect, timeout)
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// JSON parsing error
    Parse(String),
    /// Catalog answered with no products
    Empty,
    /// Enriched file could not be read or written
    File(salesgrid_io::IoError),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Client(msg) => write!(f, "HTTP client error: {}", msg),
            CatalogError::Network(msg) => write!(f, "Network error: {}", msg),
            CatalogError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            CatalogError::Parse(msg) => write!(f, "Parse error: {}", msg),
            CatalogError::Empty => write!(f, "Catalog returned no products"),
            CatalogError::File(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<salesgrid_io::IoError> for CatalogError {
    fn from(err: salesgrid_io::IoError) -> Self {
        CatalogError::File(err)
    }
}

/// One catalog product. Only `id` is required; the rest default when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogProduct {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProductPage {
    #[serde(default)]
    products: Vec<CatalogProduct>,
}

impl CatalogClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("salesgrid/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the catalog and return its `products` array.
    pub fn fetch_all_products(&self) -> Result<Vec<CatalogProduct>, CatalogError> {
        log::info!("fetching catalog from {}", self.url);
        let response = self
            .http
            .get(&self.url)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CatalogError::Http(status, body));
        }

        let page: ProductPage = response
            .json()
            .map_err(|e| CatalogError::Parse(e.to_string()))?;
        log::info!("catalog returned {} products", page.products.len());
        Ok(page.products)
    }
}
