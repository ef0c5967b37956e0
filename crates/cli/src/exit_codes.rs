//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                                   |
//! |---------|------------------|-----------------------------------------------|
//! | 0       | Universal        | Success                                       |
//! | 1       | Universal        | General error (unspecified)                   |
//! | 2       | Universal        | CLI usage error (bad args, invalid config)    |
//! | 3-9     | data             | File access, parse failures, empty input      |
//! | 50-59   | catalog          | Product catalog fetch                         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use salesgrid_catalog::CatalogError;
use salesgrid_io::IoError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid settings file.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Data (3-9)
// =============================================================================

/// Input file missing, unreadable, or output not writable.
pub const EXIT_IO: u8 = 3;

/// Delimited file could not be decoded.
pub const EXIT_PARSE: u8 = 4;

/// No transactions left to analyze or report on.
pub const EXIT_NO_DATA: u8 = 5;

// =============================================================================
// Catalog (50-59)
// =============================================================================

/// Catalog unreachable (DNS, connect, timeout) or client setup failed.
pub const EXIT_CATALOG_NETWORK: u8 = 50;

/// Catalog answered with a non-success HTTP status.
pub const EXIT_CATALOG_HTTP: u8 = 51;

/// Catalog response was not the expected JSON.
pub const EXIT_CATALOG_PARSE: u8 = 52;

/// Catalog returned an empty product list.
pub const EXIT_CATALOG_EMPTY: u8 = 53;

// =============================================================================
// Error mapping
// =============================================================================

pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::NotFound(_) | IoError::Read { .. } | IoError::Write { .. } => EXIT_IO,
        IoError::Csv(_) => EXIT_PARSE,
    }
}

pub fn catalog_exit_code(err: &CatalogError) -> u8 {
    match err {
        CatalogError::Client(_) | CatalogError::Network(_) => EXIT_CATALOG_NETWORK,
        CatalogError::Http(..) => EXIT_CATALOG_HTTP,
        CatalogError::Parse(_) => EXIT_CATALOG_PARSE,
        CatalogError::Empty => EXIT_CATALOG_EMPTY,
        CatalogError::File(io) => io_exit_code(io),
    }
}
