//! Application constants for the datalogger parser
//!
//! This module contains default values, time formats and logger file layout
//! constants used throughout the parser.

// =============================================================================
// Time Formats
// =============================================================================

/// Canonical text form of a resolved timestamp on export
pub const CANONICAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// UTC offset suffix appended when exporting with time zone information
pub const UTC_OFFSET_FORMAT: &str = "%z";

/// Separator placed between time column values and between their formats
pub const TIME_PART_SEPARATOR: &str = " ";

/// Format of the combined hour/minute column written by array-based loggers
pub const HOUR_MINUTE_FORMAT: &str = "%H%M";

/// Width of a zero-padded hour/minute value
pub const HOUR_MINUTE_WIDTH: usize = 4;

/// Hour/minute value array-based loggers write for midnight at the end of a day
pub const END_OF_DAY_HOUR_MINUTE: &str = "2400";

/// Default zone for resolved timestamps
pub const DEFAULT_TIME_ZONE: &str = "UTC";

// =============================================================================
// Flat File Defaults
// =============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default extension for exported files
pub const DEFAULT_OUTPUT_EXTENSION: &str = "dat";

/// Leading-decimal rewrite applied when float fixing is enabled
///
/// Loggers drop the leading zero of values below one (`.5`, `-.5`).
pub const FLOAT_FIX_PATTERN: &str = r"^(-?)\.";
pub const FLOAT_FIX_REPLACEMENT: &str = "${1}0.";

// =============================================================================
// Logger Layouts
// =============================================================================

/// Array-based loggers (CR10X family)
pub mod cr10x {
    /// Discriminator (array id) column
    pub const ARRAY_ID_COLUMN: usize = 0;

    /// Year, day-of-year and hour/minute columns
    pub const TIME_COLUMNS: &[usize] = &[1, 2, 3];

    pub const TIME_FORMATS: &[&str] = &["%Y", "%j", "%H%M"];
}

/// Table-based loggers writing TOA5 files (CR1000 family)
pub mod cr1000 {
    /// Zero-based line holding the field names
    pub const HEADER_ROW: usize = 1;

    /// First data line (1-indexed); preceded by environment, names, units and
    /// processing lines
    pub const FIRST_DATA_LINE: usize = 5;

    pub const TIME_COLUMN: &str = "TIMESTAMP";

    pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

// =============================================================================
// Configuration
// =============================================================================

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "campbellsci-parser";

/// Default job configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Log target used by the tracing filter
pub const LOG_TARGET: &str = "campbellsci_parser";
