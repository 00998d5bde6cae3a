/// Decimal precision for display of monetary values
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Date format used for keys of date-indexed history envelopes
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Settings key under which the engine settings blob is stored
pub const ENGINE_SETTINGS_KEY: &str = "engine_settings";
