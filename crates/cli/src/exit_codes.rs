//! CLI Exit Code Registry
//!
//! Single source of truth for exit codes. Exit codes are part of the shell
//! contract — receiving scripts and CI gates rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success, report clean (every line matched)           |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad arguments)                          |
//! | 3    | Variances found (mismatch / missing / extra /        |
//! |      | unidentified lines, or excluded anomaly records)     |
//! | 4    | Invalid reconciliation config                        |
//! | 5    | Runtime failure (unreadable file, bad extraction     |
//! |      | JSON, unwritable output)                             |

/// Success - reconciliation ran and every line matched.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// The run completed but the report contains variances or anomalies.
pub const EXIT_VARIANCE: u8 = 3;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// Runtime failure: unreadable input, malformed extraction JSON,
/// unwritable output.
pub const EXIT_RUNTIME: u8 = 5;
