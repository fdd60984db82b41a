//! Default regular expressions for the format annotations
//!
//! The patterns are deliberately permissive: they reject values that are
//! clearly malformed and are written in the common subset understood by every
//! supported dialect's regex engine.

/// Phone numbers: digits with separators and an optional extension
pub const DEFAULT_PHONE_REGEX: &str = r"^[\d\s+-.()]*\d[\d\s+-.()]*((ext\.|ext|x)\s*\d+)?\s*$";

/// Credit card numbers: digits, dashes and spaces
pub const DEFAULT_CREDIT_CARD_REGEX: &str = r"^[\d- ]*$";

/// E-mail addresses: exactly one `@` with text on both sides
pub const DEFAULT_EMAIL_ADDRESS_REGEX: &str = r"^[^@]+@[^@]+$";

/// URLs: an http, https or ftp scheme prefix
pub const DEFAULT_URL_REGEX: &str = r"^(http://|https://|ftp://)";
