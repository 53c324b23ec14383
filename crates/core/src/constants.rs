use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency assigned to accounts created without one
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Upper bound on installments for a single recurrence
pub const MAX_INSTALLMENTS: u32 = 360;

/// Upper bound on occurrences materialised for an end-dated recurrence
pub const MAX_MATERIALIZED_OCCURRENCES: usize = 360;

/// Suffix appended to installment descriptions, e.g. "Laptop (3/10 parcela)"
pub const INSTALLMENT_LABEL: &str = "parcela";

/// Share of income assigned to each bucket when a budget omits it (50/30/20)
pub const NECESSITIES_SHARE: Decimal = dec!(0.50);
pub const WANTS_SHARE: Decimal = dec!(0.30);
pub const SAVINGS_SHARE: Decimal = dec!(0.20);

/// Decimal precision for stored money values
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Minimum accepted password length for new users
pub const MIN_PASSWORD_LENGTH: usize = 8;
