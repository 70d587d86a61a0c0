use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Balance shown by the balance endpoint when the stored balance is not positive.
pub const DISPLAY_BALANCE_FALLBACK: Decimal = dec!(500);

/// Largest money value a request may carry: transfer and contribution
/// amounts, goal targets and monthly contributions, order prices.
pub const MAX_MONEY_AMOUNT: Decimal = dec!(1000000000000);

/// Largest share count for a single order.
pub const MAX_ORDER_SHARES: Decimal = dec!(1000000000);

/// Payment method recorded when a transfer does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "Bank Account";

/// Maximum length of a goal name, in characters.
pub const GOAL_NAME_MAX_CHARS: usize = 100;

/// Maximum length of a goal description, in characters.
pub const GOAL_DESCRIPTION_MAX_CHARS: usize = 500;

/// Maximum length of a card's display name, in characters.
pub const CARD_NAME_MAX_CHARS: usize = 100;

/// Days per month used by the on-track estimate.
pub const DAYS_PER_MONTH: i64 = 30;

pub const MILLIS_PER_DAY: i64 = 86_400_000;
