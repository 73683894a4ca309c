use crate::types::{ErrorResponse, ErrorTranslationKey, SuccessResponse};

/// The bid widget. Holds nothing but the displayed price text, so dropping
/// the panel is the page-reload reset of the original.
pub struct BidPanel {
    current_price: String,
}

impl BidPanel {
    pub fn new(initial_price: u64) -> Self {
        Self {
            current_price: format_price(initial_price),
        }
    }

    /// The price text as shown to the user, thousands-separated.
    pub fn current_price(&self) -> &str {
        &self.current_price
    }

    /// Validate a raw bid entry against the displayed price. Accepted bids
    /// become the new displayed price; rejected ones leave it untouched.
    ///
    /// Prices are whole currency units, so fractional entries like "500.5"
    /// are rejected the same way empty or non-numeric ones are.
    pub fn place_bid(&mut self, input: &str) -> Result<SuccessResponse, ErrorResponse> {
        let current = parse_price(&self.current_price).unwrap_or(0);

        // The bid field takes plain digits only; "50,000" is as invalid as "abc".
        let bid = input.trim().parse::<u64>().unwrap_or(0);
        if bid == 0 {
            return Err(ErrorResponse {
                error: "Please enter a bid amount.".to_string(),
                translation_key: ErrorTranslationKey::BidEmptyAmount,
            });
        }

        if bid <= current {
            return Err(ErrorResponse {
                error: "Your bid must be higher than the current price.".to_string(),
                translation_key: ErrorTranslationKey::BidNotAboveCurrent,
            });
        }

        self.current_price = format_price(bid);
        Ok(SuccessResponse {
            message: "Bid accepted. Practice only - the price resets on reload.".to_string(),
        })
    }
}

/// Strip thousands separators and parse what the display shows.
fn parse_price(display: &str) -> Option<u64> {
    display.replace(',', "").parse().ok()
}

/// Group digits in threes, the way the page displays prices.
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    formatted
}
