use serde::{Deserialize, Serialize};

/// Digit grouping used when rendering amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Grouping {
    /// 1,000,000
    Western,
    /// 10,00,000 (lakh/crore)
    #[default]
    Indian,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    pub symbol: String,
    #[serde(default)]
    pub grouping: Grouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            grouping: Grouping::Indian,
        }
    }
}

impl CurrencyFormat {
    pub fn western(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            grouping: Grouping::Western,
        }
    }

    /// Whole-unit amount with symbol and separators, e.g. `₹98,000`.
    pub fn format(&self, amount: u64) -> String {
        format!("{}{}", self.symbol, group_digits(amount, self.grouping))
    }
}

fn group_digits(amount: u64, grouping: Grouping) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let head_group = match grouping {
        Grouping::Western => 3,
        Grouping::Indian => 2,
    };

    // Walk the head from the right in fixed-size chunks.
    let mut chunks: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(head_group);
        chunks.push(&head[start..end]);
        end = start;
    }
    chunks.reverse();

    let mut out = chunks.join(",");
    out.push(',');
    out.push_str(last_three);
    out
}
