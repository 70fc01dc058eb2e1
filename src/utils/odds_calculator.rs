/// Share of the stake the price implies: `100 / (odds + 100)` for underdogs,
/// `|odds| / (|odds| + 100)` for favorites. An unposted price (0) implies 0.
pub fn american_odds_to_probability(odds: i32) -> f64 {
    match odds {
        0 => 0.0,
        o if o > 0 => 100.0 / (o as f64 + 100.0),
        o => {
            let risk = o.abs() as f64;
            risk / (risk + 100.0)
        }
    }
}

/// Convert American odds to decimal odds (total return per unit staked)
pub fn american_to_decimal(odds: i32) -> f64 {
    if odds > 0 {
        odds as f64 / 100.0 + 1.0
    } else {
        100.0 / odds.abs() as f64 + 1.0
    }
}

/// Total return (stake plus winnings) of a winning bet. No price pays nothing.
pub fn calculate_payout(odds: i32, stake: f64) -> f64 {
    if odds == 0 {
        0.0
    } else if odds > 0 {
        stake + stake * odds as f64 / 100.0
    } else {
        stake + stake * 100.0 / odds.abs() as f64
    }
}

/// How much more a winning Novig bet returns than the same bet at a competitor.
/// Negative when the competitor pays more.
pub fn calculate_delta(novig_odds: i32, competitor_odds: i32, stake: f64) -> f64 {
    calculate_payout(novig_odds, stake) - calculate_payout(competitor_odds, stake)
}

/// Whether the Novig price pays more than the competitor's
pub fn is_novig_better(novig_odds: i32, competitor_odds: i32) -> bool {
    if novig_odds > 0 && competitor_odds > 0 {
        novig_odds < competitor_odds
    } else if novig_odds < 0 && competitor_odds < 0 {
        novig_odds > competitor_odds
    } else {
        // One positive, one negative: the positive price always pays more
        novig_odds > competitor_odds
    }
}

/// "+150" / "-110"
pub fn format_american_odds(odds: i32) -> String {
    if odds > 0 {
        format!("+{}", odds)
    } else {
        odds.to_string()
    }
}

/// "53.5%"
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// US dollars with thousands separators and at most two decimals ("$1,234.5", "$12")
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}${grouped}"),
        f if f % 10 == 0 => format!("{sign}${grouped}.{}", f / 10),
        f => format!("{sign}${grouped}.{f:02}"),
    }
}
