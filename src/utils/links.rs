use anyhow::{Context, Result};
use reqwest::Url;

pub const NOVIG_URL: &str = "https://www.novig.us/";

/// Novig's brand logo as served by Pikkit's CDN
pub const NOVIG_LOGO_URL: &str =
    "https://d31zyv2gw1yfmz.cloudfront.net/brands/66ec6d77a735d9808f158314.png";

/// Landing link for a bet on `market` of game `game_id`, tagged for campaign tracking
pub fn bet_url(base: &str, game_id: &str, market: &str) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("Invalid Novig URL: {}", base))?;
    url.query_pairs_mut()
        .append_pair("utm_source", "best-odds")
        .append_pair("utm_medium", "landing")
        .append_pair("utm_campaign", "mvp")
        .append_pair("utm_content", &format!("{}-{}", game_id, market));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bet_url() {
        let url = bet_url(NOVIG_URL, "pikkit-game-3", "spread-home").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.novig.us/?utm_source=best-odds&utm_medium=landing&utm_campaign=mvp&utm_content=pikkit-game-3-spread-home"
        );
    }

    #[test]
    fn test_bet_url_rejects_garbage_base() {
        assert!(bet_url("not a url", "pikkit-game-0", "total-over").is_err());
    }
}
