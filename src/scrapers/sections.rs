use crate::scrapers::game_time::contains_clock;
use regex::Regex;
use std::sync::LazyLock;

/// Trailing marker Pikkit prints under every game block
pub const SECTION_SEPARATOR: &str = "More wagers →";

/// Sections shorter than this (after trimming) cannot hold a game
pub const MIN_SECTION_LEN: usize = 20;

static RE_SIGNED_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[+-]\d+").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_DATE_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-z]{2} \d+[A-Z][a-z]{2} \d+[A-Z][a-z]{2} \d+Today[A-Z][a-z]{2} \d+[A-Z][a-z]{2} \d+[A-Z][a-z]{2} \d+").unwrap()
});
static RE_OVERLAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"🎯 Pikkit Data ExtractedFound \d+ gamesNo games found\. Check console for debugging info\.Close").unwrap()
});

/// Page chrome that ends up glued to the first game of a container
const CHROME: [&str; 4] = [
    "PikkitYou need to enable JavaScript to run this app.",
    "HomeSearchHistory$0.00CalendarYour BetsTagsClosing LineScenariosEventsSettingsContact SupportJoin DiscordEventsEdit ProfileLog Out",
    "MLBNFLTENNISWNBANCAAFBUFCEPLGOLFNASCARNBANHLNCAAMLALIGASERIEABUNDESLIGALIGUE1MLSUCLUELNCAAWNCAA BaseballF1SearchFilterMLBFutures",
    "Load More0Place BetsAdd something to your betslip!",
];

/// A candidate game block and its position among the non-empty fragments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSection<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// Lazily splits container text into per-game sections
pub struct GameSections<'a> {
    fragments: std::str::Split<'a, &'static str>,
    index: usize,
}

/// Split `text` on the section separator, keeping fragments long enough to hold a game
pub fn split_sections(text: &str) -> GameSections<'_> {
    GameSections {
        fragments: text.split(SECTION_SEPARATOR),
        index: 0,
    }
}

impl<'a> Iterator for GameSections<'a> {
    type Item = GameSection<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let fragment = self.fragments.next()?;
            if fragment.trim().is_empty() {
                continue;
            }
            let index = self.index;
            self.index += 1;

            // Short fragments still consume an index so times stay aligned
            if fragment.trim().chars().count() >= MIN_SECTION_LEN {
                return Some(GameSection {
                    index,
                    text: fragment,
                });
            }
        }
    }
}

/// Does this element's text look like a container of game blocks?
pub fn is_game_container(text: &str) -> bool {
    text.contains(SECTION_SEPARATOR)
        && contains_clock(text)
        && RE_SIGNED_NUMBER.is_match(text)
        && text.chars().count() > 50
}

/// Strip known page chrome and collapse whitespace. Clock patterns are left alone.
pub fn clean_game_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for chrome in CHROME {
        cleaned = cleaned.replace(chrome, "");
    }
    let cleaned = RE_DATE_STRIP.replace_all(&cleaned, "");
    let cleaned = RE_OVERLAY.replace_all(&cleaned, "");
    RE_WHITESPACE.replace_all(&cleaned, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sections() {
        let text = "Philadelphia Phillies+113Cincinnati Reds-1156:10 PMMore wagers →\
                    tiny More wagers →   More wagers →\
                    New York Yankees-140Houston Astros+1207:05 PMMore wagers →";
        let sections: Vec<GameSection> = split_sections(text).collect();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].index, 0);
        assert!(sections[0].text.starts_with("Philadelphia Phillies"));
        // "tiny " was index 1; the blank fragment is not counted
        assert_eq!(sections[1].index, 2);
        assert!(sections[1].text.starts_with("New York Yankees"));
    }

    #[test]
    fn test_split_without_separator() {
        let sections: Vec<GameSection> = split_sections("no games on this page at all, sorry").collect();
        assert_eq!(sections.len(), 1);
        assert_eq!(split_sections("short").count(), 0);
    }

    #[test]
    fn test_is_game_container() {
        let text = "Philadelphia Phillies+113+1.5-180o9.5-102Cincinnati Reds-115+1.5-190u9.5-1086:10 PMMore wagers →";
        assert!(is_game_container(text));
        assert!(!is_game_container("6:10 PM More wagers →"));
        assert!(!is_game_container(&text.replace(SECTION_SEPARATOR, "")));
    }

    #[test]
    fn test_clean_game_text_keeps_times() {
        let raw = "Load More0Place BetsAdd something to your betslip!  Chicago Cubs   -120\n\nTexas Rangers +100 7:05 PM";
        let cleaned = clean_game_text(raw);
        assert_eq!(cleaned, "Chicago Cubs -120 Texas Rangers +100 7:05 PM");
    }

    #[test]
    fn test_clean_game_text_removes_date_strip() {
        let raw = "Aug 10Aug 11Aug 12TodayAug 14Aug 15Aug 16Chicago Cubs-120";
        assert_eq!(clean_game_text(raw), "Chicago Cubs-120");
    }
}
