//! Hand-built Pikkit pages shared by the scraper tests

use crate::scrapers::logos::LOGO_HOST;
use crate::scrapers::page::{NodeId, PageTree};
use crate::scrapers::sections::SECTION_SEPARATOR;

pub fn logo_url(name: &str) -> String {
    format!("https://{LOGO_HOST}/brands/{name}.png")
}

/// One game block: a row with both teams and six logo cells, then the clock
/// and the "More wagers" link.
pub fn add_game(
    tree: &mut PageTree,
    parent: NodeId,
    away: (&str, [&str; 3]),
    home: (&str, [&str; 3]),
    clock: &str,
) -> NodeId {
    let wrapper = tree.add_element(parent, "div");
    let row = tree.add_element(wrapper, "div");

    for (slot, (team, cells)) in [away, home].into_iter().enumerate() {
        let name = tree.add_element(row, "span");
        tree.add_text(name, team);
        for (i, cell_text) in cells.iter().enumerate() {
            let cell = tree.add_element(row, "div");
            tree.add_text(cell, cell_text);
            tree.add_image(cell, &logo_url(&format!("book{}", slot * 3 + i)));
        }
    }

    let time = tree.add_element(wrapper, "div");
    tree.add_text(time, clock);
    let more = tree.add_element(wrapper, "a");
    tree.add_text(more, SECTION_SEPARATOR);
    wrapper
}

/// Three games behind page chrome, as the rendered slate looks
pub fn slate_page() -> PageTree {
    let mut tree = PageTree::new();
    let body = tree.add_element(tree.root(), "body");
    let list = tree.add_element(body, "div");

    let header = tree.add_element(list, "nav");
    tree.add_text(
        header,
        "HomeSearchHistory$0.00CalendarYour BetsTagsClosing LineScenariosEventsSettingsContact SupportJoin DiscordEventsEdit ProfileLog Out",
    );
    tree.add_text(
        header,
        "MLBNFLTENNISWNBANCAAFBUFCEPLGOLFNASCARNBANHLNCAAMLALIGASERIEABUNDESLIGALIGUE1MLSUCLUELNCAAWNCAA BaseballF1SearchFilterMLBFutures",
    );

    add_game(
        &mut tree,
        list,
        ("Philadelphia Phillies", ["+113", "-1.5+150", "o9.5-102"]),
        ("Cincinnati Reds", ["-115", "+1.5-190", "u9.5-108"]),
        "6:10 PM",
    );
    add_game(
        &mut tree,
        list,
        ("New York Yankees", ["-140", "-1.5+120", "o8.5-105"]),
        ("Houston Astros", ["+120", "+1.5-145", "u8.5-115"]),
        "7:05 PM",
    );
    add_game(
        &mut tree,
        list,
        ("Chicago Cubs", ["-120", "-1.5+140", "o8.5-110"]),
        ("Texas Rangers", ["+100", "+1.5-160", "u8.5-100"]),
        "10:10 PM",
    );

    let footer = tree.add_element(list, "div");
    tree.add_text(footer, "Load More0Place BetsAdd something to your betslip!");
    tree
}
