//! Text screens for the navigation demo.

use std::fmt;

use tessera_nav::{NavAction, RouteParams};

pub const HOME: &str = "home";
pub const DETAIL: &str = "detail/{itemId}";
pub const SETTINGS: &str = "settings";

const ITEMS: [&str; 3] = ["Compass", "Lantern", "Rope"];

/// A selectable action shown on a screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenAction {
    pub label: String,
    pub action: NavAction,
}

impl ScreenAction {
    fn new(label: impl Into<String>, action: NavAction) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Renderable description of one screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub title: String,
    pub lines: Vec<String>,
    pub actions: Vec<ScreenAction>,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        for (index, action) in self.actions.iter().enumerate() {
            writeln!(f, "  [#{}] {}", index + 1, action.label)?;
        }
        Ok(())
    }
}

fn detail_path(id: usize) -> String {
    format!("detail/{id}")
}

pub fn home(_: &RouteParams) -> Screen {
    let mut actions: Vec<_> = ITEMS
        .iter()
        .enumerate()
        .map(|(id, name)| {
            ScreenAction::new(format!("Open {name}"), NavAction::navigate(detail_path(id)))
        })
        .collect();
    actions.push(ScreenAction::new("Settings", NavAction::navigate(SETTINGS)));
    Screen {
        title: "Home".to_owned(),
        lines: vec![format!("{} items available", ITEMS.len())],
        actions,
    }
}

pub fn detail(params: &RouteParams) -> Screen {
    let back = ScreenAction::new("Back", NavAction::Back);
    match params.parse::<usize>("itemId") {
        Ok(id) if id < ITEMS.len() => {
            let mut actions = vec![back];
            if id + 1 < ITEMS.len() {
                actions.push(ScreenAction::new(
                    format!("Next: {}", ITEMS[id + 1]),
                    NavAction::navigate(detail_path(id + 1)),
                ));
            }
            Screen {
                title: ITEMS[id].to_owned(),
                lines: vec![format!("Item #{id}")],
                actions,
            }
        }
        Ok(id) => Screen {
            title: "Not found".to_owned(),
            lines: vec![format!("No item with id {id}")],
            actions: vec![back],
        },
        Err(err) => Screen {
            title: "Not found".to_owned(),
            lines: vec![err.to_string()],
            actions: vec![back],
        },
    }
}

pub fn settings(_: &RouteParams) -> Screen {
    Screen {
        title: "Settings".to_owned(),
        lines: vec!["Nothing to configure yet".to_owned()],
        actions: vec![ScreenAction::new("Back", NavAction::Back)],
    }
}

#[cfg(test)]
mod tests {
    use tessera_nav::{NavAction, RouteParams};

    use super::{detail, home};

    #[test]
    fn home_links_every_item() {
        let screen = home(&RouteParams::new());
        assert_eq!(screen.actions.len(), 4);
        assert_eq!(screen.actions[0].action, NavAction::navigate("detail/0"));
        assert_eq!(screen.actions[3].action, NavAction::navigate("settings"));
    }

    #[test]
    fn detail_parses_item_id() {
        let params: RouteParams = [("itemId", "1")].into_iter().collect();
        let screen = detail(&params);
        assert_eq!(screen.title, "Lantern");
        assert_eq!(screen.actions[1].action, NavAction::navigate("detail/2"));

        let last: RouteParams = [("itemId", "2")].into_iter().collect();
        assert_eq!(detail(&last).actions.len(), 1);
    }

    #[test]
    fn detail_reports_unknown_items() {
        let params: RouteParams = [("itemId", "x")].into_iter().collect();
        let screen = detail(&params);
        assert_eq!(screen.title, "Not found");
        assert_eq!(screen.actions[0].action, NavAction::Back);

        let params: RouteParams = [("itemId", "99")].into_iter().collect();
        assert_eq!(detail(&params).lines, ["No item with id 99"]);
    }
}
