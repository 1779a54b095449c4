use std::io::Write;

use tessera_nav::{NavAction, NavError, NavHost};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    screens::{self, Screen},
};

/// One scripted user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Navigate directly, as a deep link or a back button would.
    Action(NavAction),
    /// Activate the n-th (1-based) action of the current screen.
    Select(usize),
}

impl Step {
    /// `back`, `#<n>`, or any other text as a path.
    pub fn parse(token: &str) -> Self {
        if token == "back" {
            return Self::Action(NavAction::Back);
        }
        match token.strip_prefix('#').map(str::parse::<usize>) {
            Some(Ok(index)) => Self::Select(index),
            _ => Self::Action(NavAction::navigate(token)),
        }
    }
}

pub fn build_host(config: &AppConfig) -> Result<NavHost<Screen>, NavError> {
    NavHost::builder()
        .options(config.nav)
        .destination(screens::HOME, screens::home)?
        .destination(screens::DETAIL, screens::detail)?
        .destination(screens::SETTINGS, screens::settings)?
        .build(&config.start)
}

/// Apply `steps` in order, printing the screen after each one.
///
/// Navigation failures are reported and the script continues from the
/// unchanged screen.
pub fn run(
    host: &mut NavHost<Screen>,
    steps: &[Step],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write!(out, "{}", host.screen())?;
    for step in steps {
        let action = match step {
            Step::Action(action) => action.clone(),
            Step::Select(index) => {
                let selected = host.with_screen(|screen| {
                    index
                        .checked_sub(1)
                        .and_then(|i| screen.actions.get(i))
                        .map(|entry| entry.action.clone())
                });
                let Some(action) = selected else {
                    warn!(index, "no such action on current screen");
                    writeln!(out, "! no action #{index}")?;
                    continue;
                };
                action
            }
        };

        match host.dispatch(&action) {
            Ok(()) => {
                info!(
                    path = host.controller().current_destination().path(),
                    depth = host.controller().back_stack().len(),
                    "navigated"
                );
                write!(out, "{}", host.screen())?;
            }
            Err(err) => {
                warn!(%err, "navigation failed");
                writeln!(out, "! {err}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tessera_nav::{NavAction, NavError, NavOptions};

    use super::{Step, build_host, run};
    use crate::config::AppConfig;

    #[test]
    fn parses_steps() {
        assert_eq!(Step::parse("back"), Step::Action(NavAction::Back));
        assert_eq!(Step::parse("#2"), Step::Select(2));
        assert_eq!(
            Step::parse("detail/1"),
            Step::Action(NavAction::navigate("detail/1"))
        );
        assert_eq!(Step::parse("#x"), Step::Action(NavAction::navigate("#x")));
    }

    #[test]
    fn scripted_session() {
        let mut host = build_host(&AppConfig::default()).unwrap();
        let steps: Vec<_> = ["#2", "#2", "back", "back", "back", "nowhere", "#9"]
            .into_iter()
            .map(Step::parse)
            .collect();
        let mut out = Vec::new();
        run(&mut host, &steps, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("== Lantern =="));
        assert!(out.contains("== Rope =="));
        assert!(out.contains("! cannot pop the root entry of the back stack"));
        assert!(out.contains("! no registered route matches `nowhere`"));
        assert!(out.contains("! no action #9"));
        assert_eq!(host.screen().title, "Home");
        assert_eq!(host.controller().back_stack().len(), 1);
    }

    #[test]
    fn start_path_comes_from_config() {
        let config = AppConfig {
            start: "detail/0".to_owned(),
            nav: NavOptions::default(),
        };
        let host = build_host(&config).unwrap();
        assert_eq!(host.screen().title, "Compass");

        let config = AppConfig {
            start: "missing".to_owned(),
            ..AppConfig::default()
        };
        assert!(matches!(
            build_host(&config),
            Err(NavError::NoMatchingRoute { .. })
        ));
    }

    #[test]
    fn single_top_option_is_applied() {
        let config = AppConfig {
            nav: NavOptions::default().with_launch_single_top(true),
            ..AppConfig::default()
        };
        let mut host = build_host(&config).unwrap();
        let steps = [Step::parse("settings"), Step::parse("settings")];
        run(&mut host, &steps, &mut Vec::<u8>::new()).unwrap();
        assert_eq!(host.controller().back_stack().len(), 2);
    }
}
