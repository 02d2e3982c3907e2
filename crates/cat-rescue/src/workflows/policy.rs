use serde::{Deserialize, Serialize};

use super::error::WorkflowError;

/// How strictly report and adoption status changes are checked.
///
/// Terminal statuses are absorbing under both policies. `Permissive` otherwise lets an
/// administrator jump between any statuses; `Strict` only follows the documented edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" | "override" => Some(Self::Permissive),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TransitionPolicy::Permissive => "permissive",
            TransitionPolicy::Strict => "strict",
        }
    }

    pub(crate) fn check<S: Lifecycle>(
        self,
        entity: &'static str,
        current: S,
        next: S,
    ) -> Result<(), WorkflowError> {
        if current.is_terminal() {
            return Err(WorkflowError::InvalidState(format!(
                "{entity} is {} and can no longer change status",
                current.status_label()
            )));
        }

        match self {
            TransitionPolicy::Permissive => Ok(()),
            TransitionPolicy::Strict if current.allows(next) => Ok(()),
            TransitionPolicy::Strict => Err(WorkflowError::InvalidState(format!(
                "{entity} cannot move from {} to {}",
                current.status_label(),
                next.status_label()
            ))),
        }
    }
}

/// Status enums governed by a [`TransitionPolicy`].
pub(crate) trait Lifecycle: Copy {
    fn is_terminal(self) -> bool;
    /// Edge table used by [`TransitionPolicy::Strict`].
    fn allows(self, next: Self) -> bool;
    fn status_label(self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Red,
        Green,
        Off,
    }

    impl Lifecycle for Light {
        fn is_terminal(self) -> bool {
            self == Light::Off
        }

        fn allows(self, next: Self) -> bool {
            matches!(
                (self, next),
                (Light::Red, Light::Green) | (_, Light::Off)
            )
        }

        fn status_label(self) -> &'static str {
            match self {
                Light::Red => "red",
                Light::Green => "green",
                Light::Off => "off",
            }
        }
    }

    #[test]
    fn permissive_allows_any_edge_out_of_live_states() {
        let policy = TransitionPolicy::Permissive;
        assert!(policy.check("light", Light::Green, Light::Red).is_ok());
        assert!(policy.check("light", Light::Red, Light::Red).is_ok());
    }

    #[test]
    fn strict_follows_edge_table() {
        let policy = TransitionPolicy::Strict;
        assert!(policy.check("light", Light::Red, Light::Green).is_ok());
        match policy.check("light", Light::Green, Light::Red) {
            Err(WorkflowError::InvalidState(message)) => {
                assert!(message.contains("green to red"))
            }
            other => panic!("expected invalid state, got {other:?}"),
        }
    }

    #[test]
    fn terminal_states_are_absorbing_under_both_policies() {
        for policy in [TransitionPolicy::Permissive, TransitionPolicy::Strict] {
            assert!(matches!(
                policy.check("light", Light::Off, Light::Red),
                Err(WorkflowError::InvalidState(_))
            ));
        }
    }

    #[test]
    fn parses_labels() {
        assert_eq!(
            TransitionPolicy::parse(" STRICT "),
            Some(TransitionPolicy::Strict)
        );
        assert_eq!(
            TransitionPolicy::parse("permissive"),
            Some(TransitionPolicy::Permissive)
        );
        assert_eq!(TransitionPolicy::parse("loose"), None);
    }
}
