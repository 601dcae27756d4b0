//! Presenter for a configurable-parameter group panel.
//!
//! Decides whether a group's parameter rows are visible given the group's
//! expandability and the user's toggle actions. Pure view-model: no I/O,
//! no async, one owned boolean per presenter instance.

use serde::{Deserialize, Serialize};

/// A single tunable parameter inside a group. The value is opaque to the
/// presenter; it only forwards updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupParameter {
    pub name: String,
    pub value: serde_json::Value,
}

/// A named cluster of tunable parameters shown in a settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGroup {
    pub header: String,
    pub parameters: Vec<GroupParameter>,
}

/// Affordance shown on the toggle control, matching the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleIndicator {
    Collapsed,
    Expanded,
}

/// What a group panel should render right now.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupView<'a> {
    /// Group header, always shown.
    pub header: &'a str,
    /// Toggle affordance; None when the group has no toggle control.
    pub indicator: Option<ToggleIndicator>,
    /// Parameter rows; None when the content is hidden.
    pub rows: Option<&'a [GroupParameter]>,
}

/// Two-state expand/collapse presenter for one group panel.
///
/// Non-expandable groups have no toggle affordance and show their content
/// unconditionally; expandable groups start collapsed and gate content on
/// the toggle state. State resets to collapsed with every new instance.
#[derive(Debug, Clone)]
pub struct GroupPresenter {
    is_expandable: bool,
    expanded: bool,
}

impl GroupPresenter {
    /// Create a presenter in the initial (collapsed) state.
    pub fn new(is_expandable: bool) -> Self {
        Self {
            is_expandable,
            expanded: false,
        }
    }

    pub fn is_expandable(&self) -> bool {
        self.is_expandable
    }

    /// Flip the toggle state. Synchronous; the only transition that exists.
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Whether the parameter rows are currently visible.
    pub fn shows_content(&self) -> bool {
        !self.is_expandable || self.expanded
    }

    /// Toggle affordance to render, or None for non-expandable groups.
    pub fn indicator(&self) -> Option<ToggleIndicator> {
        if !self.is_expandable {
            return None;
        }
        Some(if self.expanded {
            ToggleIndicator::Expanded
        } else {
            ToggleIndicator::Collapsed
        })
    }

    /// Project the render state for a group.
    pub fn view<'a>(&self, group: &'a ParameterGroup) -> GroupView<'a> {
        GroupView {
            header: &group.header,
            indicator: self.indicator(),
            rows: self
                .shows_content()
                .then_some(group.parameters.as_slice()),
        }
    }
}

/// Apply a caller-supplied update to the named parameter. Returns false when
/// the group has no parameter with that name.
pub fn apply_update<F>(group: &mut ParameterGroup, name: &str, update: F) -> bool
where
    F: FnOnce(&mut GroupParameter),
{
    match group.parameters.iter_mut().find(|p| p.name == name) {
        Some(parameter) => {
            update(parameter);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn learning_rate_group() -> ParameterGroup {
        ParameterGroup {
            header: "Learning rate".to_string(),
            parameters: vec![GroupParameter {
                name: "lr".to_string(),
                value: json!(0.01),
            }],
        }
    }

    #[test]
    fn test_non_expandable_always_shows_content() {
        let group = learning_rate_group();
        let mut presenter = GroupPresenter::new(false);

        let view = presenter.view(&group);
        assert_eq!(view.indicator, None);
        assert_eq!(view.rows, Some(group.parameters.as_slice()));

        // Toggle state is irrelevant for non-expandable groups.
        presenter.toggle();
        let view = presenter.view(&group);
        assert_eq!(view.indicator, None);
        assert_eq!(view.rows, Some(group.parameters.as_slice()));
    }

    #[test]
    fn test_expandable_starts_collapsed() {
        let group = learning_rate_group();
        let presenter = GroupPresenter::new(true);

        let view = presenter.view(&group);
        assert_eq!(view.header, "Learning rate");
        assert_eq!(view.indicator, Some(ToggleIndicator::Collapsed));
        assert_eq!(view.rows, None);
    }

    #[test]
    fn test_toggle_shows_rows_and_switches_indicator() {
        let group = learning_rate_group();
        let mut presenter = GroupPresenter::new(true);

        presenter.toggle();
        let view = presenter.view(&group);
        assert_eq!(view.indicator, Some(ToggleIndicator::Expanded));
        let rows = view.rows.unwrap();
        assert_eq!(rows[0].name, "lr");
        assert_eq!(rows[0].value, json!(0.01));
    }

    #[test]
    fn test_double_toggle_round_trips_to_initial_view() {
        let group = learning_rate_group();
        let mut presenter = GroupPresenter::new(true);
        let initial = presenter.view(&group);

        presenter.toggle();
        presenter.toggle();
        assert_eq!(presenter.view(&group), initial);
    }

    #[test]
    fn test_apply_update_forwards_to_named_parameter() {
        let mut group = learning_rate_group();

        assert!(apply_update(&mut group, "lr", |p| p.value = json!(0.001)));
        assert_eq!(group.parameters[0].value, json!(0.001));

        assert!(!apply_update(&mut group, "momentum", |p| {
            p.value = json!(0.9)
        }));
    }
}
