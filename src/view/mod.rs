//! View-model logic shared with UI front-ends.

pub mod group;

pub use group::{
    GroupParameter, GroupPresenter, GroupView, ParameterGroup, ToggleIndicator, apply_update,
};
