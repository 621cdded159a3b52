// ABOUTME: Driver registration wizard: tabbed form state machine + renderer

pub mod component;
pub mod state;

pub use component::DriverWizardComponent;
pub use state::{FieldId, WizardState, WizardTab};
