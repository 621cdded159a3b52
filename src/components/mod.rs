// ABOUTME: UI components: per-view state structs and their renderers

#![allow(dead_code)]

pub mod client_registration;
pub mod company_search;
pub mod confirmation_dialog;
pub mod dashboard;
pub mod driver_wizard;
pub mod layout;

pub use client_registration::{ClientFormState, ClientRegistrationComponent};
pub use company_search::{CompanySearchState, Debouncer};
pub use confirmation_dialog::ConfirmationDialogComponent;
pub use dashboard::{DashboardComponent, DashboardState};
pub use driver_wizard::{DriverWizardComponent, WizardState};
pub use layout::LayoutComponent;

use std::time::Duration;

/// Delay between a successful registration and the navigation to login.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);
