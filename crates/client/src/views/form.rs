//! Create and edit forms.
//!
//! Both forms share one state machine, configured by [`FormFlow`]:
//!
//! ```text
//! Initializing ──load──▶ Editing ──submit──▶ Submitting ──ok──▶ Succeeded
//!      │                   ▲  │                   │
//!      └──▶ LoadFailed     │  └─ invalid ─┐       │
//!                          └──────────────┴─ err ─┘
//! ```
//!
//! The flow selects the validation rules, the repository call made on
//! submit, and whether addresses can be removed (create only).

use custdesk_core::{
    Address, AddressField, Customer, CustomerDraft, CustomerField, CustomerId, FieldErrors,
    RuleSet, validate,
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::navigation::{Navigator, Route, ViewLifetime};
use crate::repository::{CustomerRepository, RepositoryError};

pub const CREATE_FAILED: &str = "There was an error creating the customer";
pub const UPDATE_FAILED: &str = "There was an error updating the customer data";

/// Which form this is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFlow {
    /// New customer; addresses can be removed.
    Create,
    /// Existing customer; addresses can only be added.
    Edit(CustomerId),
}

impl FormFlow {
    /// Validation rules used on submit.
    #[must_use]
    pub const fn rules(&self) -> RuleSet {
        match self {
            Self::Create => RuleSet::Create,
            Self::Edit(_) => RuleSet::Edit,
        }
    }

    /// Whether the form offers address removal.
    #[must_use]
    pub const fn allows_address_removal(&self) -> bool {
        matches!(self, Self::Create)
    }

    /// Id of the record being edited.
    #[must_use]
    pub const fn id(&self) -> Option<&CustomerId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }

    const fn failure_message(&self) -> &'static str {
        match self {
            Self::Create => CREATE_FAILED,
            Self::Edit(_) => UPDATE_FAILED,
        }
    }
}

/// Phase of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting for the record to edit.
    Initializing,
    /// The fetch of the record to edit failed. Not retryable.
    LoadFailed(String),
    /// Accepting input.
    Editing,
    /// A save is in flight.
    Submitting,
    /// Saved as the given id.
    Succeeded(CustomerId),
}

/// Invalid form operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("this form does not support removing addresses")]
    RemovalNotSupported,

    #[error("no address at position {index} (form has {len})")]
    AddressOutOfRange { index: usize, len: usize },

    #[error("form is not accepting input")]
    NotEditing,
}

/// What [`FormState::begin_submit`] decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// A submit is already in flight, or the form is not editable.
    Ignored,
    /// Validation failed; errors are attached to the state.
    Invalid,
    /// Validation passed; send this draft.
    Ready(CustomerDraft),
}

/// Owned state of a create or edit form.
#[derive(Debug, Clone)]
pub struct FormState {
    flow: FormFlow,
    phase: FormPhase,
    draft: CustomerDraft,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl FormState {
    /// A create form, editable immediately, seeded with one blank address.
    #[must_use]
    pub fn create() -> Self {
        Self {
            flow: FormFlow::Create,
            phase: FormPhase::Editing,
            draft: CustomerDraft::with_blank_address(),
            errors: FieldErrors::new(),
            submit_error: None,
        }
    }

    /// An edit form waiting for the record with `id`.
    #[must_use]
    pub fn edit(id: CustomerId) -> Self {
        Self {
            flow: FormFlow::Edit(id),
            phase: FormPhase::Initializing,
            draft: CustomerDraft::default(),
            errors: FieldErrors::new(),
            submit_error: None,
        }
    }

    #[must_use]
    pub const fn flow(&self) -> &FormFlow {
        &self.flow
    }

    #[must_use]
    pub const fn phase(&self) -> &FormPhase {
        &self.phase
    }

    #[must_use]
    pub const fn draft(&self) -> &CustomerDraft {
        &self.draft
    }

    /// Errors from the last validation pass.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Message from the last failed save, if any.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// The fetched record arrived.
    pub fn hydrate(&mut self, customer: Customer) {
        if self.phase != FormPhase::Initializing {
            return;
        }
        self.draft = customer.into_draft();
        self.phase = FormPhase::Editing;
    }

    /// The fetch of the record failed.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        if self.phase == FormPhase::Initializing {
            self.phase = FormPhase::LoadFailed(message.into());
        }
    }

    /// Replace one top-level field.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotEditing` outside the `Editing` phase.
    pub fn set_field(&mut self, field: CustomerField, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editing()?;
        *field.get_mut(&mut self.draft) = value.into();
        Ok(())
    }

    /// Replace one field of the address at `index`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::AddressOutOfRange` for a missing position, or
    /// `FormError::NotEditing` outside the `Editing` phase.
    pub fn set_address_field(
        &mut self,
        index: usize,
        field: AddressField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.ensure_editing()?;
        let len = self.draft.addresses.len();
        let address = self
            .draft
            .addresses
            .get_mut(index)
            .ok_or(FormError::AddressOutOfRange { index, len })?;
        *field.get_mut(address) = value.into();
        Ok(())
    }

    /// Append a blank address.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotEditing` outside the `Editing` phase.
    pub fn add_address(&mut self) -> Result<(), FormError> {
        self.ensure_editing()?;
        self.draft.addresses.push(Address::blank());
        Ok(())
    }

    /// Remove the address at `index`, shifting later ones down.
    ///
    /// Per-address errors are dropped: their positions no longer line up
    /// with the draft and the next submit recomputes them.
    ///
    /// # Errors
    ///
    /// Returns `FormError::RemovalNotSupported` on the edit flow,
    /// `FormError::AddressOutOfRange` for a missing position, or
    /// `FormError::NotEditing` outside the `Editing` phase.
    pub fn remove_address(&mut self, index: usize) -> Result<Address, FormError> {
        if !self.flow.allows_address_removal() {
            return Err(FormError::RemovalNotSupported);
        }
        self.ensure_editing()?;
        let len = self.draft.addresses.len();
        if index >= len {
            return Err(FormError::AddressOutOfRange { index, len });
        }
        self.errors.clear_addresses();
        Ok(self.draft.addresses.remove(index))
    }

    /// Validate and, if clean, move to `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.phase != FormPhase::Editing {
            return SubmitStart::Ignored;
        }

        self.submit_error = None;
        self.errors = validate(&self.draft, self.flow.rules());
        if !self.errors.is_empty() {
            return SubmitStart::Invalid;
        }

        self.phase = FormPhase::Submitting;
        SubmitStart::Ready(self.draft.clone())
    }

    /// Apply the outcome of the save.
    ///
    /// Returns the route to navigate to on success. On failure the draft is
    /// kept and the form becomes editable again.
    pub fn finish_submit(&mut self, result: Result<CustomerId, RepositoryError>) -> Option<Route> {
        if self.phase != FormPhase::Submitting {
            return None;
        }

        match result {
            Ok(id) => {
                self.phase = FormPhase::Succeeded(id.clone());
                Some(Route::Profile(id))
            }
            Err(e) => {
                error!(error = %e, "{}", self.flow.failure_message());
                self.submit_error = Some(self.flow.failure_message().to_string());
                self.phase = FormPhase::Editing;
                None
            }
        }
    }

    const fn ensure_editing(&self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::Editing => Ok(()),
            _ => Err(FormError::NotEditing),
        }
    }
}

/// Result of [`CustomerForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing happened (already submitting, or not editable).
    Ignored,
    /// Validation failed; no request was made.
    Invalid,
    /// Saved; navigation to the profile has been triggered.
    Saved(CustomerId),
    /// The save failed; the draft is intact.
    Failed,
    /// The view went away before the store answered.
    Discarded,
}

/// Form view-model: drives a [`FormState`] against a repository.
#[derive(Debug)]
pub struct CustomerForm<R, N> {
    state: FormState,
    repo: R,
    navigator: N,
    lifetime: ViewLifetime,
}

impl<R, N> CustomerForm<R, N>
where
    R: CustomerRepository,
    N: Navigator,
{
    /// A create form.
    pub fn create(repo: R, navigator: N) -> Self {
        Self::with_state(FormState::create(), repo, navigator)
    }

    /// An edit form for `id`. Call [`load`](Self::load) to fetch the record.
    pub fn edit(id: CustomerId, repo: R, navigator: N) -> Self {
        Self::with_state(FormState::edit(id), repo, navigator)
    }

    fn with_state(state: FormState, repo: R, navigator: N) -> Self {
        Self {
            state,
            repo,
            navigator,
            lifetime: ViewLifetime::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Handle for the owning view; dispose it on unmount.
    #[must_use]
    pub fn lifetime(&self) -> ViewLifetime {
        self.lifetime.clone()
    }

    /// Fetch the record being edited. Does nothing for a create form.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let Some(id) = self.state.flow().id().cloned() else {
            return;
        };
        if self.state.phase() != &FormPhase::Initializing {
            return;
        }

        let result = self.repo.get(&id).await;
        if self.lifetime.is_disposed() {
            debug!(customer_id = %id, "Form disposed, discarding fetch result");
            return;
        }

        match result {
            Ok(customer) => self.state.hydrate(customer),
            Err(e) => {
                // Logged only; the view has no retry action.
                error!(customer_id = %id, error = %e, "There was an error fetching the customer data");
                self.state.load_failed(e.to_string());
            }
        }
    }

    /// See [`FormState::set_field`].
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotEditing` outside the `Editing` phase.
    pub fn set_field(&mut self, field: CustomerField, value: impl Into<String>) -> Result<(), FormError> {
        self.state.set_field(field, value)
    }

    /// See [`FormState::set_address_field`].
    ///
    /// # Errors
    ///
    /// Returns `FormError` for a missing position or outside `Editing`.
    pub fn set_address_field(
        &mut self,
        index: usize,
        field: AddressField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.state.set_address_field(index, field, value)
    }

    /// See [`FormState::add_address`].
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotEditing` outside the `Editing` phase.
    pub fn add_address(&mut self) -> Result<(), FormError> {
        self.state.add_address()
    }

    /// See [`FormState::remove_address`].
    ///
    /// # Errors
    ///
    /// Returns `FormError` on the edit flow, for a missing position, or
    /// outside `Editing`.
    pub fn remove_address(&mut self, index: usize) -> Result<Address, FormError> {
        self.state.remove_address(index)
    }

    /// Validate and save the draft.
    #[instrument(skip(self), fields(flow = ?self.state.flow()))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        let draft = match self.state.begin_submit() {
            SubmitStart::Ignored => {
                debug!("Submit ignored");
                return SubmitOutcome::Ignored;
            }
            SubmitStart::Invalid => {
                debug!(errors = self.state.errors().len(), "Validation failed");
                return SubmitOutcome::Invalid;
            }
            SubmitStart::Ready(draft) => draft,
        };

        let result = match self.state.flow().clone() {
            FormFlow::Create => self.repo.create(&draft).await.map(|customer| customer.id),
            FormFlow::Edit(id) => self.repo.update(&id, &draft).await.map(|()| id),
        };

        if self.lifetime.is_disposed() {
            warn!("Form disposed while saving, discarding result");
            return SubmitOutcome::Discarded;
        }

        match self.state.finish_submit(result) {
            Some(route) => {
                info!(route = %route, "Customer saved");
                self.navigator.go_to(&route);
                match self.state.phase() {
                    FormPhase::Succeeded(id) => SubmitOutcome::Saved(id.clone()),
                    _ => SubmitOutcome::Failed,
                }
            }
            None => SubmitOutcome::Failed,
        }
    }
}
