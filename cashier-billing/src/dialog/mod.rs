//! Confirmation dialog orchestration
//!
//! The payment and adjust-bill warnings share one state machine, driven
//! through injected modal/form capabilities so the flows run without a UI
//! runtime. Terminal state is reached only via explicit confirm or cancel;
//! there is no timeout or auto-dismiss.

use crate::utils::error::BillingError;

/// Lifecycle of a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Hidden,
    Shown,
    Resolved,
}

/// Modal chrome behind the dialog
pub trait ModalService {
    fn show(&mut self);
    fn close(&mut self);
}

/// Dims/disables the UI while a modal is up
pub trait BackgroundGuard {
    fn disable_background(&self);
}

/// Externally supplied persistence actions plus the forced UI refresh
pub trait SaveActions {
    /// Persist the bill (create path, also used for adjustments)
    fn save_or_update(&self);
    /// Post the payment against an existing bill (update path)
    fn post_payment(&self);
    /// Force a UI refresh after the form flags change
    fn refresh(&self);
}

/// Slice of form-controller state the confirmation flows mutate
#[derive(Debug, Clone, Default)]
pub struct BillForm {
    /// Present once the bill has been saved; selects the update path
    pub uuid: Option<String>,
    pub is_process_payment: bool,
    pub is_adjust_bill: bool,
}

/// Which warning the dialog carries, and what its confirm does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogKind {
    ProcessPayment,
    AdjustBill,
}

/// Confirmation dialog flow over an injected modal
///
/// `open` moves Hidden → Shown; `confirm`/`cancel` move Shown → Resolved.
/// Any other transition is rejected.
pub struct ConfirmationDialog<M: ModalService> {
    kind: DialogKind,
    state: DialogState,
    modal: M,
}

impl<M: ModalService> ConfirmationDialog<M> {
    /// Warning shown before a payment is processed
    pub fn payment_warning(modal: M) -> Self {
        Self {
            kind: DialogKind::ProcessPayment,
            state: DialogState::Hidden,
            modal,
        }
    }

    /// Warning shown before a bill is adjusted
    pub fn adjust_bill_warning(modal: M) -> Self {
        Self {
            kind: DialogKind::AdjustBill,
            state: DialogState::Hidden,
            modal,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Show the modal and dim the background behind it
    pub fn open(&mut self, background: &dyn BackgroundGuard) -> Result<(), BillingError> {
        if self.state != DialogState::Hidden {
            return Err(BillingError::InvalidDialogState(format!(
                "cannot open dialog in state {:?}",
                self.state
            )));
        }
        self.state = DialogState::Shown;
        self.modal.show();
        background.disable_background();
        Ok(())
    }

    /// Confirm: flag the form, refresh, run the matching save action, close
    ///
    /// The payment warning takes the update path (`post_payment`) when the
    /// bill already has a uuid and the create path (`save_or_update`)
    /// otherwise; the adjust warning always persists through
    /// `save_or_update`.
    pub fn confirm(
        &mut self,
        form: &mut BillForm,
        actions: &dyn SaveActions,
    ) -> Result<(), BillingError> {
        if self.state != DialogState::Shown {
            return Err(BillingError::InvalidDialogState(format!(
                "cannot confirm dialog in state {:?}",
                self.state
            )));
        }

        match self.kind {
            DialogKind::ProcessPayment => {
                form.is_process_payment = true;
                actions.refresh();
                if form.uuid.is_some() {
                    actions.post_payment();
                } else {
                    actions.save_or_update();
                }
            }
            DialogKind::AdjustBill => {
                form.is_adjust_bill = true;
                actions.refresh();
                actions.save_or_update();
            }
        }

        self.modal.close();
        self.state = DialogState::Resolved;
        tracing::debug!(kind = ?self.kind, "confirmation dialog resolved");
        Ok(())
    }

    /// Cancel: close the modal with no side effects on the form
    pub fn cancel(&mut self) -> Result<(), BillingError> {
        if self.state != DialogState::Shown {
            return Err(BillingError::InvalidDialogState(format!(
                "cannot cancel dialog in state {:?}",
                self.state
            )));
        }
        self.modal.close();
        self.state = DialogState::Resolved;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingModal {
        shown: Cell<bool>,
        closed: Cell<bool>,
    }

    impl ModalService for &RecordingModal {
        fn show(&mut self) {
            self.shown.set(true);
        }
        fn close(&mut self) {
            self.closed.set(true);
        }
    }

    #[derive(Default)]
    struct RecordingBackground {
        disabled: Cell<bool>,
    }

    impl BackgroundGuard for RecordingBackground {
        fn disable_background(&self) {
            self.disabled.set(true);
        }
    }

    #[derive(Default)]
    struct RecordingActions {
        calls: RefCell<Vec<&'static str>>,
    }

    impl SaveActions for RecordingActions {
        fn save_or_update(&self) {
            self.calls.borrow_mut().push("save_or_update");
        }
        fn post_payment(&self) {
            self.calls.borrow_mut().push("post_payment");
        }
        fn refresh(&self) {
            self.calls.borrow_mut().push("refresh");
        }
    }

    #[test]
    fn test_open_shows_modal_and_disables_background() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let mut dialog = ConfirmationDialog::payment_warning(&modal);

        dialog.open(&background).unwrap();

        assert_eq!(dialog.state(), DialogState::Shown);
        assert!(modal.shown.get());
        assert!(background.disabled.get());
    }

    #[test]
    fn test_payment_confirm_without_uuid_takes_create_path() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let actions = RecordingActions::default();
        let mut form = BillForm::default();
        let mut dialog = ConfirmationDialog::payment_warning(&modal);

        dialog.open(&background).unwrap();
        dialog.confirm(&mut form, &actions).unwrap();

        assert!(form.is_process_payment);
        assert!(!form.is_adjust_bill);
        assert_eq!(*actions.calls.borrow(), vec!["refresh", "save_or_update"]);
        assert!(modal.closed.get());
        assert_eq!(dialog.state(), DialogState::Resolved);
    }

    #[test]
    fn test_payment_confirm_with_uuid_takes_update_path() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let actions = RecordingActions::default();
        let mut form = BillForm {
            uuid: Some("bill-1".to_string()),
            ..BillForm::default()
        };
        let mut dialog = ConfirmationDialog::payment_warning(&modal);

        dialog.open(&background).unwrap();
        dialog.confirm(&mut form, &actions).unwrap();

        assert_eq!(*actions.calls.borrow(), vec!["refresh", "post_payment"]);
    }

    #[test]
    fn test_adjust_confirm_always_saves() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let actions = RecordingActions::default();
        let mut form = BillForm {
            uuid: Some("bill-1".to_string()),
            ..BillForm::default()
        };
        let mut dialog = ConfirmationDialog::adjust_bill_warning(&modal);

        dialog.open(&background).unwrap();
        dialog.confirm(&mut form, &actions).unwrap();

        assert!(form.is_adjust_bill);
        assert!(!form.is_process_payment);
        assert_eq!(*actions.calls.borrow(), vec!["refresh", "save_or_update"]);
    }

    #[test]
    fn test_cancel_closes_without_side_effects() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let mut dialog = ConfirmationDialog::payment_warning(&modal);

        dialog.open(&background).unwrap();
        dialog.cancel().unwrap();

        assert!(modal.closed.get());
        assert_eq!(dialog.state(), DialogState::Resolved);
    }

    #[test]
    fn test_confirm_before_open_rejected() {
        let modal = RecordingModal::default();
        let actions = RecordingActions::default();
        let mut form = BillForm::default();
        let mut dialog = ConfirmationDialog::payment_warning(&modal);

        let result = dialog.confirm(&mut form, &actions);

        assert!(matches!(
            result,
            Err(BillingError::InvalidDialogState(_))
        ));
        assert!(!form.is_process_payment);
        assert!(actions.calls.borrow().is_empty());
    }

    #[test]
    fn test_reopening_resolved_dialog_rejected() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let mut dialog = ConfirmationDialog::payment_warning(&modal);

        dialog.open(&background).unwrap();
        dialog.cancel().unwrap();

        assert!(matches!(
            dialog.open(&background),
            Err(BillingError::InvalidDialogState(_))
        ));
    }

    #[test]
    fn test_double_cancel_rejected() {
        let modal = RecordingModal::default();
        let background = RecordingBackground::default();
        let mut dialog = ConfirmationDialog::adjust_bill_warning(&modal);

        dialog.open(&background).unwrap();
        dialog.cancel().unwrap();

        assert!(matches!(
            dialog.cancel(),
            Err(BillingError::InvalidDialogState(_))
        ));
    }
}
