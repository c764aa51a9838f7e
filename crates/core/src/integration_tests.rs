//! Integration tests: exercise the panel's full lifecycle against a
//! scripted configuration service.
//!
//! Each test mounts the panel (one load), applies user actions through the
//! state manager, then saves, checking what reached the service.

#[cfg(test)]
mod tests {
    use crate::i18n::{Locale, Text};
    use crate::identity::{Field, Identity};
    use crate::preset::{self, CUSTOM_KEY};
    use crate::state::IdentityState;
    use crate::sync::mock::{LoadReply, MockService};
    use crate::sync::Notice;

    fn logitech() -> Identity {
        Identity::new("0x046d", "0xc31c", "Logitech", "Keyboard K120")
    }

    /// Create a panel state that has completed its start-up load.
    fn mount(service: &MockService) -> IdentityState {
        let mut state = IdentityState::new();
        state.load_with(service);
        state
    }

    /// Mount → logitech detected → edit vid → save pushes the edited identity.
    #[test]
    fn mount_edit_save() {
        let service = MockService::new(logitech());
        let mut state = mount(&service);
        assert_eq!(service.load_count(), 1);
        assert_eq!(state.selected_preset_key(), "logitech");

        state.edit_field(Field::Vid, "0x1234");
        assert_eq!(state.selected_preset_key(), CUSTOM_KEY);

        let notice = state.save_with(&service, Locale::En).unwrap();
        assert_eq!(notice, Notice::success(Text::SaveSuccess.localize(Locale::En)));
        assert_eq!(
            service.saved(),
            vec![Identity::new("0x1234", "0xc31c", "Logitech", "Keyboard K120")]
        );
        assert_eq!(state.selected_preset_key(), CUSTOM_KEY);
    }

    /// Mount → choose generic → save pushes all four preset fields.
    #[test]
    fn mount_select_preset_save() {
        let service = MockService::new(logitech());
        let mut state = mount(&service);

        state.select_preset("generic");
        state.save_with(&service, Locale::En).unwrap();

        let pushed = &service.saved()[0];
        assert_eq!(pushed.vid, "0x1d6b");
        assert_eq!(pushed.pid, "0x0104");
        assert_eq!(pushed.manufacturer, "Linux Foundation");
        assert_eq!(pushed.product, "Multifunction Composite Gadget");
        assert_eq!(state.selected_preset_key(), "generic");
    }

    /// Choosing custom after a preset keeps the preset's values for editing.
    #[test]
    fn preset_then_custom_then_edit() {
        let service = MockService::new(logitech());
        let mut state = mount(&service);

        state.select_preset("microsoft");
        state.select_preset(CUSTOM_KEY);
        assert_eq!(state.identity().manufacturer, "Microsoft");

        state.edit_field(Field::Product, "Sculpt");
        state.save_with(&service, Locale::En).unwrap();
        assert_eq!(
            service.saved(),
            vec![Identity::new("0x045e", "0x00db", "Microsoft", "Sculpt")]
        );
    }

    /// Unreachable device at mount: defaults stay, save still works later.
    #[test]
    fn failed_mount_then_save() {
        let service = MockService::with_load(LoadReply::Transport("no route to host".into()));
        let mut state = mount(&service);

        assert!(!state.is_loading());
        assert_eq!(state.identity(), &preset::default_identity());
        assert_eq!(state.selected_preset_key(), "default");

        let notice = state.save_with(&service, Locale::En).unwrap();
        assert!(!notice.is_error());
        assert_eq!(service.saved(), vec![preset::default_identity()]);
    }

    /// Device busy on save: error notice with the service text, form intact.
    #[test]
    fn busy_device_on_save() {
        let service = MockService::new(logitech());
        service.fail_saves(1, "device busy");
        let mut state = mount(&service);
        state.edit_field(Field::Pid, "0xc31d");
        let before = state.clone();

        let notice = state.save_with(&service, Locale::En).unwrap();
        assert_eq!(notice, Notice::error("device busy"));
        assert_eq!(state, before);
        assert!(!state.is_saving());
    }

    /// A loaded identity that matches no preset lands on custom.
    #[test]
    fn mount_with_unknown_identity() {
        let service = MockService::new(Identity::new("0x05ac", "0x024f", "Apple", "Keyboard"));
        let state = mount(&service);
        assert_eq!(state.selected_preset_key(), CUSTOM_KEY);
        assert_eq!(state.identity().manufacturer, "Apple");
    }
}
